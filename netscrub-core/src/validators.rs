// File: netscrub-core/src/validators.rs
//! Programmatic validation for IPv4 literals found by the detector.
//!
//! The detector pattern is intentionally loose about octet values (`\d{1,3}`),
//! so every candidate is parsed strictly here before any strategy touches it.
//! Anything that fails to parse, or that falls outside the three RFC 1918
//! ranges, is reported as `None` and left untouched by the engine.
//!
//! License: MIT OR APACHE 2.0

use std::net::Ipv4Addr;

/// The RFC 1918 range an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrivateRange {
    /// `10.0.0.0/8`
    TenSlash8,
    /// `172.16.0.0/12`
    OneSevenTwoSlash12,
    /// `192.168.0.0/16`
    OneNineTwoSlash16,
}

/// Parses `candidate` as a dotted-quad IPv4 literal and classifies it.
///
/// # Returns
///
/// The parsed octets and the private range, or `None` when the literal is
/// malformed (including leading zeros or octets above 255) or public.
pub fn classify_private_ipv4(candidate: &str) -> Option<([u8; 4], PrivateRange)> {
    let octets = candidate.parse::<Ipv4Addr>().ok()?.octets();
    let range = match octets {
        [10, _, _, _] => PrivateRange::TenSlash8,
        [172, b, _, _] if (16..=31).contains(&b) => PrivateRange::OneSevenTwoSlash12,
        [192, 168, _, _] => PrivateRange::OneNineTwoSlash16,
        _ => return None,
    };
    Some((octets, range))
}

/// Returns `true` if `candidate` is a well-formed private IPv4 literal.
pub fn is_private_ipv4(candidate: &str) -> bool {
    classify_private_ipv4(candidate).is_some()
}
