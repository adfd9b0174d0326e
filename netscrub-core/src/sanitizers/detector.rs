//! detector.rs - Locates identifier candidates in a text blob.
//!
//! Detection is side-effect free. The orchestrator rewrites matches through a
//! per-match callback; these functions exist for callers that only want to
//! know what would be touched (and for tests).

use regex::Regex;

use crate::sanitizers::compiler::{DOMAIN_REGEX, PRIVATE_IP_REGEX};
use crate::substitution::{IdentifierKind, IdentifierMatch};

fn collect(regex: &Regex, kind: IdentifierKind, text: &str) -> Vec<IdentifierMatch> {
    regex
        .find_iter(text)
        .map(|m| IdentifierMatch {
            kind,
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Spans shaped like a private IPv4 literal. Octets are not range-checked here.
pub fn find_private_ips(text: &str) -> Vec<IdentifierMatch> {
    collect(&PRIVATE_IP_REGEX, IdentifierKind::PrivateIp, text)
}

/// Spans matching any registered hostname (see `compile_hostname_pattern`).
pub fn find_hostnames(hostname_regex: &Regex, text: &str) -> Vec<IdentifierMatch> {
    collect(hostname_regex, IdentifierKind::Hostname, text)
}

/// Maximal word-bounded dotted tokens.
pub fn find_domains(text: &str) -> Vec<IdentifierMatch> {
    collect(&DOMAIN_REGEX, IdentifierKind::Domain, text)
}

/// Runs every detector over the same text and returns the spans sorted by
/// start offset. Spans from different categories may overlap.
pub fn find_identifiers(text: &str, hostname_regex: Option<&Regex>) -> Vec<IdentifierMatch> {
    let mut all = find_private_ips(text);
    if let Some(re) = hostname_regex {
        all.extend(find_hostnames(re, text));
    }
    all.extend(find_domains(text));
    all.sort_by_key(|m| (m.start, m.kind));
    all
}
