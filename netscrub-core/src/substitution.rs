// netscrub-core/src/substitution.rs
//! Data structures describing detected identifiers and the debug-logging helpers
//! used whenever an identifier is replaced.
//!
//! Original identifiers are sensitive by definition, so every log line that
//! would carry one goes through [`get_loggable_content`], which masks it unless
//! `NETSCRUB_ALLOW_DEBUG_PII=true` is set in the environment.

use std::fmt;

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("NETSCRUB_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// The three categories of network identifier the engine knows how to replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// A literal in one of the RFC 1918 private IPv4 ranges.
    PrivateIp,
    /// One of the operator-registered hostnames.
    Hostname,
    /// A dotted, domain-shaped token.
    Domain,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentifierKind::PrivateIp => "private_ip",
            IdentifierKind::Hostname => "hostname",
            IdentifierKind::Domain => "domain",
        };
        f.write_str(name)
    }
}

/// A single candidate located by the detector. Byte offsets index into the
/// text that was scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierMatch {
    pub kind: IdentifierKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

pub(crate) fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub(crate) fn log_substitution_debug(
    module_path: &str,
    kind: IdentifierKind,
    original_sensitive_content: &str,
    replacement: &str,
) {
    debug!(
        "{} Substitution: kind='{}', Original='{}', Replacement='{}'",
        module_path,
        kind,
        get_loggable_content(original_sensitive_content),
        replacement
    );
}

pub(crate) fn log_passthrough_debug(module_path: &str, kind: IdentifierKind, original_sensitive_content: &str) {
    debug!(
        "{} Left unchanged ({}): '{}'",
        module_path,
        kind,
        get_loggable_content(original_sensitive_content)
    );
}
