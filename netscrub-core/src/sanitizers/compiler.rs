//! compiler.rs - Builds the regular expressions used to locate identifiers.
//!
//! The private-IP and domain patterns never change and live in process-wide
//! statics. The hostname pattern depends on what the operator registered, so it
//! is compiled on demand from the hostname list.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};

use crate::errors::NetscrubError;

/// Maximum accepted length of a single registered hostname.
pub const MAX_HOSTNAME_LENGTH: usize = 253;

/// Matches literals in `10/8`, `172.16/12` and `192.168/16`. Octet values are
/// validated separately by [`crate::validators::classify_private_ipv4`].
///
/// Boundaries are ASCII-only (`(?-u:\b)`): an address glued to non-ASCII text
/// such as `服务器10.0.0.1` must still be found.
pub const PRIVATE_IP_PATTERN: &str =
    r"(?-u:\b)(10(?:\.[0-9]{1,3}){3}|192\.168(?:\.[0-9]{1,3}){2}|172\.(?:1[6-9]|2[0-9]|3[0-1])(?:\.[0-9]{1,3}){2})(?-u:\b)";

/// Matches `label(.label)+` where each label starts with a letter and is at
/// least two characters of letters, digits or hyphens. ASCII boundaries, as above.
pub const DOMAIN_PATTERN: &str = r"(?-u:\b)([a-zA-Z][a-zA-Z0-9-]+(?:\.[a-zA-Z][a-zA-Z0-9-]+)+)(?-u:\b)";

lazy_static! {
    pub static ref PRIVATE_IP_REGEX: Regex =
        Regex::new(PRIVATE_IP_PATTERN).expect("private IP pattern is a valid regex");
    pub static ref DOMAIN_REGEX: Regex =
        Regex::new(DOMAIN_PATTERN).expect("domain pattern is a valid regex");
}

/// Compiles the registered hostnames into one case-insensitive alternation.
///
/// Each hostname is escaped, so dots and other metacharacters match literally.
/// Returns `Ok(None)` when there is nothing to match.
pub fn compile_hostname_pattern(hostnames: &[String]) -> Result<Option<Regex>, NetscrubError> {
    if hostnames.is_empty() {
        return Ok(None);
    }

    if let Some(too_long) = hostnames.iter().find(|h| h.len() > MAX_HOSTNAME_LENGTH) {
        return Err(NetscrubError::Config(format!(
            "hostname of {} characters exceeds maximum allowed ({})",
            too_long.len(),
            MAX_HOSTNAME_LENGTH
        )));
    }

    let alternation = hostnames
        .iter()
        .map(|h| regex::escape(h))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!("({})", alternation);

    debug!("Compiling hostname pattern from {} hostname(s).", hostnames.len());

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map(Some)
        .map_err(|e| NetscrubError::PatternCompilationError("hostname", e))
}
