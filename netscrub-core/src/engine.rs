// netscrub-core/src/engine.rs
//! Defines the core `PseudonymStrategy` trait.
//!
//! A strategy decides what replaces a detected identifier. The orchestrator
//! ([`crate::anonymizer::Anonymizer`]) owns exactly one strategy for the whole
//! run and calls it once per match, so strategies that keep memo tables see
//! every identifier of every file.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pluggable pseudonym generator.
///
/// Methods take `&mut self` because the random strategy grows its memo tables
/// on every call; the deterministic strategy simply ignores the mutability.
pub trait PseudonymStrategy {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Replacement for a private IPv4 literal.
    ///
    /// Returns `None` when `original` is malformed or not in one of the three
    /// private ranges; the caller then leaves it unchanged.
    fn ip(&mut self, original: &str) -> Option<String>;

    /// Replacement for a registered hostname, exactly as it appeared in the text.
    fn hostname(&mut self, original: &str) -> String;

    /// Replacement for one foreign domain label.
    ///
    /// Returns `None` when the strategy does not pseudonymize domains, in which
    /// case the label stays as it is.
    fn domain_label(&mut self, label: &str) -> Option<String>;
}

/// Which strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Keyed by the operator codeword, reproducible across runs.
    #[default]
    Codeword,
    /// Drawn from a pseudorandom source, stable only within one run.
    Random,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Codeword => f.write_str("codeword"),
            StrategyKind::Random => f.write_str("random"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "codeword" | "deterministic" => Ok(StrategyKind::Codeword),
            "random" => Ok(StrategyKind::Random),
            other => Err(format!("unknown strategy '{}'; expected 'codeword' or 'random'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_kind_parses_aliases() {
        assert_eq!("Codeword".parse::<StrategyKind>().unwrap(), StrategyKind::Codeword);
        assert_eq!("deterministic".parse::<StrategyKind>().unwrap(), StrategyKind::Codeword);
        assert_eq!("random".parse::<StrategyKind>().unwrap(), StrategyKind::Random);
        assert!("hmac".parse::<StrategyKind>().is_err());
    }
}
