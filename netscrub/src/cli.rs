// netscrub/src/cli.rs
//! Command-line interface definition for the `netscrub` binary.

use clap::{Parser, ValueEnum};
use netscrub_core::StrategyKind;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "netscrub",
    version = env!("CARGO_PKG_VERSION"),
    about = "Anonymize private IPs, hostnames and domains inside a diagnostic bundle",
    long_about = "netscrub rewrites every file of a zip bundle, replacing RFC 1918 IPv4 addresses, registered hostnames and the foreign labels of trusted domains with consistent pseudonyms. SQLite stores inside the bundle are scrubbed row by row. A summary of every substitution is printed at the end.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Bundle to anonymize.
    #[arg(long = "input", short = 'i', value_name = "FILE", help = "Path to the zip bundle to anonymize.")]
    pub input: PathBuf,

    /// Where to write the anonymized bundle.
    #[arg(long, short = 'o', value_name = "FILE", help = "Output path (defaults to <name>_anonymized.<ext> next to the input).")]
    pub output: Option<PathBuf>,

    /// Secret for the codeword strategy.
    #[arg(long, short = 'c', env = "NETSCRUB_CODEWORD", hide_env_values = true, help = "Codeword seeding reproducible pseudonyms.")]
    pub codeword: Option<String>,

    /// Hostnames to replace. Repeatable.
    #[arg(long = "hostname", short = 'H', value_name = "HOST", help = "Hostname to anonymize (can be used multiple times).")]
    pub hostnames: Vec<String>,

    /// Trusted domains. Repeatable.
    #[arg(long = "domain", short = 'd', value_name = "DOMAIN", help = "Trusted domain whose subdomain labels are anonymized (can be used multiple times).")]
    pub domains: Vec<String>,

    /// Pseudonym strategy.
    #[arg(long, value_enum, value_name = "STRATEGY", help = "Pseudonym strategy (defaults to the config file value, then 'codeword').")]
    pub strategy: Option<StrategyChoice>,

    /// YAML configuration file.
    #[arg(long = "config", value_name = "FILE", help = "Path to a YAML configuration file.")]
    pub config: Option<PathBuf>,

    /// Write the substitution ledger as JSON.
    #[arg(long = "report-json", value_name = "FILE", help = "Also write the substitution summary as JSON to this file.")]
    pub report_json: Option<PathBuf>,

    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    #[arg(long, help = "Enable debug logging.")]
    pub debug: bool,
}

/// Strategy selection on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StrategyChoice {
    /// Keyed hash of the codeword: the same input always gives the same pseudonym.
    Codeword,
    /// Random pseudonyms, unique and stable within one run.
    Random,
}

impl From<StrategyChoice> for StrategyKind {
    fn from(choice: StrategyChoice) -> Self {
        match choice {
            StrategyChoice::Codeword => StrategyKind::Codeword,
            StrategyChoice::Random => StrategyKind::Random,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_lists() {
        let cli = Cli::try_parse_from([
            "netscrub", "-i", "bundle.zip", "-c", "k", "-H", "db01", "-H", "web01", "-d", "corp.example",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("bundle.zip"));
        assert_eq!(cli.hostnames, vec!["db01", "web01"]);
        assert_eq!(cli.domains, vec!["corp.example"]);
        assert_eq!(cli.strategy, None);
    }

    #[test]
    fn parses_random_strategy() {
        let cli = Cli::try_parse_from(["netscrub", "-i", "b.zip", "--strategy", "random"]).unwrap();
        assert_eq!(cli.strategy.map(StrategyKind::from), Some(StrategyKind::Random));
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["netscrub", "-c", "k"]).is_err());
    }
}
