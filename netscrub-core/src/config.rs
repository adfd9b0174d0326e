//! Configuration management for `netscrub-core`.
//!
//! An [`AnonymizerConfig`] names the strategy, the codeword and the trusted
//! hostnames and domains for a run. It can be loaded from a YAML file and is
//! then merged with whatever the command line supplies.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::engine::StrategyKind;

/// Everything the engine needs to know before processing starts.
#[derive(Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AnonymizerConfig {
    /// Which pseudonym strategy to use.
    pub strategy: StrategyKind,
    /// Secret seeding the codeword strategy. Required for that strategy.
    pub codeword: Option<String>,
    /// Hostnames to replace wherever they appear, matched case-insensitively.
    pub hostnames: Vec<String>,
    /// Trusted domains whose suffix stays readable; leading foreign labels are replaced.
    pub domains: Vec<String>,
    /// Fixed seed for the random strategy. Only useful for reproducible tests.
    pub seed: Option<u64>,
}

impl std::fmt::Debug for AnonymizerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnonymizerConfig")
            .field("strategy", &self.strategy)
            .field("codeword", &self.codeword.as_ref().map(|_| "[REDACTED]"))
            .field("hostnames", &self.hostnames)
            .field("domains", &self.domains)
            .field("seed", &self.seed)
            .finish()
    }
}

impl AnonymizerConfig {
    /// Loads a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AnonymizerConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        debug!(
            "Loaded {} hostname(s) and {} domain(s) from {}.",
            config.hostnames.len(),
            config.domains.len(),
            path.display()
        );
        Ok(config)
    }

    /// Folds command-line values into this configuration.
    ///
    /// Lists are appended after the file's entries, preserving registration
    /// order; a codeword or strategy given on the command line wins.
    pub fn merge_cli(
        mut self,
        strategy: Option<StrategyKind>,
        codeword: Option<String>,
        hostnames: Vec<String>,
        domains: Vec<String>,
    ) -> Self {
        if let Some(strategy) = strategy {
            self.strategy = strategy;
        }
        if codeword.is_some() {
            self.codeword = codeword;
        }
        self.hostnames.extend(hostnames);
        self.domains.extend(domains);
        dedupe_in_order(&mut self.hostnames);
        dedupe_in_order(&mut self.domains);
        self
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.strategy == StrategyKind::Codeword {
            match self.codeword.as_deref() {
                None => errors.push("The codeword strategy requires a codeword.".to_string()),
                Some(c) if c.is_empty() => errors.push("The codeword must not be empty.".to_string()),
                _ => {}
            }
        }

        if self.strategy == StrategyKind::Random && !self.domains.is_empty() {
            warn!("The random strategy does not pseudonymize domain labels; trusted domains will have no effect.");
        }

        for hostname in &self.hostnames {
            if hostname.trim().is_empty() {
                errors.push("A hostname entry is empty.".to_string());
            }
        }

        for domain in &self.domains {
            if domain.is_empty() {
                errors.push("A domain entry is empty.".to_string());
            } else if domain.split('.').any(str::is_empty) {
                errors.push(format!("Domain '{}' contains an empty label.", domain));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
        }
    }
}

fn dedupe_in_order(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
