// netscrub-core/src/anonymizer.rs
//! The orchestrator: one strategy, the trusted lists, and the ledger for a run.
//!
//! [`Anonymizer::anonymize_string`] applies the three substitution passes in a
//! fixed order (IPs, then hostnames, then domains). [`Anonymizer::process`] is
//! the file-level entry point used by the archive driver: it decides whether a
//! file is an SQLite image or text and writes the transformed result.
//!
//! License: MIT OR APACHE 2.0

use std::fs;
use std::io::{Read, Write};

use log::{debug, info};
use regex::{Captures, Regex};

use crate::config::AnonymizerConfig;
use crate::engine::{PseudonymStrategy, StrategyKind};
use crate::engines::codeword_engine::CodewordEngine;
use crate::engines::random_engine::RandomEngine;
use crate::errors::{NetscrubError, Result};
use crate::ledger::Ledger;
use crate::sanitizers::compiler::{compile_hostname_pattern, DOMAIN_REGEX, PRIVATE_IP_REGEX};
use crate::sanitizers::detector;
use crate::sqlite;
use crate::substitution::{log_passthrough_debug, log_substitution_debug, IdentifierKind, IdentifierMatch};
use crate::suffix::rewrite_foreign_labels;

const MODULE: &str = "[netscrub_core::anonymizer]";

/// File name of the temporary copy an SQLite image is scrubbed in.
const TEMP_STORE_NAME: &str = "temp.sqlite";

/// One anonymization run: the pseudonym strategy, the registered hostnames and
/// trusted domains, and the [`Ledger`] of everything replaced so far.
///
/// A single instance should see every file of a bundle so that the strategy's
/// memo and the ledger span the whole run.
pub struct Anonymizer {
    strategy: Box<dyn PseudonymStrategy>,
    hostnames: Vec<String>,
    domains: Vec<String>,
    hostname_regex: Option<Regex>,
    ledger: Ledger,
}

impl std::fmt::Debug for Anonymizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Anonymizer")
            .field("strategy", &self.strategy.name())
            .field("hostnames", &self.hostnames)
            .field("domains", &self.domains)
            .field("ledger_entries", &self.ledger.len())
            .finish()
    }
}

impl Anonymizer {
    pub fn new(strategy: Box<dyn PseudonymStrategy>) -> Self {
        Self {
            strategy,
            hostnames: Vec::new(),
            domains: Vec::new(),
            hostname_regex: None,
            ledger: Ledger::new(),
        }
    }

    /// Builds the strategy named by `config` and registers its trusted lists.
    pub fn from_config(config: &AnonymizerConfig) -> Result<Self> {
        let strategy: Box<dyn PseudonymStrategy> = match config.strategy {
            StrategyKind::Codeword => {
                let codeword = config
                    .codeword
                    .as_deref()
                    .filter(|c| !c.is_empty())
                    .ok_or_else(|| NetscrubError::Config("the codeword strategy requires a codeword".into()))?;
                Box::new(CodewordEngine::new(codeword))
            }
            StrategyKind::Random => match config.seed {
                Some(seed) => Box::new(RandomEngine::with_seed(seed)),
                None => Box::new(RandomEngine::new()),
            },
        };

        let mut anonymizer = Self::new(strategy);
        anonymizer.add_hostnames(config.hostnames.iter().cloned())?;
        for domain in &config.domains {
            anonymizer.add_domain(domain.clone());
        }
        info!(
            "Anonymizer ready: strategy={}, {} hostname(s), {} trusted domain(s).",
            anonymizer.strategy.name(),
            anonymizer.hostnames.len(),
            anonymizer.domains.len()
        );
        Ok(anonymizer)
    }

    /// Registers one hostname to be replaced.
    pub fn add_hostname(&mut self, hostname: impl Into<String>) -> Result<&mut Self> {
        self.add_hostnames(std::iter::once(hostname.into()))
    }

    /// Registers several hostnames, recompiling the hostname pattern once.
    pub fn add_hostnames<I>(&mut self, hostnames: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut candidate = self.hostnames.clone();
        candidate.extend(hostnames);
        self.hostname_regex = compile_hostname_pattern(&candidate)?;
        self.hostnames = candidate;
        Ok(self)
    }

    /// Registers one trusted domain. Order matters: the first accepting domain wins.
    pub fn add_domain(&mut self, domain: impl Into<String>) -> &mut Self {
        self.domains.push(domain.into());
        self
    }

    pub fn hostnames(&self) -> &[String] {
        &self.hostnames
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Spans the three passes would consider, without changing anything.
    pub fn find_identifiers(&self, text: &str) -> Vec<IdentifierMatch> {
        detector::find_identifiers(text, self.hostname_regex.as_ref())
    }

    /// Replaces every private IPv4 literal. Malformed or public literals stay.
    pub fn anonymize_ips(&mut self, data: &str) -> String {
        let Self { strategy, ledger, .. } = self;
        PRIVATE_IP_REGEX
            .replace_all(data, |caps: &Captures| {
                let original = &caps[0];
                match strategy.ip(original) {
                    Some(value) => {
                        log_substitution_debug(MODULE, IdentifierKind::PrivateIp, original, &value);
                        ledger.add(original, &value);
                        value
                    }
                    None => {
                        log_passthrough_debug(MODULE, IdentifierKind::PrivateIp, original);
                        original.to_string()
                    }
                }
            })
            .into_owned()
    }

    /// Replaces every occurrence of a registered hostname.
    pub fn anonymize_hostnames(&mut self, data: &str) -> String {
        let Self { strategy, ledger, hostname_regex, .. } = self;
        let Some(re) = hostname_regex.as_ref() else {
            return data.to_string();
        };
        re.replace_all(data, |caps: &Captures| {
            let original = &caps[0];
            let value = strategy.hostname(original);
            log_substitution_debug(MODULE, IdentifierKind::Hostname, original, &value);
            ledger.add(original, &value);
            value
        })
        .into_owned()
    }

    /// Rewrites the foreign labels of one candidate domain.
    ///
    /// Returns the candidate unchanged if no trusted domain is a suffix of it.
    pub fn anonymize_domain(&mut self, candidate: &str) -> String {
        let Self { strategy, ledger, domains, .. } = self;
        match rewrite_foreign_labels(candidate, domains.as_slice(), |label| strategy.domain_label(label)) {
            Some((rewritten, matched)) => {
                if rewritten != candidate {
                    log_substitution_debug(MODULE, IdentifierKind::Domain, candidate, &rewritten);
                    ledger.add(candidate, &rewritten);
                } else if matched.foreign_labels > 0 {
                    log_passthrough_debug(MODULE, IdentifierKind::Domain, candidate);
                }
                rewritten
            }
            None => candidate.to_string(),
        }
    }

    /// Applies [`Self::anonymize_domain`] to every domain-shaped token.
    pub fn anonymize_domains(&mut self, data: &str) -> String {
        DOMAIN_REGEX
            .replace_all(data, |caps: &Captures| self.anonymize_domain(&caps[0]))
            .into_owned()
    }

    /// IPs first, then hostnames (if any registered), then domains (if any trusted).
    pub fn anonymize_string(&mut self, data: &str) -> String {
        let mut data = self.anonymize_ips(data);
        if !self.hostnames.is_empty() {
            data = self.anonymize_hostnames(&data);
        }
        if !self.domains.is_empty() {
            data = self.anonymize_domains(&data);
        }
        data
    }

    /// Reads `src` to the end, transforms it and writes the full result to `dst`.
    ///
    /// SQLite images are scrubbed row by row; valid UTF-8 is treated as text;
    /// anything else is copied through unchanged.
    pub fn process(&mut self, dst: &mut dyn Write, src: &mut dyn Read) -> Result<()> {
        let mut data = Vec::new();
        src.read_to_end(&mut data)
            .map_err(|e| NetscrubError::io("failed to copy file contents", e))?;

        if sqlite::is_sqlite_image(&data) {
            return self.anonymize_sqlite(dst, &data);
        }

        let result = match String::from_utf8(data) {
            Ok(text) => self.anonymize_string(&text).into_bytes(),
            Err(e) => {
                debug!("{} Content is not UTF-8 text, copying unchanged.", MODULE);
                e.into_bytes()
            }
        };

        dst.write_all(&result)
            .map_err(|e| NetscrubError::io("failed to write file contents", e))
    }

    /// Materializes an SQLite image to a temporary file, scrubs it in place and
    /// streams the result to `dst`.
    pub fn anonymize_sqlite(&mut self, dst: &mut dyn Write, data: &[u8]) -> Result<()> {
        let temp_dir = tempfile::Builder::new()
            .prefix("netscrub-")
            .tempdir()
            .map_err(|e| NetscrubError::io("failed to create temporary directory", e))?;
        let path = temp_dir.path().join(TEMP_STORE_NAME);
        fs::write(&path, data).map_err(|e| NetscrubError::io("failed to write temporary store", e))?;

        let updated = sqlite::scrub_database(&path, |value| self.anonymize_string(value))?;
        debug!("{} SQLite image scrubbed, {} row update(s).", MODULE, updated);

        let mut file = fs::File::open(&path).map_err(|e| NetscrubError::io("failed to reopen temporary store", e))?;
        std::io::copy(&mut file, dst).map_err(|e| NetscrubError::io("failed to write scrubbed store", e))?;
        Ok(())
    }
}
