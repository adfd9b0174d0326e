// netscrub-core/src/ledger.rs
//! The substitution ledger: a per-run record of what replaced what, and how often.
//!
//! The ledger is a reporting side channel. It never influences which
//! identifiers get replaced or what they are replaced with.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Latest replacement for one original value and how many times it was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LedgerEntry {
    pub replacement: String,
    pub count: usize,
}

/// Mapping from original value to [`LedgerEntry`], ordered by original value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Ledger {
    entries: BTreeMap<String, LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one substitution: bumps the count and overwrites the replacement.
    pub fn add(&mut self, original: &str, replacement: &str) {
        let entry = self.entries.entry(original.to_string()).or_default();
        entry.count += 1;
        entry.replacement = replacement.to_string();
    }

    /// Unconditional overwrite, used to pre-seed entries.
    pub fn set(&mut self, original: &str, replacement: &str, count: usize) {
        self.entries.insert(
            original.to_string(),
            LedgerEntry {
                replacement: replacement.to_string(),
                count,
            },
        );
    }

    pub fn get(&self, original: &str) -> Option<&LedgerEntry> {
        self.entries.get(original)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries sorted by original value.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &LedgerEntry)> {
        self.entries.iter()
    }

    /// Sum of all occurrence counts.
    pub fn total_substitutions(&self) -> usize {
        self.entries.values().map(|e| e.count).sum()
    }
}

pub fn plural_time(count: usize) -> &'static str {
    if count == 1 {
        "time"
    } else {
        "times"
    }
}

impl fmt::Display for Ledger {
    /// One line per original, aligned to the longest original and replacement.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let original_width = self.entries.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        let replacement_width = self
            .entries
            .values()
            .map(|e| e.replacement.chars().count())
            .max()
            .unwrap_or(0);

        for (original, entry) in &self.entries {
            writeln!(
                f,
                "{:<ow$} -> {:<rw$} ({} {})",
                original,
                entry.replacement,
                entry.count,
                plural_time(entry.count),
                ow = original_width,
                rw = replacement_width
            )?;
        }
        Ok(())
    }
}
