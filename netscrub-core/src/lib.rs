// netscrub-core/src/lib.rs
//! # netscrub Core Library
//!
//! `netscrub-core` finds sensitive network identifiers (private IPv4 addresses,
//! registered hostnames and organization domain names) in text and in SQLite
//! stores, and replaces each one with a consistent pseudonym. It is the engine
//! behind the `netscrub` command, which sanitizes diagnostic bundles before they
//! leave a trust boundary.
//!
//! ## Modules
//!
//! * `config`: Defines `AnonymizerConfig`, loaded from YAML and merged with CLI flags.
//! * `sanitizers`: Regex compilation and the side-effect free identifier detector.
//! * `validators`: Strict parsing and RFC 1918 classification of IPv4 literals.
//! * `suffix`: Right-anchored matching of candidate domains against trusted domains.
//! * `engine`: Defines the `PseudonymStrategy` trait.
//! * `engines`: The codeword (keyed, reproducible) and random (memoized) strategies.
//! * `ledger`: Per-run record of every substitution and its count.
//! * `sqlite`: Table-by-table scrubbing of SQLite images.
//! * `anonymizer`: The orchestrator tying everything together.
//! * `headless`: One-shot convenience wrapper.
//!
//! ## Usage Example
//!
//! ```rust
//! use netscrub_core::{Anonymizer, CodewordEngine};
//!
//! let mut anonymizer = Anonymizer::new(Box::new(CodewordEngine::new("1")));
//! anonymizer.add_domain("test");
//!
//! let out = anonymizer.anonymize_string("see abc.test");
//! assert_eq!(out, "see Dk7fzqdsb.test");
//! assert_eq!(anonymizer.ledger().get("abc.test").unwrap().count, 1);
//! ```
//!
//! ## Error Handling
//!
//! Store and I/O failures surface as [`NetscrubError`]; configuration loading
//! uses `anyhow::Error`. Malformed or public IP literals are never errors, they
//! are simply left alone.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod anonymizer;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod ledger;
pub mod sanitizers;
pub mod sqlite;
pub mod substitution;
pub mod suffix;
pub mod validators;

/// Re-exports the orchestrator.
pub use anonymizer::Anonymizer;

/// Re-exports the configuration type.
pub use config::AnonymizerConfig;

/// Re-exports the custom error type for clear error reporting.
pub use errors::NetscrubError;

/// Re-exports the strategy trait and its selector.
pub use engine::{PseudonymStrategy, StrategyKind};

/// Re-exports the concrete strategies.
pub use engines::codeword_engine::CodewordEngine;
pub use engines::random_engine::RandomEngine;

/// Re-exports the ledger types for end-of-run reporting.
pub use ledger::{Ledger, LedgerEntry};

/// Re-exports detection results.
pub use substitution::{IdentifierKind, IdentifierMatch};

/// Re-exports the SQLite signature check used to route files.
pub use sqlite::{is_sqlite_image, SQLITE_PREFIX};

/// Re-exports the one-shot helper.
pub use headless::headless_anonymize_string;
