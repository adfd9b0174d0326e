//! errors.rs - Custom error types for the netscrub-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `netscrub-core` library.
///
/// Malformed or public IP addresses are never errors; they pass through the
/// engine unchanged. Everything here aborts the file currently being processed.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NetscrubError {
    #[error("Failed to compile {0} pattern: {1}")]
    PatternCompilationError(&'static str, regex::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl NetscrubError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        NetscrubError::Io { context: context.into(), source }
    }

    pub(crate) fn store(context: impl Into<String>, source: rusqlite::Error) -> Self {
        NetscrubError::Store { context: context.into(), source }
    }
}

/// Convenience alias used across the engine.
pub type Result<T, E = NetscrubError> = std::result::Result<T, E>;
