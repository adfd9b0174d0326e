// netscrub/src/lib.rs
//! # netscrub CLI Application
//!
//! Command-line front end for `netscrub-core`. It walks a diagnostic bundle
//! (a zip archive), anonymizes every entry and reports the substitutions made.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;

pub use commands::anonymize::{run_anonymize, AnonymizeOptions};
