// netscrub/src/logger.rs
//! Logger setup for the `netscrub` binary.

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

/// Initializes `env_logger` on stderr.
///
/// `RUST_LOG` is honored unless `level_override` is given, in which case it
/// replaces the global filter. Calling this more than once is harmless.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format(|buf, record| {
        writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
    });
    let _ = builder.try_init();
}

/// Maps the `--quiet`/`--debug` flags to a level override.
///
/// `--quiet` wins over `--debug`. With neither flag `RUST_LOG` decides.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
