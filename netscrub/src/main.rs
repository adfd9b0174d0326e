// netscrub/src/main.rs
//! netscrub entry point.
//!
//! Parses the command line, folds it into the configuration and runs the
//! bundle anonymization.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use netscrub::cli::Cli;
use netscrub::commands::anonymize::{error_msg, run_anonymize, warn_msg, AnonymizeOptions};
use netscrub::logger;
use netscrub::ui::theme::{default_theme_map, ThemeMap};
use netscrub_core::{AnonymizerConfig, StrategyKind};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));
    log::info!("netscrub started. Version: {}", env!("CARGO_PKG_VERSION"));

    let theme = default_theme_map();
    match run(cli, &theme) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error_msg(format!("{:#}", e), &theme);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, theme: &ThemeMap) -> Result<()> {
    let base = match &cli.config {
        Some(path) => AnonymizerConfig::load_from_file(path)?,
        None => AnonymizerConfig::default(),
    };
    let config = base.merge_cli(
        cli.strategy.map(StrategyKind::from),
        cli.codeword,
        cli.hostnames,
        cli.domains,
    );
    if config.strategy == StrategyKind::Random && !config.domains.is_empty() && !cli.quiet {
        warn_msg("The random strategy leaves domain names unchanged.", theme);
    }

    let opts = AnonymizeOptions {
        input: cli.input,
        output: cli.output,
        report_json: cli.report_json,
        quiet: cli.quiet,
    };
    run_anonymize(&config, opts, theme)?;
    Ok(())
}
