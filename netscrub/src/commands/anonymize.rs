// netscrub/src/commands/anonymize.rs
//! The bundle anonymization command.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use netscrub_core::{Anonymizer, AnonymizerConfig};

use crate::ui::output_format;
use crate::ui::substitution_summary;
use crate::ui::theme::ThemeMap;
use crate::utils::archive::{filter_zip, output_filename, ANONYMIZED_SUFFIX};

/// Options for [`run_anonymize`].
#[derive(Debug, Clone)]
pub struct AnonymizeOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
    pub quiet: bool,
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing success messages to stderr.
pub fn success_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Anonymizes one bundle and prints the substitution summary to stdout.
///
/// Registered hostnames are listed in the summary even when they never
/// occurred. Returns the path of the written archive.
pub fn run_anonymize(config: &AnonymizerConfig, opts: AnonymizeOptions, theme: &ThemeMap) -> Result<PathBuf> {
    info!("Starting anonymize operation.");
    config.validate()?;

    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| output_filename(&opts.input, ANONYMIZED_SUFFIX));
    if output == opts.input {
        bail!("Output path {} is the same as the input path.", output.display());
    }

    let mut anonymizer = Anonymizer::from_config(config).context("Failed to build anonymizer")?;
    for hostname in &config.hostnames {
        anonymizer.ledger_mut().set(hostname, "", 0);
    }
    debug!("{:?}", anonymizer);

    if !opts.quiet {
        if !config.hostnames.is_empty() {
            info_msg(format!("Hostnames list: {}", config.hostnames.join(", ")), theme);
        }
        info_msg(format!("Processing {}...", opts.input.display()), theme);
    }

    let entries = filter_zip(&mut anonymizer, &opts.input, &output)?;
    if !opts.quiet {
        success_msg(format!("Done! {} file(s) anonymized.", entries), theme);
    }

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let supports_color = stdout.is_terminal();
    substitution_summary::print_summary(anonymizer.ledger(), &mut writer, theme, supports_color)
        .context("Failed to print substitution summary")?;
    writeln!(writer, "Output file: {}", output.display())?;

    if let Some(report_path) = &opts.report_json {
        let json = serde_json::to_string_pretty(anonymizer.ledger()).context("Failed to serialize ledger")?;
        fs::write(report_path, json)
            .with_context(|| format!("Failed to write report file {}", report_path.display()))?;
        info!("Substitution report written to {}.", report_path.display());
    }

    info!(
        "Anonymize operation completed: {} distinct value(s), {} substitution(s).",
        anonymizer.ledger().len(),
        anonymizer.ledger().total_substitutions()
    );
    Ok(output)
}
