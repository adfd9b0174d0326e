// netscrub-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use netscrub_core::{headless_anonymize_string, AnonymizerConfig, StrategyKind};

fn write_config(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_load_full_config_from_yaml() -> Result<()> {
    let file = write_config(
        r#"
strategy: codeword
codeword: "1"
hostnames:
  - fileserver
  - printer01
domains:
  - test
  - corp.example
"#,
    )?;
    let config = AnonymizerConfig::load_from_file(file.path())?;
    assert_eq!(config.strategy, StrategyKind::Codeword);
    assert_eq!(config.codeword.as_deref(), Some("1"));
    assert_eq!(config.hostnames, vec!["fileserver", "printer01"]);
    assert_eq!(config.domains, vec!["test", "corp.example"]);
    config.validate()?;

    let out = headless_anonymize_string(&config, "abc.test")?;
    assert_eq!(out, "Dk7fzqdsb.test");
    Ok(())
}

#[test]
fn test_partial_yaml_uses_defaults() -> Result<()> {
    let file = write_config("strategy: random\nseed: 11\n")?;
    let config = AnonymizerConfig::load_from_file(file.path())?;
    assert_eq!(config.strategy, StrategyKind::Random);
    assert_eq!(config.seed, Some(11));
    assert!(config.codeword.is_none());
    assert!(config.hostnames.is_empty());
    config.validate()?;
    Ok(())
}

#[test]
fn test_cli_values_extend_file_values() -> Result<()> {
    let file = write_config("hostnames: [db01]\ndomains: [corp.example]\n")?;
    let config = AnonymizerConfig::load_from_file(file.path())?.merge_cli(
        None,
        Some("from-cli".to_string()),
        vec!["web01".to_string()],
        vec![],
    );
    assert_eq!(config.strategy, StrategyKind::Codeword);
    assert_eq!(config.hostnames, vec!["db01", "web01"]);
    config.validate()?;
    Ok(())
}

#[test]
fn test_malformed_yaml_reports_path() -> Result<()> {
    let file = write_config("hostnames: [unterminated\n")?;
    let err = AnonymizerConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let err = AnonymizerConfig::load_from_file("/nonexistent/netscrub.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
