// netscrub-core/src/headless.rs
//! `headless.rs`
//! Convenience wrapper for one-shot anonymization of a string, for callers that
//! do not need to keep an [`Anonymizer`] around across several files.

use anyhow::{Context, Result};

use crate::anonymizer::Anonymizer;
use crate::config::AnonymizerConfig;

/// Builds an [`Anonymizer`] from `config` and runs one `anonymize_string`.
///
/// # Arguments
///
/// * `config` - Strategy, codeword and trusted lists. Validated before use.
/// * `content` - The text to anonymize.
pub fn headless_anonymize_string(config: &AnonymizerConfig, content: &str) -> Result<String> {
    config.validate()?;
    let mut anonymizer = Anonymizer::from_config(config).context("Failed to build anonymizer")?;
    Ok(anonymizer.anonymize_string(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StrategyKind;
    use anyhow::Result;

    #[test]
    fn test_headless_codeword_is_reproducible() -> Result<()> {
        let config = AnonymizerConfig {
            codeword: Some("1".to_string()),
            hostnames: vec!["fileserver".to_string()],
            domains: vec!["test".to_string()],
            ..Default::default()
        };
        let content = "fileserver at 192.168.1.20 serves abc.test";
        let first = headless_anonymize_string(&config, content)?;
        let second = headless_anonymize_string(&config, content)?;
        assert_eq!(first, second);
        assert!(!first.contains("fileserver"));
        assert!(!first.contains("192.168.1.20"));
        assert!(first.ends_with("Dk7fzqdsb.test"));
        Ok(())
    }

    #[test]
    fn test_headless_rejects_invalid_config() {
        let config = AnonymizerConfig { strategy: StrategyKind::Codeword, ..Default::default() };
        assert!(headless_anonymize_string(&config, "10.0.0.1").is_err());
    }
}
