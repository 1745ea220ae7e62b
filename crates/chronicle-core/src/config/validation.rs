//! Configuration validation

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_git(config)?;
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if let Some(pattern) = &config.git.tag_pattern {
        if let Err(e) = Regex::new(pattern) {
            return Err(ConfigError::InvalidValue {
                field: "git.tag_pattern".to_string(),
                message: e.to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    let changelog = &config.changelog;

    if changelog.file.as_os_str().is_empty() {
        return Err(invalid("changelog.file", "file cannot be empty"));
    }

    if changelog.rules.trim().is_empty() {
        return Err(invalid("changelog.rules", "rule set name cannot be empty"));
    }

    if changelog.date_format.is_empty() {
        return Err(invalid("changelog.date_format", "date format cannot be empty"));
    }

    let mut seen = HashSet::new();
    for section in &changelog.section_order {
        if !seen.insert(section.as_str()) {
            return Err(invalid(
                "changelog.section_order",
                &format!("duplicate section '{}'", section),
            ));
        }
    }

    for (commit_type, type_config) in &changelog.types {
        if !type_config.hidden && type_config.section.trim().is_empty() {
            return Err(invalid(
                &format!("changelog.types.{}.section", commit_type),
                "section cannot be empty",
            ));
        }
    }

    Ok(())
}

fn invalid(field: &str, message: &str) -> crate::error::ChronicleError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommitTypeConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_tag_pattern() {
        let mut config = Config::default();
        config.git.tag_pattern = Some("v[".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_duplicate_section_order() {
        let mut config = Config::default();
        config.changelog.section_order = vec!["feat".to_string(), "feat".to_string()];
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("duplicate section 'feat'"));
    }

    #[test]
    fn test_empty_section_rejected_unless_hidden() {
        let mut config = Config::default();
        config
            .changelog
            .types
            .insert("docs".to_string(), CommitTypeConfig::new(""));
        assert!(validate_config(&config).is_err());

        config
            .changelog
            .types
            .insert("docs".to_string(), CommitTypeConfig::hidden());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_rules_rejected() {
        let mut config = Config::default();
        config.changelog.rules = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }
}
