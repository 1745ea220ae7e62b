//! Default configuration values

use super::types::Config;

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "chronicle.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "chronicle.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".chronicle.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ALT_CONFIG_FILE,
        ".chronicle.toml",
    ]
}

/// Generate default configuration TOML
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TOML_TEMPLATE.to_string())
}

/// Default configuration template (YAML)
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Chronicle Configuration

# git:
#   # Only tags matching this regex become release boundaries
#   tag_pattern: "^v?\\d+\\.\\d+\\.\\d+"

changelog:
  file: CHANGELOG.md
  rules: conventional_commits
  incremental: false
  date_format: "%Y-%m-%d"
  # section_order: [feat, fix]
  # types:
  #   docs:
  #     section: docs
  #   perf:
  #     section: perf
  #     hidden: true
"#;

/// Fallback TOML template
const DEFAULT_CONFIG_TOML_TEMPLATE: &str = r#"[git]

[changelog]
file = "CHANGELOG.md"
rules = "conventional_commits"
incremental = false
date_format = "%Y-%m-%d"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        let defaults = Config::default();
        assert_eq!(config.changelog.file, defaults.changelog.file);
        assert_eq!(config.changelog.rules, defaults.changelog.rules);
        assert_eq!(config.changelog.date_format, defaults.changelog.date_format);
    }

    #[test]
    fn test_default_toml_round_trips() {
        let config: Config = toml::from_str(&default_config_toml()).unwrap();
        assert_eq!(config.changelog.rules, "conventional_commits");
    }
}
