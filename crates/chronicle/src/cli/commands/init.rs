//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use chronicle_core::config::{
    default_config_toml, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};

use crate::cli::{output, Cli};

/// Initialize a new Chronicle configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Write TOML instead of YAML
    #[arg(long)]
    pub toml: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    fn file_name(self) -> &'static str {
        match self {
            ConfigFormat::Yaml => DEFAULT_CONFIG_YAML,
            ConfigFormat::Toml => DEFAULT_CONFIG_TOML,
        }
    }

    fn content(self) -> String {
        match self {
            ConfigFormat::Yaml => DEFAULT_CONFIG_TEMPLATE.to_string(),
            ConfigFormat::Toml => default_config_toml(),
        }
    }
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, toml = self.toml, "executing init command");
        let root = cli.root()?;

        let wants_toml = self.toml
            || self
                .output
                .as_ref()
                .is_some_and(|p| p.extension().is_some_and(|e| e == "toml"));

        let format = if wants_toml {
            ConfigFormat::Toml
        } else if self.yes || self.force || self.output.is_some() {
            ConfigFormat::Yaml
        } else {
            let formats = ["yaml", "toml"];
            let selection = Select::new()
                .with_prompt("Configuration format")
                .items(&formats)
                .default(0)
                .interact()?;
            if selection == 1 {
                ConfigFormat::Toml
            } else {
                ConfigFormat::Yaml
            }
        };

        let config_path = self.target(&root, format);

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                output::warning("Aborted.");
                return Ok(());
            }
        }

        self.write(&config_path, format)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to pick your changelog rules", config_path.display());
            println!(
                "  2. Run {} to preview the changelog",
                style("chronicle changelog --dry-run").cyan()
            );
        }

        Ok(())
    }

    fn target(&self, root: &Path, format: ConfigFormat) -> PathBuf {
        match &self.output {
            Some(path) => root.join(path),
            None => root.join(format.file_name()),
        }
    }

    fn write(&self, path: &Path, format: ConfigFormat) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, format.content())?;
        info!(path = %path.display(), ?format, "configuration written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_core::config::{load_config, Config};
    use clap::Parser;
    use tempfile::TempDir;

    fn init(args: &[&str], root: &Path) -> anyhow::Result<()> {
        let mut argv = vec!["chronicle", "-q", "-C", root.to_str().unwrap(), "init"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().execute()
    }

    #[test]
    fn test_init_yaml_loads_as_defaults() {
        let temp = TempDir::new().unwrap();
        init(&["--yes"], temp.path()).unwrap();

        let config = load_config(&temp.path().join(DEFAULT_CONFIG_YAML)).unwrap();
        let defaults = Config::default();
        assert_eq!(config.changelog.file, defaults.changelog.file);
        assert_eq!(config.changelog.rules, defaults.changelog.rules);
    }

    #[test]
    fn test_init_toml() {
        let temp = TempDir::new().unwrap();
        init(&["--yes", "--toml"], temp.path()).unwrap();

        let config = load_config(&temp.path().join(DEFAULT_CONFIG_TOML)).unwrap();
        assert_eq!(config.changelog.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_YAML);
        std::fs::write(&path, "custom: true\n").unwrap();

        assert!(init(&["--yes"], temp.path()).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "custom: true\n");

        init(&["--force"], temp.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn test_init_custom_output() {
        let temp = TempDir::new().unwrap();
        init(&["--output", ".github/chronicle.toml"], temp.path()).unwrap();
        let config = load_config(&temp.path().join(".github/chronicle.toml")).unwrap();
        assert_eq!(config.changelog.rules, "conventional_commits");
    }
}
