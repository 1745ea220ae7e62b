//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration for Chronicle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Project name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Git configuration
    pub git: GitConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,
}

/// Git configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Regex a tag name must match to count as a release boundary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_pattern: Option<String>,
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path, relative to the project root
    pub file: PathBuf,

    /// Name of the rule set that maps commit types to sections
    pub rules: String,

    /// Merge into the existing file instead of regenerating it
    pub incremental: bool,

    /// strftime format for release dates
    pub date_format: String,

    /// Explicit section order; unlisted sections follow in first-seen order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub section_order: Vec<String>,

    /// Per-type overrides on top of the rule set's mapping
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub types: BTreeMap<String, CommitTypeConfig>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            rules: "conventional_commits".to_string(),
            incremental: false,
            date_format: "%Y-%m-%d".to_string(),
            section_order: Vec::new(),
            types: BTreeMap::new(),
        }
    }
}

/// Configuration for a commit type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTypeConfig {
    /// Section key in changelog (humanized for the heading)
    pub section: String,
    /// Whether to hide this type from changelog
    #[serde(default)]
    pub hidden: bool,
}

impl CommitTypeConfig {
    /// Create a visible type mapping
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            hidden: false,
        }
    }

    /// Create a hidden type mapping
    pub fn hidden() -> Self {
        Self {
            section: String::new(),
            hidden: true,
        }
    }
}
