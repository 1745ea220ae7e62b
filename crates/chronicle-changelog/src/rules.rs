//! Commit type to changelog section rules
//!
//! A rule set is plain data: a mapping from commit type to section key and
//! an optional explicit section order. Rule sets that cannot drive a
//! changelog carry no mapping at all.

use std::collections::HashMap;

use tracing::debug;

use chronicle_core::config::ChangelogConfig;
use chronicle_core::error::{ChangelogError, ConfigError, Result};

/// Name of the default rule set
pub const CONVENTIONAL_COMMITS: &str = "conventional_commits";

/// Type-to-section table used by the grouper
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogRules {
    /// Commit type to section key; unmapped types are left out
    pub type_to_section: HashMap<String, String>,
    /// Section keys rendered first, in this order
    pub section_order: Vec<String>,
}

impl ChangelogRules {
    /// Create rules from `(type, section)` pairs
    pub fn new<I, T, S>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (T, S)>,
        T: Into<String>,
        S: Into<String>,
    {
        Self {
            type_to_section: mapping
                .into_iter()
                .map(|(t, s)| (t.into(), s.into()))
                .collect(),
            section_order: Vec::new(),
        }
    }

    /// Set the explicit section order
    pub fn with_section_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Rules of the conventional commits rule set
    pub fn conventional() -> Self {
        Self::new([
            ("feat", "feat"),
            ("fix", "fix"),
            ("refactor", "refactor"),
            ("perf", "perf"),
        ])
    }

    /// Section key a commit type maps to
    pub fn section_for(&self, commit_type: &str) -> Option<&str> {
        self.type_to_section.get(commit_type).map(String::as_str)
    }

    /// Resolve the rules for a run from a rule set name and configuration.
    ///
    /// Configured type overrides are applied on top of the rule set's
    /// mapping; a non-empty configured section order replaces its order.
    pub fn resolve(
        name: &str,
        config: &ChangelogConfig,
        registry: &RuleSetRegistry,
    ) -> Result<Self> {
        let rule_set = registry.get(name).ok_or_else(|| ConfigError::InvalidValue {
            field: "changelog.rules".to_string(),
            message: format!(
                "unknown rule set '{}', expected one of: {}",
                name,
                registry.names().join(", ")
            ),
        })?;

        let mut rules = rule_set
            .changelog
            .clone()
            .ok_or_else(|| ChangelogError::UnsupportedRuleSet(name.to_string()))?;

        for (commit_type, type_config) in &config.types {
            if type_config.hidden {
                rules.type_to_section.remove(commit_type);
            } else {
                rules
                    .type_to_section
                    .insert(commit_type.clone(), type_config.section.clone());
            }
        }

        if !config.section_order.is_empty() {
            rules.section_order = config.section_order.clone();
        }

        debug!(
            rule_set = name,
            types = rules.type_to_section.len(),
            ordered_sections = rules.section_order.len(),
            "changelog rules resolved"
        );
        Ok(rules)
    }
}

/// A named rule set
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Rule set name
    pub name: String,
    /// Changelog rules; `None` when the rule set cannot produce a changelog
    pub changelog: Option<ChangelogRules>,
}

impl RuleSet {
    /// A rule set that supports changelog generation
    pub fn with_changelog(name: impl Into<String>, rules: ChangelogRules) -> Self {
        Self {
            name: name.into(),
            changelog: Some(rules),
        }
    }

    /// A rule set without changelog support
    pub fn without_changelog(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            changelog: None,
        }
    }
}

/// Registry of available rule sets
pub struct RuleSetRegistry {
    rule_sets: Vec<RuleSet>,
}

impl RuleSetRegistry {
    /// Create a new registry with all built-in rule sets
    pub fn new() -> Self {
        Self {
            rule_sets: vec![
                RuleSet::with_changelog(CONVENTIONAL_COMMITS, ChangelogRules::conventional()),
                RuleSet::without_changelog("jira"),
            ],
        }
    }

    /// Register a rule set, replacing one with the same name
    pub fn register(&mut self, rule_set: RuleSet) {
        self.rule_sets.retain(|r| r.name != rule_set.name);
        self.rule_sets.push(rule_set);
    }

    /// Get a rule set by name
    pub fn get(&self, name: &str) -> Option<&RuleSet> {
        self.rule_sets.iter().find(|r| r.name == name)
    }

    /// Names of all registered rule sets
    pub fn names(&self) -> Vec<&str> {
        self.rule_sets.iter().map(|r| r.name.as_str()).collect()
    }
}

impl Default for RuleSetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
