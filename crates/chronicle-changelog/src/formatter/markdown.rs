//! Markdown changelog formatter
//!
//! Every release renders as
//!
//! ```text
//! \n## <heading>\n
//! \n### <Section>\n\n- <entry>\n- <entry>\n
//! ```
//!
//! The merge engine relies on these exact blank lines to find and replace
//! an earlier Unreleased block.

use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::Release;

/// Title of the synthetic release
pub const UNRELEASED: &str = "Unreleased";

/// Markdown changelog formatter
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    /// strftime format for release dates
    pub date_format: String,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
        }
    }

    /// Set the date format
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    fn heading(&self, release: &Release) -> String {
        let title = release.version.as_deref().unwrap_or(UNRELEASED);
        let date = release
            .date
            .map(|d| format!("({})", d.format(&self.date_format)))
            .unwrap_or_default();
        format!("{} {}", title, date)
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, release), fields(version = ?release.version, groups = release.groups.len()))]
    fn format_release(&self, release: &Release) -> String {
        let mut output = format!("\n## {}\n", self.heading(release));

        for group in &release.groups {
            output.push_str(&format!("\n### {}\n\n", group.title));
            for entry in &group.entries {
                output.push_str(&format!("- {}\n", entry));
            }
        }

        debug!(output_len = output.len(), "markdown release formatted");
        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangeGroup;
    use chrono::NaiveDate;

    fn group(title: &str, entries: &[&str]) -> ChangeGroup {
        ChangeGroup {
            title: title.to_string(),
            entries: entries.iter().map(|e| e.to_string()).collect(),
        }
    }

    fn unreleased(groups: Vec<ChangeGroup>) -> Release {
        Release {
            version: None,
            tag: None,
            date: None,
            groups,
        }
    }

    #[test]
    fn test_format_unreleased() {
        let release = unreleased(vec![group("Feat", &["after 0.2", "after 0.2.0"])]);
        assert_eq!(
            MarkdownFormatter::new().format_release(&release),
            "\n## Unreleased \n\n### Feat\n\n- after 0.2\n- after 0.2.0\n"
        );
    }

    #[test]
    fn test_format_multiple_groups() {
        let release = unreleased(vec![
            group("Refactor", &["is in changelog"]),
            group("Feat", &["new file"]),
        ]);
        assert_eq!(
            MarkdownFormatter::new().format_release(&release),
            "\n## Unreleased \n\n### Refactor\n\n- is in changelog\n\n### Feat\n\n- new file\n"
        );
    }

    #[test]
    fn test_format_closed_release() {
        let release = Release {
            version: Some("0.2.0".to_string()),
            tag: Some("0.2.0".to_string()),
            date: NaiveDate::from_ymd_opt(2020, 4, 22),
            groups: vec![group("Fix", &["output glitch"])],
        };
        assert_eq!(
            MarkdownFormatter::new().format_release(&release),
            "\n## 0.2.0 (2020-04-22)\n\n### Fix\n\n- output glitch\n"
        );
    }

    #[test]
    fn test_custom_date_format() {
        let release = Release {
            version: Some("1.0.0".to_string()),
            tag: Some("1.0.0".to_string()),
            date: NaiveDate::from_ymd_opt(2020, 4, 22),
            groups: vec![],
        };
        let formatter = MarkdownFormatter::new().with_date_format("%d/%m/%Y");
        assert_eq!(formatter.format_release(&release), "\n## 1.0.0 (22/04/2020)\n");
    }

    #[test]
    fn test_empty_release_renders_heading_only() {
        assert_eq!(
            MarkdownFormatter::new().format_release(&unreleased(vec![])),
            "\n## Unreleased \n"
        );
    }

    #[test]
    fn test_format_concatenates_releases() {
        let releases = vec![
            unreleased(vec![group("Feat", &["add more stuff"])]),
            Release {
                version: Some("0.2.0".to_string()),
                tag: Some("0.2.0".to_string()),
                date: NaiveDate::from_ymd_opt(2020, 4, 22),
                groups: vec![group("Fix", &["output glitch"])],
            },
        ];
        assert_eq!(
            MarkdownFormatter::new().format(&releases),
            "\n## Unreleased \n\n### Feat\n\n- add more stuff\n\n## 0.2.0 (2020-04-22)\n\n### Fix\n\n- output glitch\n"
        );
    }
}
