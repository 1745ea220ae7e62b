//! Changelog types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use chronicle_git::{CommitInfo, TagInfo};

/// A parsed commit from conventional commit format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommit {
    /// Original commit hash
    pub hash: String,
    /// Commit type (feat, fix, etc.)
    pub commit_type: String,
    /// Scope (optional, in parentheses)
    pub scope: Option<String>,
    /// Whether this is a breaking change
    pub breaking: bool,
    /// Commit description
    pub description: String,
    /// Commit body
    pub body: Option<String>,
    /// Footer fields
    pub footers: Vec<Footer>,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

impl ParsedCommit {
    /// The line this commit contributes to its changelog section
    pub fn entry(&self) -> String {
        match &self.scope {
            Some(scope) => format!("**{}**: {}", scope, self.description),
            None => self.description.clone(),
        }
    }
}

/// A footer field from a conventional commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    /// Footer token (e.g., "BREAKING CHANGE", "Fixes", "Refs")
    pub token: String,
    /// Footer value
    pub value: String,
}

/// A section of one release: commits of the types mapped to one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeGroup {
    /// Section title
    pub title: String,
    /// Rendered entries, in grouping order
    pub entries: Vec<String>,
}

impl ChangeGroup {
    /// Create a new, empty group
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Add an entry to the group
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Check if group is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A release boundary: the tag that closes a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundary {
    /// Tag name
    pub tag: String,
    /// Commit the tag points at
    pub hash: String,
    /// Release date
    pub date: Option<NaiveDate>,
}

impl Boundary {
    /// Create a new boundary
    pub fn new(tag: impl Into<String>, hash: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            tag: tag.into(),
            hash: hash.into(),
            date,
        }
    }

    /// Whether a version recorded in a document names this boundary
    pub fn matches_version(&self, version: &str) -> bool {
        tag_matches_version(&self.tag, version)
    }
}

pub(crate) fn tag_matches_version(tag: &str, version: &str) -> bool {
    tag == version || tag.strip_prefix('v') == Some(version)
}

impl From<&TagInfo> for Boundary {
    fn from(tag: &TagInfo) -> Self {
        Self::new(&tag.name, &tag.commit_hash, tag.date())
    }
}

/// The commits of one release, before classification
#[derive(Debug, Clone)]
pub struct ReleaseCommits {
    /// Version; `None` for the synthetic Unreleased release
    pub version: Option<String>,
    /// Tag closing the release
    pub tag: Option<String>,
    /// Release date
    pub date: Option<NaiveDate>,
    /// Commits, newest first
    pub commits: Vec<CommitInfo>,
}

impl ReleaseCommits {
    /// The synthetic Unreleased release
    pub fn unreleased() -> Self {
        Self {
            version: None,
            tag: None,
            date: None,
            commits: Vec::new(),
        }
    }

    /// A release closed by `boundary`
    pub fn closed(boundary: &Boundary) -> Self {
        Self {
            version: Some(boundary.tag.clone()),
            tag: Some(boundary.tag.clone()),
            date: boundary.date,
            commits: Vec::new(),
        }
    }
}

/// A classified release, ready to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Version; `None` for the synthetic Unreleased release
    pub version: Option<String>,
    /// Tag closing the release
    pub tag: Option<String>,
    /// Release date
    pub date: Option<NaiveDate>,
    /// Non-empty groups in section order
    pub groups: Vec<ChangeGroup>,
}

impl Release {
    /// Whether this is the synthetic Unreleased release
    pub fn is_unreleased(&self) -> bool {
        self.version.is_none()
    }

    /// Check if release has any content
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(scope: Option<&str>) -> ParsedCommit {
        ParsedCommit {
            hash: "abc123".to_string(),
            commit_type: "feat".to_string(),
            scope: scope.map(str::to_string),
            breaking: false,
            description: "add feature".to_string(),
            body: None,
            footers: vec![],
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_entry_with_and_without_scope() {
        assert_eq!(parsed(None).entry(), "add feature");
        assert_eq!(parsed(Some("api")).entry(), "**api**: add feature");
    }

    #[test]
    fn test_change_group() {
        let mut group = ChangeGroup::new("Feat");
        assert!(group.is_empty());
        group.push("add feature");
        group.push("add feature");
        assert_eq!(group.entries.len(), 2);
    }

    #[test]
    fn test_boundary_matches_version() {
        let boundary = Boundary::new("v1.0.0", "abc", None);
        assert!(boundary.matches_version("1.0.0"));
        assert!(boundary.matches_version("v1.0.0"));
        assert!(!boundary.matches_version("1.0.1"));
    }

    #[test]
    fn test_boundary_from_tag() {
        let tag = TagInfo::new("0.2.0", "abc").with_timestamp(
            "2020-04-22T10:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        );
        let boundary = Boundary::from(&tag);
        assert_eq!(boundary.tag, "0.2.0");
        assert_eq!(boundary.date, NaiveDate::from_ymd_opt(2020, 4, 22));
    }

    #[test]
    fn test_release_serializes_to_json() {
        let release = Release {
            version: None,
            tag: None,
            date: None,
            groups: vec![ChangeGroup {
                title: "Feat".to_string(),
                entries: vec!["new file".to_string()],
            }],
        };
        let json = serde_json::to_value(&release).unwrap();
        assert_eq!(json["groups"][0]["entries"][0], "new file");
        assert!(release.is_unreleased());
    }
}
