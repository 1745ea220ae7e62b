//! Changelog generation

use serde::Serialize;
use tracing::{debug, info, instrument};

use chronicle_git::CommitInfo;

use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::grouper;
use crate::merge::{self, MergeMode};
use crate::parser::{CommitParser, ConventionalParser};
use crate::release;
use crate::rules::ChangelogRules;
use crate::types::{Boundary, ParsedCommit, Release};

/// Result of a generation run
#[derive(Debug, Clone, Serialize)]
pub struct ChangelogOutput {
    /// Freshly rendered releases
    pub content: String,
    /// The document to persist
    pub document: String,
    /// Releases that were rendered
    pub releases: Vec<Release>,
}

/// Changelog generator
pub struct ChangelogGenerator {
    parser: Box<dyn CommitParser>,
    formatter: Box<dyn ChangelogFormatter>,
    rules: ChangelogRules,
}

impl ChangelogGenerator {
    /// Create a new generator with default parser and formatter
    pub fn new(rules: ChangelogRules) -> Self {
        Self {
            parser: Box::new(ConventionalParser::new()),
            formatter: Box::new(MarkdownFormatter::new()),
            rules,
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Use the markdown formatter with a custom date format
    pub fn with_date_format(self, format: impl Into<String>) -> Self {
        self.with_formatter(MarkdownFormatter::new().with_date_format(format))
    }

    /// Partition, parse and group commits into releases, Unreleased first
    #[instrument(skip_all, fields(commits = commits.len(), boundaries = boundaries.len()))]
    pub fn releases(&self, commits: &[CommitInfo], boundaries: &[Boundary]) -> Vec<Release> {
        release::resolve(commits, boundaries)
            .into_iter()
            .map(|partition| {
                let parsed: Vec<ParsedCommit> = partition
                    .commits
                    .iter()
                    .filter_map(|c| self.parser.parse(c))
                    .collect();
                debug!(
                    version = ?partition.version,
                    commits = partition.commits.len(),
                    parsed = parsed.len(),
                    "release parsed"
                );
                Release {
                    groups: grouper::group(&parsed, &self.rules),
                    version: partition.version,
                    tag: partition.tag,
                    date: partition.date,
                }
            })
            .collect()
    }

    /// Render releases in order
    pub fn render(&self, releases: &[Release]) -> String {
        self.formatter.format(releases)
    }

    /// Run the whole pipeline and merge the result into `existing`
    #[instrument(skip_all, fields(commits = commits.len(), mode = ?mode))]
    pub fn generate(
        &self,
        commits: &[CommitInfo],
        boundaries: &[Boundary],
        existing: Option<&str>,
        mode: MergeMode,
    ) -> ChangelogOutput {
        let all = self.releases(commits, boundaries);

        let releases = match (existing, mode) {
            (Some(document), MergeMode::Incremental) => {
                let landmarks = merge::scan(document);
                merge::incremental_releases(&all, &landmarks).to_vec()
            }
            _ => all,
        };

        let content = self.render(&releases);
        let document = merge::merge(&content, existing, mode);

        info!(
            releases = releases.len(),
            content_len = content.len(),
            document_len = document.len(),
            "changelog generated"
        );

        ChangelogOutput {
            content,
            document,
            releases,
        }
    }
}
