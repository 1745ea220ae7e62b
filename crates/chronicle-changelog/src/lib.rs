//! Chronicle Changelog - Changelog generation and merge engine
//!
//! Commit messages flow through the parser, the grouper and the release
//! resolver before being rendered by a formatter and merged into the
//! existing document.

pub mod formatter;
pub mod generator;
pub mod grouper;
pub mod merge;
pub mod parser;
pub mod release;
pub mod rules;
pub mod types;

pub use formatter::{ChangelogFormatter, MarkdownFormatter};
pub use generator::{ChangelogGenerator, ChangelogOutput};
pub use merge::{incremental_releases, merge, scan, DocumentLandmarks, LineSpan, MergeMode};
pub use parser::{CommitParser, ConventionalParser};
pub use rules::{ChangelogRules, RuleSet, RuleSetRegistry};
pub use types::{Boundary, ChangeGroup, ParsedCommit, Release, ReleaseCommits};
