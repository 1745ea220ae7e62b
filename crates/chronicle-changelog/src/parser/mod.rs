//! Commit parsing

mod conventional;

pub use conventional::{ConventionalParser, ParsedMessage};

use crate::types::ParsedCommit;
use chronicle_git::CommitInfo;

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse a commit into a structured format.
    ///
    /// Returns `None` for messages outside the parser's grammar; such
    /// commits are left out of the changelog.
    fn parse(&self, commit: &CommitInfo) -> Option<ParsedCommit>;
}
