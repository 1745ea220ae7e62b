//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::Release;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format one release block
    fn format_release(&self, release: &Release) -> String;

    /// Format releases in order, one block after another
    fn format(&self, releases: &[Release]) -> String {
        releases.iter().map(|r| self.format_release(r)).collect()
    }

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
