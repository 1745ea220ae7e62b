//! Incremental merge of freshly rendered content into an existing document
//!
//! The document is never parsed into a tree. A single top to bottom scan
//! finds the Unreleased block and the first release heading, and the merge
//! splices new content around them so every other byte stays put.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::release;
use crate::types::Release;

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\d+\.\d+\.\d+(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?",
    )
    .expect("Invalid regex")
});

// A release heading title opens with a version or an ISO date, optionally
// behind `[` or `v`
static RELEASE_TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[?v?(?:\d+\.\d+\.\d+|\d{4}-\d{2}-\d{2})").expect("Invalid regex")
});

/// How generated content is combined with an existing document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Replace the whole document
    #[default]
    Full,
    /// Splice new content into the existing document
    Incremental,
}

/// Half-open range of line indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// First line
    pub start: usize,
    /// One past the last line
    pub end: usize,
}

/// What a scan of an existing document found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentLandmarks {
    /// Lines owned by the Unreleased block, heading included
    pub unreleased: Option<LineSpan>,
    /// Line of the first release heading
    pub release_heading: Option<usize>,
    /// Version named by the first release heading
    pub latest_version: Option<String>,
}

struct Heading<'a> {
    level: usize,
    /// Text after the `#` marker
    title: &'a str,
}

fn heading(line: &str) -> Option<Heading<'_>> {
    let text = line.trim();
    let level = text.chars().take_while(|c| *c == '#').count();
    (level > 0).then(|| Heading {
        level,
        title: text[level..].trim_start(),
    })
}

fn is_unreleased_heading(title: &str) -> bool {
    title.to_lowercase().contains("unreleased")
}

fn is_release_heading(title: &str) -> bool {
    RELEASE_TITLE_REGEX.is_match(title)
}

/// Scan a document for its Unreleased block and first release heading
#[instrument(skip_all, fields(len = document.len()))]
pub fn scan(document: &str) -> DocumentLandmarks {
    let mut landmarks = DocumentLandmarks::default();
    // (start line, heading level) of an Unreleased block still open
    let mut open: Option<(usize, usize)> = None;

    for (index, line) in document.split_inclusive('\n').enumerate() {
        let Some(heading) = heading(line) else {
            continue;
        };

        if let Some((start, level)) = open {
            // Deeper headings belong to the Unreleased block
            if heading.level > level {
                continue;
            }
            landmarks.unreleased = Some(LineSpan { start, end: index });
            open = None;
        }

        if landmarks.unreleased.is_none() && is_unreleased_heading(heading.title) {
            open = Some((index, heading.level));
            continue;
        }

        if is_release_heading(heading.title) {
            landmarks.release_heading = Some(index);
            landmarks.latest_version = VERSION_REGEX
                .find(heading.title)
                .map(|m| m.as_str().to_string());
            break;
        }
    }

    if let Some((start, _)) = open {
        landmarks.unreleased = Some(LineSpan {
            start,
            end: document.split_inclusive('\n').count(),
        });
    }

    debug!(?landmarks, "document scanned");
    landmarks
}

/// Releases an incremental run renders into a scanned document
pub fn incremental_releases<'a>(
    releases: &'a [Release],
    landmarks: &DocumentLandmarks,
) -> &'a [Release] {
    release::newer_than(releases, landmarks.latest_version.as_deref())
}

/// Merge freshly rendered content into an existing document.
///
/// In full mode, or without a document, the new content is the result.
/// Otherwise the Unreleased block is replaced in place; without one the
/// content goes right before the first release heading, or at the end.
#[instrument(skip_all, fields(mode = ?mode, has_existing = existing.is_some()))]
pub fn merge(new_content: &str, existing: Option<&str>, mode: MergeMode) -> String {
    let document = match (existing, mode) {
        (Some(document), MergeMode::Incremental) => document,
        _ => return new_content.to_string(),
    };

    let landmarks = scan(document);
    let lines: Vec<&str> = document.split_inclusive('\n').collect();

    let (before, after) = match (landmarks.unreleased, landmarks.release_heading) {
        (Some(span), _) => (&lines[..span.start], &lines[span.end..]),
        (None, Some(index)) => (&lines[..index], &lines[index..]),
        (None, None) => {
            debug!("no landmarks, appending");
            return format!("{}{}", document, new_content);
        }
    };

    let mut merged = before.concat();
    merged.push_str(new_content);
    if !after.is_empty() {
        merged.push('\n');
        merged.push_str(&after.concat());
    }
    merged
}
