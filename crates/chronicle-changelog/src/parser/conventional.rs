//! Conventional Commits parser
//!
//! Parses commits following the Conventional Commits specification:
//! https://www.conventionalcommits.org/

use regex::Regex;
use std::sync::LazyLock;

use super::CommitParser;
use crate::types::{Footer, ParsedCommit};
use chronicle_git::CommitInfo;

/// Header grammar: `type[(scope)][!]: subject`
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>[a-z][a-z0-9_-]*)(?:\((?P<scope>[^()\r\n]*)\))?(?P<breaking>!)?: (?P<description>.+)$",
    )
    .expect("Invalid regex")
});

/// Regex for parsing footer lines
static FOOTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<token>BREAKING CHANGE|[A-Za-z-]+): (?P<value>.+)$").expect("Invalid regex")
});

/// Parser for Conventional Commits format
#[derive(Debug, Default, Clone, Copy)]
pub struct ConventionalParser;

/// Structured content of one commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    pub commit_type: String,
    pub scope: Option<String>,
    pub breaking: bool,
    pub description: String,
    pub body: Option<String>,
    pub footers: Vec<Footer>,
}

impl ConventionalParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a full commit message (header line plus optional body)
    pub fn parse_message(&self, raw: &str) -> Option<ParsedMessage> {
        let (header, rest) = match raw.split_once('\n') {
            Some((header, rest)) => (header, Some(rest)),
            None => (raw, None),
        };

        let caps = HEADER_REGEX.captures(header.trim_end())?;

        let commit_type = caps.name("type")?.as_str().to_string();
        let scope = caps
            .name("scope")
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let breaking_marker = caps.name("breaking").is_some();
        let description = caps.name("description")?.as_str().trim().to_string();
        if description.is_empty() {
            return None;
        }

        let (body, footers) = match rest.map(str::trim).filter(|b| !b.is_empty()) {
            Some(body) => parse_body(body),
            None => (None, Vec::new()),
        };

        let breaking_in_body = rest.is_some_and(|body| {
            body.lines().any(|line| {
                line.starts_with("BREAKING CHANGE:") || line.starts_with("BREAKING-CHANGE:")
            })
        });

        Some(ParsedMessage {
            commit_type,
            scope,
            breaking: breaking_marker || breaking_in_body,
            description,
            body,
            footers,
        })
    }
}

/// Split the body into free text and trailing footers
fn parse_body(body: &str) -> (Option<String>, Vec<Footer>) {
    let mut footers: Vec<Footer> = Vec::new();
    let mut body_lines = Vec::new();
    let mut in_footer = false;

    for line in body.lines() {
        if let Some(caps) = FOOTER_REGEX.captures(line) {
            in_footer = true;
            let token = caps.name("token").map_or("", |m| m.as_str());
            let value = caps.name("value").map_or("", |m| m.as_str());
            footers.push(Footer {
                token: token.to_string(),
                value: value.to_string(),
            });
        } else if in_footer && line.starts_with(' ') {
            // Continuation of previous footer
            if let Some(last) = footers.last_mut() {
                last.value.push('\n');
                last.value.push_str(line.trim());
            }
        } else if !in_footer {
            body_lines.push(line);
        }
    }

    let text = body_lines.join("\n").trim().to_string();
    let body_text = if text.is_empty() { None } else { Some(text) };

    (body_text, footers)
}

impl CommitParser for ConventionalParser {
    fn parse(&self, commit: &CommitInfo) -> Option<ParsedCommit> {
        let parsed = self.parse_message(&commit.full_message())?;

        Some(ParsedCommit {
            hash: commit.hash.clone(),
            commit_type: parsed.commit_type,
            scope: parsed.scope,
            breaking: parsed.breaking,
            description: parsed.description,
            body: parsed.body,
            footers: parsed.footers,
            timestamp: commit.timestamp,
        })
    }
}
