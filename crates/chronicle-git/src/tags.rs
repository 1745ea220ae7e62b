//! Tag operations

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use git2::Sort;
use regex::Regex;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;
use chronicle_core::error::GitError;

impl GitRepo {
    /// Get all tags
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                // Lightweight tag: dated by its commit
                let timestamp = Utc
                    .timestamp_opt(commit.time().seconds(), 0)
                    .single()
                    .unwrap_or_else(Utc::now);
                tags.push(TagInfo::new(&name, commit.id().to_string()).with_timestamp(timestamp));
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                // Annotated tag
                let Ok(target) = tag.target().and_then(|t| t.peel_to_commit()) else {
                    return true;
                };
                let mut tag_info = TagInfo::new(&name, target.id().to_string());

                if let Some(msg) = tag.message() {
                    tag_info = tag_info.with_message(msg.trim());
                }

                let seconds = match tag.tagger() {
                    Some(tagger) => {
                        if let Some(name) = tagger.name() {
                            tag_info = tag_info.with_tagger(name);
                        }
                        tagger.when().seconds()
                    }
                    None => target.time().seconds(),
                };
                let timestamp = Utc
                    .timestamp_opt(seconds, 0)
                    .single()
                    .unwrap_or_else(Utc::now);
                tags.push(tag_info.with_timestamp(timestamp));
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Get tags whose name matches a regex
    pub fn tags_matching(&self, pattern: &str) -> Result<Vec<TagInfo>> {
        let regex = Regex::new(pattern).map_err(|e| GitError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let matching = self
            .tags()?
            .into_iter()
            .filter(|t| regex.is_match(&t.name))
            .collect();

        Ok(matching)
    }

    /// Find a specific tag by name
    pub fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        Ok(self.tags()?.into_iter().find(|t| t.name == name))
    }

    /// Tags reachable from HEAD, newest first in history order.
    ///
    /// Tags sharing a commit are ordered by descending semantic version,
    /// then by name, so the highest version comes first.
    #[instrument(skip(self), fields(pattern))]
    pub fn release_tags(&self, pattern: Option<&str>) -> Result<Vec<TagInfo>> {
        let tags = match pattern {
            Some(p) => self.tags_matching(p)?,
            None => self.tags()?,
        };
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_commit: HashMap<String, Vec<TagInfo>> = HashMap::new();
        for tag in tags {
            by_commit.entry(tag.commit_hash.clone()).or_default().push(tag);
        }

        let head = self.head_commit()?;
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;

        let mut ordered = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            if let Some(mut same_commit) = by_commit.remove(&oid.to_string()) {
                same_commit.sort_by(|a, b| {
                    b.semver()
                        .cmp(&a.semver())
                        .then_with(|| a.name.cmp(&b.name))
                });
                ordered.extend(same_commit);
            }
            if by_commit.is_empty() {
                break;
            }
        }

        debug!(
            reachable = ordered.len(),
            unreachable = by_commit.len(),
            "resolved release tags"
        );
        Ok(ordered)
    }
}
