//! Commit history operations

use chrono::{TimeZone, Utc};
use git2::{Oid, Sort};
use tracing::{debug, instrument};

use chronicle_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::{split_message, CommitInfo};

impl GitRepo {
    /// Get commits reachable from HEAD but not from `since`, newest first.
    ///
    /// `since` is any revspec git understands: a tag, a branch or a hash.
    #[instrument(skip(self))]
    pub fn commits_since(&self, since: &str) -> Result<Vec<CommitInfo>> {
        let object = self.repo.revparse_single(since).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RevisionNotFound(since.to_string())
            } else {
                GitError::Git2(e)
            }
        })?;
        let since_commit = object.peel_to_commit()?;
        self.walk(Some(since_commit.id()))
    }

    /// Get all commits on the current branch, newest first
    #[instrument(skip(self))]
    pub fn all_commits(&self) -> Result<Vec<CommitInfo>> {
        self.walk(None)
    }

    fn walk(&self, hide: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let head = self.head_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;
        if let Some(hide) = hide {
            revwalk.hide(hide)?;
        }

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(commit_to_info(&commit));
        }

        debug!(count = commits.len(), "walked commit history");
        Ok(commits)
    }
}

/// Convert a git2 Commit to CommitInfo
pub(crate) fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let hash = commit.id().to_string();
    let author = commit.author();

    let raw = String::from_utf8_lossy(commit.message_bytes());
    let (summary, body) = split_message(&raw);

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    let info = CommitInfo::new(
        hash,
        summary,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    );

    match body {
        Some(body) => info.with_body(body),
        None => info,
    }
}
