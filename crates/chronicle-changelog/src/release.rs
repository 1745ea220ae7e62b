//! Partitioning of commit history into releases

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use chronicle_git::CommitInfo;

use crate::types::{tag_matches_version, Boundary, Release, ReleaseCommits};

/// Split commits into the Unreleased release followed by closed releases.
///
/// `commits` and `boundaries` are newest first. A boundary's release holds
/// the commit the tag points at and every older commit up to the next
/// boundary. When several boundaries point at the same commit the first one
/// listed closes the release; boundaries whose commit is not in `commits`
/// produce no release. Every commit lands in exactly one release.
#[instrument(skip_all, fields(commits = commits.len(), boundaries = boundaries.len()))]
pub fn resolve(commits: &[CommitInfo], boundaries: &[Boundary]) -> Vec<ReleaseCommits> {
    let mut by_hash: HashMap<&str, &Boundary> = HashMap::new();
    for boundary in boundaries {
        by_hash.entry(boundary.hash.as_str()).or_insert(boundary);
    }

    let mut releases = vec![ReleaseCommits::unreleased()];

    for commit in commits {
        if let Some(boundary) = by_hash.remove(commit.hash.as_str()) {
            releases.push(ReleaseCommits::closed(boundary));
        }
        if let Some(current) = releases.last_mut() {
            current.commits.push(commit.clone());
        }
    }

    debug!(
        releases = releases.len(),
        unused_boundaries = by_hash.len(),
        "resolved releases"
    );
    releases
}

/// Keep the releases newer than the version a document already records.
///
/// `releases` comes from [`resolve`], so the Unreleased release is first.
/// With no recorded version every release is kept. A recorded version that
/// no release carries keeps only the Unreleased release, so history the
/// document already holds is never rendered twice.
pub fn newer_than<'a>(releases: &'a [Release], recorded_version: Option<&str>) -> &'a [Release] {
    let Some(version) = recorded_version else {
        return releases;
    };

    let position = releases.iter().position(|release| {
        release
            .tag
            .as_deref()
            .is_some_and(|tag| tag_matches_version(tag, version))
    });

    match position {
        Some(index) => &releases[..index],
        None => {
            warn!(version, "recorded version not found among release tags");
            &releases[..releases.len().min(1)]
        }
    }
}
