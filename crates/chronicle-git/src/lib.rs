//! Chronicle Git - Read-only git history access
//!
//! This crate lists commits and release tags from a repository so the
//! changelog engine can partition history into releases. It never writes
//! to the repository.

mod commits;
mod repository;
mod tags;
pub mod types;

pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, TagInfo};
