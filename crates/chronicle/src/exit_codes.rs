//! Exit codes for the CLI

use chronicle_core::error::{ChangelogError, ChronicleError, ConfigError, GitError};

/// Success
#[allow(dead_code)]
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Pick the exit code for a failed command
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<ChronicleError>() {
        return match err {
            ChronicleError::Config(_) | ChronicleError::Toml(_) => CONFIG_ERROR,
            ChronicleError::Changelog(ChangelogError::UnsupportedRuleSet(_)) => CONFIG_ERROR,
            ChronicleError::Git(_) => GIT_ERROR,
            _ => ERROR,
        };
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return CONFIG_ERROR;
    }
    if err.downcast_ref::<GitError>().is_some() {
        return GIT_ERROR;
    }
    ERROR
}
