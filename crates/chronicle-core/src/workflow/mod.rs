//! Workflow helpers shared by the CLI commands

pub mod changelog;

pub use changelog::{read_changelog, write_changelog};
