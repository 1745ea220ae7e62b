//! Chronicle Core - Core library for changelog generation
//!
//! This crate provides the foundational error taxonomy, configuration
//! loading, and the file workflow used to persist generated changelogs.

pub mod config;
pub mod error;
pub mod workflow;

pub use error::{ChronicleError, Result};
