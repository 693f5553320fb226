//! Configuration errors rejected before any file is touched.

use std::path::PathBuf;
use thiserror::Error;

/// Conditions that make a whole request meaningless.
///
/// Per-file problems never show up here; those are reported through
/// [`crate::lines::LoadOutcome::Skipped`] and absorbed by the collector.
#[derive(Error, Debug)]
pub enum SniffError {
    #[error("Search word must not be empty")]
    EmptyWord,

    #[error("Result limit must be a positive number of files")]
    InvalidLimit,

    #[error("Base directory not found: {}", .path.display())]
    BaseDirNotFound { path: PathBuf },

    #[error("No base directory: neither the requested variable nor HOME/HOMEPATH is set")]
    NoHomeDirectory,

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}
