//! Multi-file literal word search.
//!
//! The pipeline expands a glob pattern into candidate files, loads each
//! candidate as lines, finds the lines containing the word and widens
//! every hit into a context window. Files without a hit are dropped.
//! Collection stops as soon as the result limit is reached, so later
//! candidates are never opened.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::SniffError;
use crate::lines::{FsLineSource, LineSource, LoadOutcome};
use crate::pattern::{CANDIDATE_WARN_THRESHOLD, WalkOptions, expand_pattern};
use crate::telemetry::{LogMessage, log_with_context};

pub mod context;
pub mod matcher;

use context::{context_runs, expand_context};
use matcher::WordMatcher;


/// Number of files with hits collected when the caller does not choose a limit.
pub const DEFAULT_LIMIT: usize = 20;

/// Lines shown before and after each hit by default.
pub const DEFAULT_NEIGHBORS: usize = 2;

/// Configuration options for a search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Lines within this distance of a hit are included as context.
    pub neighbors: usize,

    /// Maximum number of files with at least one hit to collect.
    /// `None` scans every candidate.
    pub limit: Option<usize>,

    /// When false, lines and word are compared in lowercase.
    pub case_sensitive: bool,

    /// Skip files excluded by `.gitignore` and related ignore files.
    pub respect_gitignore: bool,

    /// Include hidden files and descend into hidden directories.
    pub include_hidden: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            neighbors: DEFAULT_NEIGHBORS,
            limit: Some(DEFAULT_LIMIT),
            case_sensitive: true,
            respect_gitignore: false,
            include_hidden: false,
        }
    }
}

impl SearchOptions {
    fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            respect_gitignore: self.respect_gitignore,
            include_hidden: self.include_hidden,
        }
    }
}

/// One scanned file with at least one hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    /// Path of the file
    pub path: PathBuf,

    /// The full content of the file as logical lines, 0-indexed
    pub lines: Vec<String>,

    /// Ascending indices of the lines containing the word
    pub matched_indices: Vec<usize>,

    /// Ascending indices to display: the hits and their neighbors
    pub context_indices: Vec<usize>,
}

impl FileResult {
    pub fn match_count(&self) -> usize {
        self.matched_indices.len()
    }

    pub fn is_match(&self, index: usize) -> bool {
        self.matched_indices.binary_search(&index).is_ok()
    }

    /// Context indices grouped into runs of consecutive lines.
    pub fn runs(&self) -> Vec<&[usize]> {
        context_runs(&self.context_indices)
    }
}

/// Informational conditions raised during a search.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// The pattern produced more candidates than the warning threshold
    TooManyCandidates { count: usize, threshold: usize },

    /// Collection stopped at the limit with candidates left unread
    Truncated { limit: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::TooManyCandidates { count, threshold } => write!(
                f,
                "Candidate file count {} exceeds {}; scanning all of them",
                count, threshold
            ),
            Notice::Truncated { limit } => write!(
                f,
                "Stopped after {} matching files; remaining candidates were not searched",
                limit
            ),
        }
    }
}

/// Everything one search produced.
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    /// Files with hits, in candidate order
    pub files: Vec<FileResult>,

    /// Number of candidate files produced by the pattern
    pub candidate_count: usize,

    /// Number of candidates that were actually loaded
    pub files_read: usize,

    /// Whether candidates were left unread because the limit was reached
    pub truncated: bool,

    /// Notices in the order they were raised
    pub notices: Vec<Notice>,
}

/// Searches the files matching `pattern` below `base_dir` for `word`.
///
/// # Arguments
///
/// * `word` - Literal, non-empty text to look for
/// * `pattern` - Glob relative to `base_dir` (or absolute under it); `**` spans directories
/// * `base_dir` - Directory anchoring the pattern
/// * `options` - Configuration options for the search
///
/// # Errors
///
/// Returns an error if:
/// - `word` is empty or the limit is zero
/// - `base_dir` does not exist or is not a directory
/// - `pattern` is not a valid glob
///
/// Unreadable or unparsable files are skipped, never reported as errors.
pub fn search_files(
    word: &str,
    pattern: &str,
    base_dir: &Path,
    options: &SearchOptions,
) -> Result<SearchReport> {
    validate(word, options)?;

    let expansion = expand_pattern(pattern, base_dir, &options.walk_options())
        .with_context(|| format!("Failed to expand pattern '{}'", pattern))?;

    collect_results(word, &expansion.paths, options, &FsLineSource)
}

/// Scans `paths` in order with `source`, collecting files with hits.
///
/// Scanning stops before loading another candidate once `options.limit`
/// files have been collected.
pub fn collect_results<S>(
    word: &str,
    paths: &[PathBuf],
    options: &SearchOptions,
    source: &S,
) -> Result<SearchReport>
where
    S: LineSource + ?Sized,
{
    validate(word, options)?;

    let matcher = WordMatcher::new(word, options.case_sensitive);
    let mut report = SearchReport {
        candidate_count: paths.len(),
        ..Default::default()
    };

    if paths.len() > CANDIDATE_WARN_THRESHOLD {
        report.notices.push(Notice::TooManyCandidates {
            count: paths.len(),
            threshold: CANDIDATE_WARN_THRESHOLD,
        });
    }

    for path in paths {
        if let Some(limit) = options.limit {
            if report.files.len() >= limit {
                report.truncated = true;
                report.notices.push(Notice::Truncated { limit });
                log_with_context(
                    log::Level::Info,
                    LogMessage {
                        message: "Result limit reached, stopping search".to_string(),
                        module: "search",
                        context: Some(vec![
                            ("limit", limit.to_string()),
                            ("unread", (paths.len() - report.files_read).to_string()),
                        ]),
                    },
                );
                break;
            }
        }

        report.files_read += 1;
        let lines = match source.load(path) {
            LoadOutcome::Lines(lines) => lines,
            LoadOutcome::Skipped(reason) => {
                log_with_context(
                    log::Level::Debug,
                    LogMessage {
                        message: "Skipped file".to_string(),
                        module: "search",
                        context: Some(vec![
                            ("file_path", path.display().to_string()),
                            ("reason", reason.to_string()),
                        ]),
                    },
                );
                continue;
            }
        };

        let matched_indices = matcher.find_matches(&lines);
        if matched_indices.is_empty() {
            continue;
        }

        let context_indices = expand_context(&matched_indices, options.neighbors, lines.len());
        report.files.push(FileResult {
            path: path.clone(),
            lines,
            matched_indices,
            context_indices,
        });
    }

    Ok(report)
}

fn validate(word: &str, options: &SearchOptions) -> Result<()> {
    if word.is_empty() {
        return Err(SniffError::EmptyWord.into());
    }
    if options.limit == Some(0) {
        return Err(SniffError::InvalidLimit.into());
    }
    Ok(())
}
