//! Glob pattern expansion rooted at a base directory.
//!
//! A pattern such as `notebooks/**/*.ipynb` is joined onto the base
//! directory and matched against every file found below the longest
//! wildcard-free prefix of the joined path. `*` and `?` never cross a
//! path separator; `**` spans any number of directory levels, including
//! none. Brackets and braces are always literal.

use anyhow::Result;
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use crate::error::SniffError;
use crate::paths::{canonical_dir, escape_glob_brackets, escape_glob_literal, remove_path_prefix};
use crate::telemetry::{LogMessage, log_with_context};

/// Candidate count above which a warning is raised. The scan still proceeds.
pub const CANDIDATE_WARN_THRESHOLD: usize = 1000;

/// Filters applied while walking the directory tree.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Skip files listed in `.gitignore` and related ignore files.
    pub respect_gitignore: bool,

    /// Descend into hidden directories and yield hidden files.
    pub include_hidden: bool,
}

/// The candidate files produced by one pattern expansion.
#[derive(Debug, Clone)]
pub struct Expansion {
    /// The escaped absolute glob the candidates were matched against
    pub glob: String,

    /// Matching regular files, in file-name order per directory
    pub paths: Vec<PathBuf>,
}

impl Expansion {
    pub fn exceeds_threshold(&self) -> bool {
        self.paths.len() > CANDIDATE_WARN_THRESHOLD
    }
}

/// Expands `pattern` relative to `base_dir` into the list of candidate files.
///
/// `pattern` may be relative, or absolute with `base_dir` as a prefix; in
/// the latter case the duplicated prefix is dropped before joining. The
/// expansion is materialized once, so counting the candidates and
/// scanning them walk the file system a single time.
///
/// # Errors
///
/// Returns an error if `base_dir` is not an existing directory or if the
/// pattern is not a valid glob.
pub fn expand_pattern(pattern: &str, base_dir: &Path, options: &WalkOptions) -> Result<Expansion> {
    let base = canonical_dir(base_dir)?;
    let joined = join_pattern(&base, base_dir, pattern);
    let (literal, rest) = split_base(&base, &joined);
    let glob = build_glob(literal, rest);

    let matcher = GlobBuilder::new(&glob)
        .literal_separator(true)
        .build()
        .map_err(|e| SniffError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.kind().to_string(),
        })?
        .compile_matcher();

    let (root, max_depth) = walk_root(literal, rest);
    let paths = if root.exists() {
        collect_matching(&root, max_depth, &matcher, options)
    } else {
        Vec::new()
    };

    log_with_context(
        log::Level::Info,
        LogMessage {
            message: format!("Found {} candidate files", paths.len()),
            module: "pattern",
            context: Some(vec![("glob", glob.clone())]),
        },
    );

    let expansion = Expansion { glob, paths };
    if expansion.exceeds_threshold() {
        log_with_context(
            log::Level::Warn,
            LogMessage {
                message: format!(
                    "Candidate file count exceeds {}, scanning anyway",
                    CANDIDATE_WARN_THRESHOLD
                ),
                module: "pattern",
                context: Some(vec![("count", expansion.paths.len().to_string())]),
            },
        );
    }

    Ok(expansion)
}

/// Joins `pattern` onto `base`, dropping a leading copy of the base directory.
///
/// The result is normalized lexically: `.` components and repeated
/// separators are dropped so the glob spells paths the way the walker does.
fn join_pattern(base: &Path, raw_base: &Path, pattern: &str) -> PathBuf {
    let pattern = Path::new(pattern);
    let joined = if pattern.is_absolute() {
        // Callers may pass either the canonical or the configured spelling of the base
        base.join(remove_path_prefix(remove_path_prefix(pattern, base), raw_base))
    } else {
        base.join(pattern)
    };

    joined.components().collect()
}

/// Splits `joined` into the base directory and the pattern below it.
///
/// An absolute pattern outside the base has no literal part.
fn split_base<'a>(base: &'a Path, joined: &'a Path) -> (&'a Path, &'a Path) {
    match joined.strip_prefix(base) {
        Ok(rest) => (base, rest),
        Err(_) => (Path::new(""), joined),
    }
}

/// Builds the glob: the base is matched literally, the rest as a pattern.
fn build_glob(literal: &Path, rest: &Path) -> String {
    let mut glob = escape_glob_literal(&literal.to_string_lossy());
    if !glob.is_empty() && !glob.ends_with(MAIN_SEPARATOR) && !rest.as_os_str().is_empty() {
        glob.push(MAIN_SEPARATOR);
    }
    glob.push_str(&escape_glob_brackets(&rest.to_string_lossy()));
    glob
}

fn has_wildcard(component: &Component<'_>) -> bool {
    component
        .as_os_str()
        .to_string_lossy()
        .contains(['*', '?'])
}

/// Picks the directory to walk and the walk depth.
///
/// The root is `literal` extended by the longest prefix of `rest` without
/// `*` or `?`. The depth is unbounded once a `**` component appears.
fn walk_root(literal: &Path, rest: &Path) -> (PathBuf, Option<usize>) {
    let mut root = literal.to_path_buf();
    let mut components = rest.components().peekable();

    while let Some(component) = components.next_if(|c| !has_wildcard(c)) {
        root.push(component);
    }

    let remaining: Vec<Component<'_>> = components.collect();
    let max_depth = if remaining.iter().any(|c| c.as_os_str() == "**") {
        None
    } else {
        Some(remaining.len())
    };

    (root, max_depth)
}

fn collect_matching(
    root: &Path,
    max_depth: Option<usize>,
    matcher: &GlobMatcher,
    options: &WalkOptions,
) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(!options.include_hidden)
        .max_depth(max_depth)
        .sort_by_file_name(|a, b| a.cmp(b));
    if options.respect_gitignore {
        builder
            .git_ignore(true)
            .git_exclude(true)
            .ignore(true)
            .parents(true)
            .require_git(false);
    }

    let mut paths = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && matcher.is_match(path) {
                    paths.push(path.to_path_buf());
                }
            }
            Err(err) => {
                log_with_context(
                    log::Level::Warn,
                    LogMessage {
                        message: format!("Error walking directory: {}", err),
                        module: "pattern",
                        context: Some(vec![("directory", root.display().to_string())]),
                    },
                );
            }
        }
    }

    paths
}
