//! Loading files as ordered sequences of logical lines.
//!
//! Plain text is split on `\n`, `\r` and `\r\n`. Notebook documents
//! (`.ipynb`) are parsed as JSON and the source fragments of every cell
//! are flattened into one line sequence. Nothing here fails hard: a file
//! that cannot be turned into lines yields [`LoadOutcome::Skipped`].

use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("line break regex is valid"));

/// Extension of structured notebook documents.
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

const OCTET_STREAM: &str = "application/octet-stream";

/// Result of turning one file into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Lines(Vec<String>),
    Skipped(SkipReason),
}

impl LoadOutcome {
    /// The loaded lines, or an empty slice for a skipped file.
    pub fn lines(&self) -> &[String] {
        match self {
            LoadOutcome::Lines(lines) => lines,
            LoadOutcome::Skipped(_) => &[],
        }
    }
}

/// Why a file contributed no lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Zero-byte file
    Empty,
    /// The file could not be opened or read
    Unreadable(String),
    /// Content detected as a non-text type
    Binary(String),
    /// Content is not valid UTF-8
    NotUtf8,
    /// Notebook JSON is malformed or lacks `cells[].source`
    MalformedNotebook(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Empty => write!(f, "empty file"),
            SkipReason::Unreadable(e) => write!(f, "unreadable: {}", e),
            SkipReason::Binary(kind) => write!(f, "binary content ({})", kind),
            SkipReason::NotUtf8 => write!(f, "not valid UTF-8"),
            SkipReason::MalformedNotebook(e) => write!(f, "malformed notebook: {}", e),
        }
    }
}

/// Something that turns a path into lines.
///
/// The collector only talks to this trait, so alternative sources (or
/// instrumented ones in tests) can stand in for the file system.
pub trait LineSource {
    fn load(&self, path: &Path) -> LoadOutcome;
}

/// Reads files from disk with [`load_lines`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLineSource;

impl LineSource for FsLineSource {
    fn load(&self, path: &Path) -> LoadOutcome {
        load_lines(path)
    }
}

/// Reads `path` and splits it into lines according to its kind.
///
/// The whole file is read in one call, so the handle is closed before
/// this function returns.
pub fn load_lines(path: &Path) -> LoadOutcome {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return LoadOutcome::Skipped(SkipReason::Unreadable(e.to_string())),
    };

    if bytes.is_empty() {
        return LoadOutcome::Skipped(SkipReason::Empty);
    }

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let reason = match detect_binary(e.as_bytes()) {
                Some(kind) => SkipReason::Binary(kind),
                None => SkipReason::NotUtf8,
            };
            return LoadOutcome::Skipped(reason);
        }
    };

    // Decodable text is binary only if it carries a NUL byte
    if text.contains('\0') {
        return LoadOutcome::Skipped(SkipReason::Binary(OCTET_STREAM.to_string()));
    }

    if is_notebook(path) {
        match parse_notebook(&text) {
            Ok(lines) => LoadOutcome::Lines(lines),
            Err(e) => LoadOutcome::Skipped(SkipReason::MalformedNotebook(e.to_string())),
        }
    } else {
        LoadOutcome::Lines(split_lines(&text))
    }
}

pub fn is_notebook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(NOTEBOOK_EXTENSION))
}

/// Returns the detected type of bytes that failed to decode as UTF-8.
///
/// Magic numbers are only trusted here: plenty of valid text starts with
/// `BM`, `MZ` or `%PDF`.
fn detect_binary(bytes: &[u8]) -> Option<String> {
    if let Some(kind) = infer::get(bytes) {
        if !kind.mime_type().starts_with("text/") {
            return Some(kind.mime_type().to_string());
        }
    }

    bytes.contains(&0).then(|| OCTET_STREAM.to_string())
}

/// Splits text on `\n`, `\r` and `\r\n`.
///
/// A line break at the very end does not produce a trailing empty line.
///
/// ```
/// use sniff::lines::split_lines;
///
/// assert_eq!(split_lines("a\r\nb\rc\n"), vec!["a", "b", "c"]);
/// assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
/// ```
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = LINE_BREAK.split(text).map(str::to_owned).collect();
    if text.ends_with(['\n', '\r']) {
        lines.pop();
    }
    lines
}

#[derive(Deserialize)]
struct Notebook {
    cells: Vec<Cell>,
}

#[derive(Deserialize)]
struct Cell {
    source: CellSource,
}

/// nbformat allows a cell source to be a list of fragments or one string.
#[derive(Deserialize)]
#[serde(untagged)]
enum CellSource {
    Fragments(Vec<String>),
    Text(String),
}

/// Flattens the cell sources of a notebook document into lines.
///
/// Fragments keep their order within a cell and cells keep document
/// order. A single trailing `\n` is removed from each fragment.
///
/// # Errors
///
/// Returns the JSON error if the document is malformed or any cell lacks
/// a `source` field of the expected shape.
pub fn parse_notebook(text: &str) -> Result<Vec<String>, serde_json::Error> {
    let notebook: Notebook = serde_json::from_str(text)?;

    let mut lines = Vec::new();
    for cell in notebook.cells {
        match cell.source {
            CellSource::Fragments(fragments) => {
                lines.extend(fragments.into_iter().map(|mut fragment| {
                    if fragment.ends_with('\n') {
                        fragment.pop();
                    }
                    fragment
                }));
            }
            CellSource::Text(text) => lines.extend(split_lines(&text)),
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests;
