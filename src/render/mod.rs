//! Turning search results into output lines.
//!
//! Rendering is read-only over the collected results; printing the
//! returned lines is left to the caller.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::search::{FileResult, Notice, SearchReport};

/// Options controlling what is rendered for each file.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit a `- path` header line per file
    pub show_filename: bool,

    /// Append the number of matched lines to the header
    pub show_count: bool,

    /// Emit the matched lines and their context
    pub show_content: bool,

    /// Prefix content lines with a hit marker and the line index
    pub decorate: bool,

    /// Blank line between non-adjacent runs and after each file's content
    pub separate_runs: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_filename: true,
            show_count: true,
            show_content: true,
            decorate: false,
            separate_runs: true,
        }
    }
}

const HIT_MARKER: &str = "* ";
const CONTEXT_MARKER: &str = "  ";

/// Renders the results as a flat sequence of output lines.
///
/// Per file: an optional header, then the context lines in ascending
/// order. With `decorate`, a content line reads `* 12  text` for a hit
/// and `  12  text` for context, the index right-aligned to the widest
/// index shown for that file.
pub fn render_results(files: &[FileResult], options: &RenderOptions) -> Vec<String> {
    let mut output = Vec::new();

    for file in files {
        if options.show_filename {
            output.push(header(file, options.show_count));
        }

        if !options.show_content {
            continue;
        }

        let width = file
            .context_indices
            .last()
            .map_or(1, |index| index.to_string().len());

        for (run_number, run) in file.runs().into_iter().enumerate() {
            if options.separate_runs && run_number > 0 {
                output.push(String::new());
            }
            for &index in run {
                output.push(content_line(file, index, width, options.decorate));
            }
        }

        if options.separate_runs {
            output.push(String::new());
        }
    }

    output
}

fn header(file: &FileResult, show_count: bool) -> String {
    let mut line = format!("- {}", file.path.display());
    if show_count {
        line.push_str(&format!(" {}", file.match_count()));
    }
    line
}

fn content_line(file: &FileResult, index: usize, width: usize, decorate: bool) -> String {
    let text = file.lines.get(index).map_or("", String::as_str);
    if !decorate {
        return text.to_string();
    }

    let marker = if file.is_match(index) {
        HIT_MARKER
    } else {
        CONTEXT_MARKER
    };
    format!("{}{:>width$}  {}", marker, index, text, width = width)
}

/// Lines announcing the candidate count and any notices of the search.
pub fn render_notices(report: &SearchReport) -> Vec<String> {
    let mut output = vec![format!("Searching {} candidate files", report.candidate_count)];
    output.extend(report.notices.iter().map(Notice::to_string));
    output
}

#[derive(Serialize)]
struct ReportView<'a> {
    candidate_count: usize,
    files_read: usize,
    truncated: bool,
    notices: &'a [Notice],
    files: Vec<FileView<'a>>,
}

#[derive(Serialize)]
struct FileView<'a> {
    path: &'a Path,
    match_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<Vec<LineView<'a>>>,
}

#[derive(Serialize)]
struct LineView<'a> {
    index: usize,
    text: &'a str,
    is_match: bool,
}

/// Renders the whole report as pretty-printed JSON.
///
/// Content lines are included when `options.show_content` is set; the
/// other display flags do not apply.
pub fn render_json(report: &SearchReport, options: &RenderOptions) -> Result<String> {
    let files = report
        .files
        .iter()
        .map(|file| FileView {
            path: &file.path,
            match_count: file.match_count(),
            lines: options.show_content.then(|| {
                file.context_indices
                    .iter()
                    .map(|&index| LineView {
                        index,
                        text: file.lines.get(index).map_or("", String::as_str),
                        is_match: file.is_match(index),
                    })
                    .collect()
            }),
        })
        .collect();

    let view = ReportView {
        candidate_count: report.candidate_count,
        files_read: report.files_read,
        truncated: report.truncated,
        notices: &report.notices,
        files,
    };

    Ok(serde_json::to_string_pretty(&view)?)
}
