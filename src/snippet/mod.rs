//! Boilerplate code generators for notebook work.
//!
//! Each generator returns Python source text to paste into a notebook:
//! import blocks, `pd.to_datetime` conversions, list literals, path
//! expressions built on environment variables and quoted Japanese
//! identifiers. Settings are passed in as option structs with defaults.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Imports emitted by [`import_block`] in template mode.
pub const TEMPLATE_IMPORTS: [&str; 6] = [
    "glob",
    "os",
    "from datetime import datetime",
    "",
    "numpy as np",
    "pandas as pd",
];

const INDENT: &str = "    ";

/// Builds an import block, one statement per line.
///
/// Modules are sorted. An entry starting with `from ` is kept verbatim and
/// an empty entry becomes a blank line. With `template` the fixed
/// [`TEMPLATE_IMPORTS`] list is used in its own order instead.
///
/// ```
/// use sniff::snippet::import_block;
///
/// assert_eq!(import_block(&["pandas as pd", "os"], false), "import os\nimport pandas as pd");
/// ```
pub fn import_block<S: AsRef<str>>(modules: &[S], template: bool) -> String {
    let modules: Vec<&str> = if template {
        TEMPLATE_IMPORTS.to_vec()
    } else {
        let mut sorted: Vec<&str> = modules.iter().map(|m| m.as_ref()).collect();
        sorted.sort_unstable();
        sorted
    };

    modules
        .into_iter()
        .map(|m| {
            if m.is_empty() || m.starts_with("from ") {
                m.to_string()
            } else {
                format!("import {}", m)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Options for [`to_datetime`].
#[derive(Debug, Clone)]
pub struct DatetimeOptions {
    /// Date parts in order, e.g. `ymd` or `ym`; `y` means a four-digit year
    pub fmt: String,

    /// Separator between the parts in the source column; may be empty
    pub sep: String,

    /// Write the result to this column instead of overwriting the source
    pub new_col: Option<String>,

    /// Turn unparsable values into NaT instead of raising
    pub coerce_errors: bool,
}

impl Default for DatetimeOptions {
    fn default() -> Self {
        Self {
            fmt: "ymd".to_string(),
            sep: "-".to_string(),
            new_col: None,
            coerce_errors: true,
        }
    }
}

/// Builds a `pd.to_datetime` assignment for one DataFrame column.
///
/// ```
/// use sniff::snippet::{to_datetime, DatetimeOptions};
///
/// assert_eq!(
///     to_datetime("df", "date", &DatetimeOptions::default()),
///     "df['date'] = pd.to_datetime(df['date'], format='%Y-%m-%d', errors='coerce')"
/// );
/// ```
pub fn to_datetime(df: &str, col: &str, options: &DatetimeOptions) -> String {
    let source = format!("{}['{}']", df, col);
    let target = match &options.new_col {
        Some(new_col) => format!("{}['{}']", df, new_col),
        None => source.clone(),
    };

    let format = options
        .fmt
        .chars()
        .map(|c| if c == 'y' { "%Y".to_string() } else { format!("%{}", c) })
        .collect::<Vec<_>>()
        .join(&options.sep);

    let errors = if options.coerce_errors {
        ", errors='coerce'"
    } else {
        ""
    };

    format!(
        "{} = pd.to_datetime({}, format='{}'{})",
        target, source, format, errors
    )
}

/// Turns the non-empty lines of `text` into a Python list of strings.
///
/// ```
/// use sniff::snippet::list_literal;
///
/// assert_eq!(list_literal("\nTokyo\nOsaka\n", false), "['Tokyo', 'Osaka']");
/// ```
pub fn list_literal(text: &str, multiline: bool) -> String {
    let items: Vec<String> = text
        .trim()
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(py_repr)
        .collect();

    wrap_items(&items, "[", "]", multiline)
}

/// Rewrites `path` as an `os.path.join` expression rooted at an environment variable.
///
/// The variable whose value is the longest directory prefix of the
/// absolute path is chosen; ties go to the alphabetically first name.
/// Returns `None` when no variable holds a prefix of the path.
///
/// # Errors
///
/// Returns an error if the path cannot be made absolute.
pub fn path_join<K, V>(path: &Path, vars: &[(K, V)], multiline: bool) -> Result<Option<String>>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let absolute = std::path::absolute(path)
        .with_context(|| format!("Failed to make {} absolute", path.display()))?;

    let best = vars
        .iter()
        .map(|(name, value)| (name.as_ref(), PathBuf::from(value.as_ref())))
        .filter(|(_, value)| value.is_absolute() && absolute.starts_with(value))
        .max_by(|(a_name, a_value), (b_name, b_value)| {
            let a_len = a_value.components().count();
            let b_len = b_value.components().count();
            a_len.cmp(&b_len).then_with(|| b_name.cmp(a_name))
        });

    let Some((name, prefix)) = best else {
        return Ok(None);
    };

    let mut items = vec![format!("os.getenv(\"{}\")", name)];
    if let Ok(rest) = absolute.strip_prefix(&prefix) {
        items.extend(
            rest.components()
                .map(|c| py_repr(&c.as_os_str().to_string_lossy())),
        );
    }

    Ok(Some(wrap_items(&items, "os.path.join(", ")", multiline)))
}

/// Options for [`quote_japanese`].
#[derive(Debug, Clone)]
pub struct QuoteOptions {
    /// Shortest run of characters that gets quoted
    pub min_chars: usize,

    /// Treat ASCII digits as separators instead of part of a word
    pub ignore_digits: bool,

    /// Treat full-width parentheses as separators instead of part of a word
    pub ignore_parens: bool,
}

impl Default for QuoteOptions {
    fn default() -> Self {
        Self {
            min_chars: 2,
            ignore_digits: false,
            ignore_parens: true,
        }
    }
}

/// Wraps each run of Japanese text in `code` in single quotes.
///
/// A run is a maximal sequence of Japanese characters, underscores and,
/// depending on the options, digits and full-width parentheses. Runs
/// shorter than `min_chars`, runs without any Japanese character and runs
/// already enclosed in quotes are left alone.
///
/// ```
/// use sniff::snippet::{quote_japanese, QuoteOptions};
///
/// assert_eq!(
///     quote_japanese("df[売上] * df[数量]", &QuoteOptions::default()),
///     "df['売上'] * df['数量']"
/// );
/// ```
pub fn quote_japanese(code: &str, options: &QuoteOptions) -> String {
    let chars: Vec<char> = code.chars().collect();
    let mut output = String::with_capacity(code.len() + 8);
    let mut start = 0;

    for run in chars.chunk_by(|a, b| is_word_char(*a, options) == is_word_char(*b, options)) {
        let end = start + run.len();
        let enclosed = start > 0
            && end < chars.len()
            && is_quote(chars[start - 1])
            && chars[start - 1] == chars[end];
        let wrap = is_word_char(run[0], options)
            && run.len() >= options.min_chars
            && run.iter().any(|&c| is_japanese(c))
            && !enclosed;

        if wrap {
            output.push('\'');
        }
        output.extend(run);
        if wrap {
            output.push('\'');
        }
        start = end;
    }

    output
}

fn is_japanese(c: char) -> bool {
    matches!(c,
        '\u{3005}'
        | '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FF10}'..='\u{FF19}'
        | '\u{FF21}'..='\u{FF3A}'
        | '\u{FF41}'..='\u{FF5A}'
        | '\u{FF66}'..='\u{FF9F}')
}

fn is_word_char(c: char, options: &QuoteOptions) -> bool {
    is_japanese(c)
        || c == '_'
        || (!options.ignore_digits && c.is_ascii_digit())
        || (!options.ignore_parens && matches!(c, '（' | '）'))
}

fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Quotes a string the way Python's `repr` does.
pub fn py_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Joins items between `left` and `right`, one indented item per line when `multiline`.
fn wrap_items(items: &[String], left: &str, right: &str, multiline: bool) -> String {
    if !multiline || items.is_empty() {
        return format!("{}{}{}", left, items.join(", "), right);
    }

    let body: String = items
        .iter()
        .map(|item| format!("{}{},\n", INDENT, item))
        .collect();
    format!("{}\n{}{}", left, body, right)
}
