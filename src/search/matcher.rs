//! Literal substring matching over a sequence of lines.

/// A literal word to look for, with its case handling resolved up front.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    word: String,
    case_sensitive: bool,
}

impl WordMatcher {
    pub fn new(word: &str, case_sensitive: bool) -> Self {
        let word = if case_sensitive {
            word.to_string()
        } else {
            word.to_lowercase()
        };
        Self {
            word,
            case_sensitive,
        }
    }

    pub fn is_match(&self, line: &str) -> bool {
        if self.case_sensitive {
            line.contains(&self.word)
        } else {
            line.to_lowercase().contains(&self.word)
        }
    }

    /// Indices of the lines containing the word, ascending.
    pub fn find_matches<S: AsRef<str>>(&self, lines: &[S]) -> Vec<usize> {
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.is_match(line.as_ref()))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Case-sensitive shorthand for [`WordMatcher::find_matches`].
///
/// An empty `word` is contained in every line; callers that treat it as
/// invalid input must reject it before getting here.
///
/// ```
/// use sniff::search::matcher::find_matches;
///
/// assert_eq!(find_matches(&["foo", "bar", "foobar"], "foo"), vec![0, 2]);
/// assert!(find_matches::<&str>(&[], "foo").is_empty());
/// ```
pub fn find_matches<S: AsRef<str>>(lines: &[S], word: &str) -> Vec<usize> {
    WordMatcher::new(word, true).find_matches(lines)
}
