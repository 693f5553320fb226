//! Neighbor-window expansion around matched line indices.

use std::collections::BTreeSet;

/// Expands every matched index into the window `[m - radius, m + radius]`.
///
/// The windows are merged, sorted ascending and clamped to
/// `[0, line_count)`; out-of-range indices are dropped. Every matched
/// index below `line_count` is part of the output.
///
/// ```
/// use sniff::search::context::expand_context;
///
/// assert_eq!(expand_context(&[5], 2, 100), vec![3, 4, 5, 6, 7]);
/// assert_eq!(expand_context(&[0], 3, 100), vec![0, 1, 2, 3]);
/// ```
pub fn expand_context(matched: &[usize], radius: usize, line_count: usize) -> Vec<usize> {
    let Some(last) = line_count.checked_sub(1) else {
        return Vec::new();
    };

    let mut indices = BTreeSet::new();
    for &m in matched {
        let start = m.saturating_sub(radius);
        let end = m.saturating_add(radius).min(last);
        if start <= end {
            indices.extend(start..=end);
        }
    }

    indices.into_iter().collect()
}

/// Splits ascending indices into runs of consecutive values.
///
/// ```
/// use sniff::search::context::context_runs;
///
/// let runs = context_runs(&[1, 2, 3, 9, 10, 11]);
/// assert_eq!(runs, vec![&[1, 2, 3][..], &[9, 10, 11][..]]);
/// ```
pub fn context_runs(indices: &[usize]) -> Vec<&[usize]> {
    indices
        .chunk_by(|a, b| a.checked_add(1) == Some(*b))
        .collect()
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
