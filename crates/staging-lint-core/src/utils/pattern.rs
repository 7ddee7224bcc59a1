//! Shared regex and offset helpers.

use regex::Regex;
use std::sync::OnceLock;

/// Returns the regex stored in `cell`, compiling `pattern` on first use.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regex. Only pass literal patterns
/// that are exercised by tests.
pub fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern `{pattern}`: {e}"))
    })
}

/// 1-indexed line number of byte `offset` in `text`.
#[must_use]
pub fn line_at(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
