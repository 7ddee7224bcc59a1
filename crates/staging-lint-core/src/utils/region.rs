//! Isolation of a single block's body text.
//!
//! The body runs from the block's opening parenthesis to the next
//! `), name as (` introduction, or to the end of the text when no later
//! block follows. Parentheses are not balanced, so a nested sub-query that
//! itself looks like a block introduction ends the region early. Callers
//! only look for markers inside the region, which tolerates this.

use regex::Regex;
use std::sync::OnceLock;

use super::pattern::cached;

static NEXT_BLOCK: OnceLock<Regex> = OnceLock::new();
static SELECT_LIST: OnceLock<Regex> = OnceLock::new();

/// Byte offset where the body of `name` starts (just past its `(`).
#[must_use]
pub fn block_body_start(text: &str, name: &str) -> Option<usize> {
    let intro = Regex::new(&format!(r"(?i)\b{}\s+as\s*\(", regex::escape(name))).ok()?;
    intro.find(text).map(|m| m.end())
}

/// Body text of the first block called `name`, matched case-insensitively.
#[must_use]
pub fn isolate_block<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let start = block_body_start(text, name)?;
    let rest = &text[start..];
    let next = cached(&NEXT_BLOCK, r"(?i)\)\s*,\s*\w+\s+as\s*\(");
    Some(match next.find(rest) {
        Some(m) => &rest[..m.start()],
        None => rest,
    })
}

/// The column list of a region's leading `select ... from`.
///
/// Returns the trimmed text between `select` and the first `from`, or
/// `None` when the region does not start with a select.
#[must_use]
pub fn select_list(region: &str) -> Option<&str> {
    cached(&SELECT_LIST, r"(?is)\A\s*select\s+(.*?)\s+from\s")
        .captures(region)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}
