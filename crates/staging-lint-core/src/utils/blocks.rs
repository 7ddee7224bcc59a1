//! Named block (CTE) discovery over stripped text.
//!
//! A block is recognised by the shape `name as (`, where `name` starts the
//! text or follows whitespace or a comma. Reserved words that happen to
//! fit the shape are dropped. The scan is textual, so a block name inside a
//! string literal or SQL comment is reported like any other.

use regex::Regex;
use std::sync::OnceLock;

use super::directives::blank;
use super::pattern::{cached, line_at};

/// Blocks every staging model must declare, in canonical order.
pub const REQUIRED_BLOCKS: [&str; 5] = ["source", "renamed", "filtered", "enhanced", "final"];

/// Query-language keywords that can precede `as (` without naming a block.
pub const RESERVED_WORDS: &[&str] = &[
    "select", "insert", "update", "delete", "merge", "with", "not", "cast", "case", "when",
    "then", "else", "end", "from", "where", "and", "or", "join", "left", "right", "inner",
    "outer", "cross", "on", "group", "order", "having", "limit", "union", "intersect", "except",
    "values", "set", "into",
];

static LEADING_WITH: OnceLock<Regex> = OnceLock::new();
static BLOCK_INTRO: OnceLock<Regex> = OnceLock::new();

/// A named block and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    /// Lower-cased block name.
    pub name: String,
    /// Line of the block name (1-indexed).
    pub line: usize,
}

impl BlockEntry {
    /// Creates a new entry, lower-casing `name`.
    #[must_use]
    pub fn new(name: &str, line: usize) -> Self {
        Self {
            name: name.to_lowercase(),
            line,
        }
    }
}

/// Finds every block introduction in `stripped`, in source order.
///
/// Duplicate names are kept as separate entries.
#[must_use]
pub fn find_blocks(stripped: &str) -> Vec<BlockEntry> {
    let cleaned = neutralize_leading_with(stripped);
    let intro = cached(&BLOCK_INTRO, r"(?im)(?:^|[,\s])(\w+)\s+as\s*\(");

    intro
        .captures_iter(&cleaned)
        .filter_map(|caps| caps.get(1))
        .filter(|name| !is_reserved(name.as_str()))
        .map(|name| BlockEntry::new(name.as_str(), line_at(stripped, name.start())))
        .collect()
}

/// Returns true for reserved words, ignoring case.
#[must_use]
pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.iter().any(|r| r.eq_ignore_ascii_case(word))
}

/// Blanks the first `with` that directly introduces a block.
fn neutralize_leading_with(text: &str) -> String {
    let leading = cached(&LEADING_WITH, r"(?i)\b(with)\s+\w+\s+as\s*\(");
    let Some(keyword) = leading.captures(text).and_then(|caps| caps.get(1)) else {
        return text.to_owned();
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..keyword.start()]);
    out.push_str(&blank(keyword.as_str()));
    out.push_str(&text[keyword.end()..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(blocks: &[BlockEntry]) -> Vec<&str> {
        blocks.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn finds_canonical_blocks_with_lines() {
        let sql = "with source as (\n  select 1\n),\n\nrenamed as (\n  select 2\n), filtered as (\n  select 3\n)\nselect * from filtered";
        let blocks = find_blocks(sql);
        assert_eq!(names(&blocks), vec!["source", "renamed", "filtered"]);
        assert_eq!(blocks[0].line, 1);
        assert_eq!(blocks[1].line, 5);
        assert_eq!(blocks[2].line, 7);
    }

    #[test]
    fn with_on_its_own_line() {
        let sql = "with\n\nsource as (\n  select 1\n)\nselect * from source";
        let blocks = find_blocks(sql);
        assert_eq!(names(&blocks), vec!["source"]);
        assert_eq!(blocks[0].line, 3);
    }

    #[test]
    fn names_are_lower_cased() {
        let blocks = find_blocks("WITH Source AS (select 1), RENAMED as (select 2)");
        assert_eq!(names(&blocks), vec!["source", "renamed"]);
    }

    #[test]
    fn reserved_words_are_not_blocks() {
        let sql = "with source as (\n  select cast(x as int) as y,\n  case when a then b end as (c)\n)";
        let blocks = find_blocks(sql);
        assert_eq!(names(&blocks), vec!["source"]);
    }

    #[test]
    fn duplicates_are_preserved() {
        let blocks = find_blocks("with a as (select 1), a as (select 2)");
        assert_eq!(names(&blocks), vec!["a", "a"]);
    }

    #[test]
    fn no_blocks_in_plain_select() {
        assert!(find_blocks("select * from t").is_empty());
    }

    #[test]
    fn reserved_lookup_ignores_case() {
        assert!(is_reserved("SELECT"));
        assert!(is_reserved("Union"));
        assert!(!is_reserved("enhanced"));
    }

    #[test]
    fn neutralizing_with_keeps_length() {
        let sql = "with source as (select 1)";
        let cleaned = neutralize_leading_with(sql);
        assert_eq!(cleaned.len(), sql.len());
        assert!(cleaned.starts_with("     source"));
    }
}
