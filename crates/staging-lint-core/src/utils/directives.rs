//! Template directive stripping.
//!
//! Block (`{% ... %}`), expression (`{{ ... }}`) and comment (`{# ... #}`)
//! regions are overwritten in place. Newlines inside a region survive, and
//! every other character becomes as many spaces as its UTF-8 width, so the
//! stripped text has the same byte length and line count as the input and
//! any offset found in it is valid in the raw text too.
//!
//! An unterminated directive has no closing bracket to match and is left
//! as ordinary text.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::pattern::cached;

static BLOCK: OnceLock<Regex> = OnceLock::new();
static EXPRESSION: OnceLock<Regex> = OnceLock::new();
static COMMENT: OnceLock<Regex> = OnceLock::new();

/// Replaces every template directive in `raw` with whitespace.
#[must_use]
pub fn strip_directives(raw: &str) -> String {
    let passes: [(&'static OnceLock<Regex>, &str); 3] = [
        (&BLOCK, r"(?s)\{%.*?%\}"),
        (&EXPRESSION, r"(?s)\{\{.*?\}\}"),
        (&COMMENT, r"(?s)\{#.*?#\}"),
    ];

    let mut text = raw.to_owned();
    for (cell, pattern) in passes {
        let re = cached(cell, pattern);
        if re.is_match(&text) {
            text = re
                .replace_all(&text, |caps: &Captures<'_>| blank(&caps[0]))
                .into_owned();
        }
    }
    text
}

/// Whitespace of the same byte length as `span`, keeping line breaks.
#[must_use]
pub fn blank(span: &str) -> String {
    let mut out = String::with_capacity(span.len());
    for c in span.chars() {
        if c == '\n' || c == '\r' {
            out.push(c);
        } else {
            out.extend(std::iter::repeat(' ').take(c.len_utf8()));
        }
    }
    out
}
