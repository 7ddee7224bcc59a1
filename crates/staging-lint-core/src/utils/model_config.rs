//! Extraction of the `{{ config(...) }}` call and its keyword arguments.
//!
//! These helpers work on the raw text, since the config call is itself a
//! template directive and is gone after stripping. Argument text is taken
//! up to the first `) }}`, so arguments containing that sequence are cut
//! short.

use regex::Regex;
use std::sync::OnceLock;

use super::pattern::{cached, line_at};

static CONFIG_OPEN: OnceLock<Regex> = OnceLock::new();
static CONFIG_CALL: OnceLock<Regex> = OnceLock::new();
static TAGS: OnceLock<Regex> = OnceLock::new();
static MATERIALIZED: OnceLock<Regex> = OnceLock::new();

fn config_open() -> &'static Regex {
    cached(&CONFIG_OPEN, r"\{\{\s*config\s*\(")
}

/// Line of the first config call opening, if any.
#[must_use]
pub fn find_config_call(raw: &str) -> Option<usize> {
    config_open().find(raw).map(|m| line_at(raw, m.start()))
}

/// Argument text of the first complete config call.
#[must_use]
pub fn extract_config(raw: &str) -> Option<&str> {
    cached(&CONFIG_CALL, r"(?s)\{\{\s*config\s*\((.*?)\)\s*\}\}")
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parses a `tags = [...]` assignment into bare tag names.
///
/// Elements are split on commas, trimmed, and unquoted. A missing
/// assignment yields an empty list.
#[must_use]
pub fn extract_tags(arguments: &str) -> Vec<String> {
    let Some(list) = cached(&TAGS, r"(?s)tags\s*=\s*\[(.*?)\]")
        .captures(arguments)
        .and_then(|caps| caps.get(1))
    else {
        return Vec::new();
    };

    list.as_str()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.trim_matches(|c| c == '\'' || c == '"').to_owned())
        .collect()
}

/// Value of a quoted `materialized = '...'` argument.
#[must_use]
pub fn extract_materialization(arguments: &str) -> Option<String> {
    cached(&MATERIALIZED, r#"materialized\s*=\s*['"](\w+)['"]"#)
        .captures(arguments)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Metadata declared by a model's config call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigMetadata {
    /// Line of the config call (1-indexed).
    pub line: usize,
    /// `materialized` value, when given as a quoted literal.
    pub materialization: Option<String>,
    /// Tags in declaration order.
    pub tags: Vec<String>,
}

impl ConfigMetadata {
    /// Reads the first config call of `raw`.
    ///
    /// Returns `None` when there is no call or its arguments cannot be
    /// delimited.
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        let line = find_config_call(raw)?;
        let arguments = extract_config(raw)?;
        Some(Self {
            line,
            materialization: extract_materialization(arguments),
            tags: extract_tags(arguments),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tags_in_order_without_quotes() {
        let tags = extract_tags("tags = ['oda', 'staging', 'formentera']");
        assert_eq!(tags, vec!["oda", "staging", "formentera"]);
    }

    #[test]
    fn extracts_double_quoted_multi_line_tags() {
        let tags = extract_tags("materialized='view',\n  tags=[\n    \"prodview\",\n    \"staging\"\n  ]");
        assert_eq!(tags, vec!["prodview", "staging"]);
    }

    #[test]
    fn missing_tags_is_empty_not_error() {
        assert!(extract_tags("materialized='view'").is_empty());
        assert!(extract_tags("tags=[]").is_empty());
    }

    #[test]
    fn extracts_config_arguments_across_lines() {
        let raw = "{{\n  config(\n    materialized='view',\n    tags=['oda']\n  )\n}}\nselect 1";
        let args = extract_config(raw).unwrap_or_default();
        assert!(args.contains("materialized='view'"));
        assert!(args.contains("tags=['oda']"));
    }

    #[test]
    fn first_config_call_wins() {
        let raw = "{{ config(materialized='view') }}\n{{ config(materialized='table') }}";
        let meta = ConfigMetadata::from_raw(raw);
        assert_eq!(
            meta.and_then(|m| m.materialization),
            Some("view".to_string())
        );
    }

    #[test]
    fn config_call_line_is_reported() {
        let raw = "-- header\n\n{{ config(materialized='view') }}";
        assert_eq!(find_config_call(raw), Some(3));
    }

    #[test]
    fn no_config_call() {
        let raw = "select 1";
        assert_eq!(find_config_call(raw), None);
        assert_eq!(extract_config(raw), None);
        assert!(ConfigMetadata::from_raw(raw).is_none());
    }

    #[test]
    fn materialization_requires_quoted_literal() {
        assert_eq!(
            extract_materialization("materialized = \"table\""),
            Some("table".to_string())
        );
        assert_eq!(extract_materialization("materialized=var('m')"), None);
    }
}
