//! Rule requiring category comments in column lists.
//!
//! Long column lists are split into commented groups (`-- identifiers`,
//! `-- dates`, ...). The check counts distinct group markers anywhere in the
//! stripped text, not per block.

use regex::Regex;
use staging_lint_core::utils::pattern::cached;
use staging_lint_core::{ModelContext, Rule, Severity, Violation};
use std::sync::OnceLock;

/// Distinct markers required before the model passes.
const MIN_GROUPS: usize = 2;

static GROUPS: [OnceLock<Regex>; 7] = [
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
];

const GROUP_PATTERNS: [&str; 7] = [
    r"(?i)--\s*identifiers",
    r"(?i)--\s*dates",
    r"(?i)--\s*descriptive",
    r"(?i)--\s*system",
    r"(?i)--\s*audit",
    r"(?i)--\s*(?:dbt\s+)?metadata",
    r"(?i)--\s*ingestion",
];

/// Number of distinct group markers in `text`.
fn group_count(text: &str) -> usize {
    GROUPS
        .iter()
        .zip(GROUP_PATTERNS)
        .filter(|(cell, pattern)| cached(*cell, pattern).is_match(text))
        .count()
}

/// Rule code for column-grouping.
pub const CODE: &str = "COLUMN_GROUPING";

/// Rule name for column-grouping.
pub const NAME: &str = "column-grouping";

/// Warns when fewer than two column-group comments appear.
///
/// Runs only when a `renamed` or `final` block exists.
#[derive(Debug, Clone)]
pub struct ColumnGrouping {
    severity: Severity,
}

impl Default for ColumnGrouping {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnGrouping {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for ColumnGrouping {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires column grouping comments"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        let Some(block) = ctx.block("renamed").or_else(|| ctx.block("final")) else {
            return Vec::new();
        };
        if group_count(ctx.source.stripped()) >= MIN_GROUPS {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            "Missing column grouping comments (-- identifiers, -- dates, etc.).",
        )
        .at_line(block.line)
        .with_remediation(
            "Add grouping comments in renamed and final CTEs:\n  -- identifiers\n  -- dates\n  -- descriptive fields\n  -- system / audit\n  -- dbt metadata",
        )]
    }
}
