//! Rule requiring staging models to be materialized as views.

use staging_lint_core::{ModelContext, Rule, Severity, Violation};

/// Rule code for materialized-view.
pub const CODE: &str = "MATERIALIZED_VIEW";

/// Rule name for materialized-view.
pub const NAME: &str = "materialized-view";

/// Requires `materialized` to equal the configured kind.
///
/// A missing `materialized` argument fails the check as well. Skipped when
/// the config call's arguments cannot be read.
#[derive(Debug, Clone)]
pub struct MaterializedView {
    severity: Severity,
}

impl Default for MaterializedView {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterializedView {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for MaterializedView {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires materialized='view' in config()"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        let Some(config) = &ctx.config else {
            return Vec::new();
        };
        let expected = &ctx.conventions.materialization;
        if config.materialization.as_ref() == Some(expected) {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            format!("Staging model must be materialized as '{expected}'."),
        )
        .at_line(config.line)
        .with_remediation(format!("Set materialized='{expected}' in config()."))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, GOOD_MODEL};

    #[test]
    fn test_allows_view() {
        assert!(check(&MaterializedView::new(), GOOD_MODEL).is_empty());
    }

    #[test]
    fn test_detects_table() {
        let sql = "\n{{ config(materialized='table', tags=['oda']) }}";
        let violations = check(&MaterializedView::new(), sql);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CODE);
        assert_eq!(violations[0].line, Some(2));
    }

    #[test]
    fn test_missing_materialization_fails() {
        let violations = check(&MaterializedView::new(), "{{ config(tags=['oda']) }}");
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_skipped_without_config() {
        assert!(check(&MaterializedView::new(), "select 1").is_empty());
        assert!(check(&MaterializedView::new(), "{{ config(tags=['oda']").is_empty());
    }
}
