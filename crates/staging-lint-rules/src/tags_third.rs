//! Rule checking the canonical third tag.

use crate::common::quoted_list;
use staging_lint_core::{ModelContext, Rule, Severity, Violation};

/// Rule code for tags-third.
pub const CODE: &str = "TAGS_THIRD";

/// Rule name for tags-third.
pub const NAME: &str = "tags-third";

/// Warns when a third tag exists and differs from the canonical value.
#[derive(Debug, Clone)]
pub struct TagsThird {
    severity: Severity,
}

impl Default for TagsThird {
    fn default() -> Self {
        Self::new()
    }
}

impl TagsThird {
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

impl Rule for TagsThird {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks the third tag against the canonical value"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        let Some(config) = &ctx.config else {
            return Vec::new();
        };
        let expected = &ctx.conventions.canonical_third_tag;
        let Some(third) = config.tags.get(2) else {
            return Vec::new();
        };
        if third == expected {
            return Vec::new();
        }

        let first = ctx
            .source_name
            .as_deref()
            .unwrap_or(config.tags[0].as_str());
        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            format!(
                "Third tag is '{third}', expected '{expected}'. Current tags: {}",
                quoted_list(&config.tags)
            ),
        )
        .at_line(config.line)
        .with_remediation(format!(
            "Use ['{first}', '{}', '{expected}'] for consistency.",
            ctx.conventions.required_tag
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, check_at, GOOD_MODEL};

    #[test]
    fn test_allows_canonical_third() {
        assert!(check(&TagsThird::new(), GOOD_MODEL).is_empty());
    }

    #[test]
    fn test_short_tag_lists_are_not_checked() {
        assert!(check(&TagsThird::new(), "{{ config(tags=['oda', 'staging']) }}").is_empty());
    }

    #[test]
    fn test_detects_other_third_tag() {
        let violations = check(&TagsThird::new(), "{{ config(tags=['oda', 'staging', 'acme']) }}");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(
            violations[0].message,
            "Third tag is 'acme', expected 'formentera'. Current tags: ['oda', 'staging', 'acme']"
        );
    }

    #[test]
    fn test_remediation_falls_back_to_first_tag() {
        let violations = check_at(
            &TagsThird::new(),
            "models/misc.sql",
            "{{ config(tags=['prodview', 'staging', 'acme']) }}",
        );
        assert_eq!(
            violations[0].remediation.as_deref(),
            Some("Use ['prodview', 'staging', 'formentera'] for consistency.")
        );
    }
}
