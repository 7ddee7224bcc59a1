//! Rule requiring the staging marker tag.

use crate::common::quoted_list;
use staging_lint_core::{ModelContext, Rule, Severity, Violation};

/// Rule code for tags-staging.
pub const CODE: &str = "TAGS_STAGING";

/// Rule name for tags-staging.
pub const NAME: &str = "tags-staging";

/// Requires the configured staging tag among the model's tags.
///
/// Runs only when the tags list is non-empty.
#[derive(Debug, Clone)]
pub struct TagsStaging {
    severity: Severity,
}

impl Default for TagsStaging {
    fn default() -> Self {
        Self::new()
    }
}

impl TagsStaging {
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

impl Rule for TagsStaging {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires the 'staging' tag"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        let Some(config) = &ctx.config else {
            return Vec::new();
        };
        let required = &ctx.conventions.required_tag;
        if config.tags.is_empty() || config.tags.contains(required) {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            format!("Tags {} missing '{required}'.", quoted_list(&config.tags)),
        )
        .at_line(config.line)
        .with_remediation(format!("Include '{required}' in the tags list."))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, GOOD_MODEL};

    #[test]
    fn test_allows_staging_anywhere() {
        assert!(check(&TagsStaging::new(), GOOD_MODEL).is_empty());
        assert!(check(&TagsStaging::new(), "{{ config(tags=['staging']) }}").is_empty());
    }

    #[test]
    fn test_detects_missing_staging() {
        let violations = check(&TagsStaging::new(), "{{ config(tags=['oda', 'formentera']) }}");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Tags ['oda', 'formentera'] missing 'staging'.");
    }

    #[test]
    fn test_empty_tags_left_to_tags_missing() {
        assert!(check(&TagsStaging::new(), "{{ config(tags=[]) }}").is_empty());
    }
}
