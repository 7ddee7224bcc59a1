//! Rule requiring a non-empty tags list in the config call.

use crate::common::suggested_tags;
use staging_lint_core::{ModelContext, Rule, Severity, Violation};

/// Rule code for tags-missing.
pub const CODE: &str = "TAGS_MISSING";

/// Rule name for tags-missing.
pub const NAME: &str = "tags-missing";

/// Requires `tags = [...]` with at least one element.
///
/// Skipped when the config call's arguments cannot be read.
#[derive(Debug, Clone)]
pub struct TagsMissing {
    severity: Severity,
}

impl Default for TagsMissing {
    fn default() -> Self {
        Self::new()
    }
}

impl TagsMissing {
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

impl Rule for TagsMissing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires tags in config()"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        let Some(config) = &ctx.config else {
            return Vec::new();
        };
        if !config.tags.is_empty() {
            return Vec::new();
        }

        vec![
            Violation::new(CODE, NAME, self.severity, "No tags defined in config().")
                .at_line(config.line)
                .with_remediation(format!("Add tags={} to config().", suggested_tags(ctx))),
        ]
    }
}
