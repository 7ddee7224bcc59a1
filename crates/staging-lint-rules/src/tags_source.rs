//! Rule aligning the first tag with the source directory.

use staging_lint_core::{ModelContext, Rule, Severity, Violation};

/// Rule code for tags-source.
pub const CODE: &str = "TAGS_SOURCE";

/// Rule name for tags-source.
pub const NAME: &str = "tags-source";

/// Warns when the first tag differs from the tag expected for the model's
/// source directory.
///
/// Models outside a source directory are not checked.
#[derive(Debug, Clone)]
pub struct TagsSource {
    severity: Severity,
}

impl Default for TagsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TagsSource {
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

impl Rule for TagsSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks the first tag against the source directory"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        let Some(config) = &ctx.config else {
            return Vec::new();
        };
        let (Some(first), Some(expected)) = (config.tags.first(), ctx.expected_source_tag()) else {
            return Vec::new();
        };
        if first == expected {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            format!("First tag is '{first}', expected '{expected}' based on directory."),
        )
        .at_line(config.line)
        .with_remediation(format!(
            "Use '{expected}' as the first tag to match the source directory name."
        ))]
    }
}
