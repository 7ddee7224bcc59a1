//! Rule requiring a load timestamp in the `enhanced` block.

use staging_lint_core::utils::isolate_block;
use staging_lint_core::{ModelContext, Rule, Severity, Violation};

/// Audit column every staging model exposes.
const MARKER: &str = "_loaded_at";

/// Rule code for loaded-at.
pub const CODE: &str = "LOADED_AT";

/// Rule name for loaded-at.
pub const NAME: &str = "loaded-at";

/// Warns when the `enhanced` block never mentions `_loaded_at`.
///
/// The match is case-sensitive. Skipped when there is no `enhanced` block.
#[derive(Debug, Clone)]
pub struct LoadedAt {
    severity: Severity,
}

impl Default for LoadedAt {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadedAt {
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

impl Rule for LoadedAt {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires _loaded_at in the enhanced CTE"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        let Some(block) = ctx.block("enhanced") else {
            return Vec::new();
        };
        let region = isolate_block(ctx.source.raw(), "enhanced").unwrap_or_default();
        if region.contains(MARKER) {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            format!("No '{MARKER}' timestamp in 'enhanced' CTE."),
        )
        .at_line(block.line)
        .with_remediation(format!(
            "Add to the enhanced CTE:\n  current_timestamp() as {MARKER}"
        ))]
    }
}
