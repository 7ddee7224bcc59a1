//! Rule requiring the model to end by selecting from a block.

use regex::Regex;
use staging_lint_core::utils::pattern::cached;
use staging_lint_core::{ModelContext, Rule, Severity, Violation};
use std::sync::OnceLock;

static TERMINAL_SELECT: OnceLock<Regex> = OnceLock::new();

/// Rule code for final-select.
pub const CODE: &str = "FINAL_SELECT";

/// Rule name for final-select.
pub const NAME: &str = "final-select";

/// Warns when no line of the form `select * from <name>` exists.
///
/// Runs only when a `final` block exists.
#[derive(Debug, Clone)]
pub struct FinalSelect {
    severity: Severity,
}

impl Default for FinalSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl FinalSelect {
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

impl Rule for FinalSelect {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a terminal 'select * from final'"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        if !ctx.has_block("final") {
            return Vec::new();
        }
        let terminal = cached(&TERMINAL_SELECT, r"(?im)^\s*select\s+\*\s+from\s+(\w+)\s*$");
        if terminal.is_match(ctx.source.stripped()) {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            "Model should end with 'select * from final'.",
        )
        .with_remediation("Add 'select * from final' as the last line.")]
    }
}
