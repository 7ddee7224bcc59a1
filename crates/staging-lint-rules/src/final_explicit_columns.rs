//! Rule requiring an explicit column list in the `final` block.
//!
//! The `final` block is the model's output contract, so `select *` there
//! hides schema changes from downstream models.

use staging_lint_core::utils::{isolate_block, select_list};
use staging_lint_core::{ModelContext, Rule, Severity, Violation};

/// Rule code for final-explicit-columns.
pub const CODE: &str = "FINAL_EXPLICIT_COLUMNS";

/// Rule name for final-explicit-columns.
pub const NAME: &str = "final-explicit-columns";

/// Requires the `final` block's select list to name several columns.
///
/// The list passes when it is not `*` and contains a comma or a line
/// break. A `final` block that does not open with `select` fails.
#[derive(Debug, Clone)]
pub struct FinalExplicitColumns {
    severity: Severity,
}

impl Default for FinalExplicitColumns {
    fn default() -> Self {
        Self::new()
    }
}

impl FinalExplicitColumns {
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

impl Rule for FinalExplicitColumns {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids SELECT * in the final CTE"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        let Some(block) = ctx.block("final") else {
            return Vec::new();
        };
        let list = isolate_block(ctx.source.stripped(), "final").and_then(select_list);
        if list.is_some_and(is_explicit) {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            "'final' CTE uses SELECT * or has no explicit column list.",
        )
        .at_line(block.line)
        .with_remediation(
            "Replace SELECT * in final with an explicit, logically grouped column list. \
             This defines the model's output contract. See docs/conventions/staging.md (final CTE).",
        )]
    }
}

fn is_explicit(list: &str) -> bool {
    list != "*" && (list.contains(',') || list.contains('\n'))
}
