//! Rule requiring the named blocks in canonical order.
//!
//! Only required blocks that are present are compared, so a missing block
//! is reported once by `cte-presence` and never again here.

use crate::common::quoted_list;
use staging_lint_core::utils::REQUIRED_BLOCKS;
use staging_lint_core::{ModelContext, Rule, Severity, Violation};

/// Rule code for cte-order.
pub const CODE: &str = "CTE_ORDER";

/// Rule name for cte-order.
pub const NAME: &str = "cte-order";

/// Requires present blocks to appear in canonical order.
#[derive(Debug, Clone)]
pub struct CteOrder {
    severity: Severity,
}

impl Default for CteOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl CteOrder {
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

impl Rule for CteOrder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires CTEs in the order source, renamed, filtered, enhanced, final"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        let actual: Vec<_> = ctx
            .blocks
            .iter()
            .filter(|b| REQUIRED_BLOCKS.contains(&b.name.as_str()))
            .collect();
        let expected: Vec<&str> = REQUIRED_BLOCKS
            .iter()
            .copied()
            .filter(|name| ctx.has_block(name))
            .collect();

        let actual_names: Vec<&str> = actual.iter().map(|b| b.name.as_str()).collect();
        if actual_names == expected {
            return Vec::new();
        }

        // First block that sits where another was expected.
        let line = actual
            .iter()
            .zip(&expected)
            .find(|(block, name)| block.name != **name)
            .or_else(|| actual.get(expected.len()).map(|b| (b, &"")))
            .map(|(block, _)| block.line);

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            format!(
                "CTEs are out of order. Found: {}, expected: {}.",
                quoted_list(&actual_names),
                quoted_list(&expected)
            ),
        )
        .at(line)
        .with_remediation(format!("Reorder CTEs to: {}.", REQUIRED_BLOCKS.join(" → ")))]
    }
}
