//! Rule requiring the five named blocks of a staging model.
//!
//! # Rationale
//!
//! Every staging model follows the same `source → renamed → filtered →
//! enhanced → final` shape so reviewers know where each kind of logic lives.
//!
//! # Detected Patterns
//!
//! - No named blocks at all: one `CTE_PATTERN` violation
//! - Some blocks present: one `CTE_MISSING_<NAME>` violation per absent block

use staging_lint_core::utils::REQUIRED_BLOCKS;
use staging_lint_core::{ModelContext, Rule, Severity, Violation};
use tracing::debug;

/// Rule code for cte-presence when no blocks are found.
pub const CODE: &str = "CTE_PATTERN";

/// Rule name for cte-presence.
pub const NAME: &str = "cte-presence";

/// Requires every block in [`REQUIRED_BLOCKS`].
#[derive(Debug, Clone)]
pub struct CtePresence {
    severity: Severity,
}

impl Default for CtePresence {
    fn default() -> Self {
        Self::new()
    }
}

impl CtePresence {
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

impl Rule for CtePresence {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires the source, renamed, filtered, enhanced and final CTEs"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        if ctx.blocks.is_empty() {
            debug!("No named blocks in {}", ctx.relative_path.display());
            return vec![Violation::new(
                CODE,
                NAME,
                self.severity,
                "No CTEs found. Staging models must use the 5-CTE pattern.",
            )
            .with_remediation(format!(
                "Structure the model with: {}. See docs/conventions/staging.md.",
                REQUIRED_BLOCKS.join(", ")
            ))];
        }

        REQUIRED_BLOCKS
            .iter()
            .filter(|name| !ctx.has_block(name))
            .map(|name| {
                Violation::new(
                    format!("CTE_MISSING_{}", name.to_uppercase()),
                    NAME,
                    self.severity,
                    format!("Missing required CTE: '{name}'."),
                )
                .with_remediation(remediation(name))
            })
            .collect()
    }
}

/// What a missing block is for.
fn remediation(name: &str) -> String {
    let guidance = match name {
        "source" => {
            "Add a 'source' CTE that pulls from {{ source() }} with deduplication if needed. \
             See docs/conventions/staging.md (source CTE)."
        }
        "renamed" => {
            "Add a 'renamed' CTE for column renaming, type casting, and trimming. \
             No filtering or logic. See docs/conventions/staging.md (renamed CTE)."
        }
        "filtered" => {
            "Add a 'filtered' CTE to remove soft deletes and null PKs. \
             Fivetran: coalesce(_fivetran_deleted, false) = false. \
             Estuary: _operation_type != 'd'. See docs/conventions/staging.md (filtered CTE)."
        }
        "enhanced" => {
            "Add an 'enhanced' CTE with surrogate key, computed flags, and _loaded_at. \
             Keep it light. See docs/conventions/staging.md (enhanced CTE)."
        }
        "final" => {
            "Add a 'final' CTE with an explicit column list grouped by category. \
             This is the output contract. See docs/conventions/staging.md (final CTE)."
        }
        other => return format!("Add the '{other}' CTE per docs/conventions/staging.md."),
    };
    guidance.to_string()
}
