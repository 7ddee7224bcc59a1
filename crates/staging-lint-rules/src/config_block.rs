//! Rule requiring a `{{ config(...) }}` call.
//!
//! # Rationale
//!
//! Materialization and tags live in the config call. Without it the model
//! falls back to project defaults and drops out of tag-based selection.

use crate::common::suggested_tags;
use staging_lint_core::{ModelContext, Rule, Severity, Violation};

/// Rule code for config-block.
pub const CODE: &str = "CONFIG_BLOCK";

/// Rule name for config-block.
pub const NAME: &str = "config-block";

/// Requires a config call in the raw model text.
#[derive(Debug, Clone)]
pub struct ConfigBlock {
    severity: Severity,
}

impl Default for ConfigBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBlock {
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

impl Rule for ConfigBlock {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a {{ config(...) }} call"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        if ctx.config_line.is_some() {
            return Vec::new();
        }

        vec![
            Violation::new(CODE, NAME, self.severity, "Missing config() block.").with_remediation(
                format!(
                    "Add a config block at the top of the file:\n  {{{{ config(materialized='{}', tags={}) }}}}",
                    ctx.conventions.materialization,
                    suggested_tags(ctx)
                ),
            ),
        ]
    }
}
