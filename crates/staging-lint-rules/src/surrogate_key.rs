//! Rule requiring a surrogate key in the `enhanced` block.
//!
//! The block is read from the raw text, since the usual marker is a
//! `generate_surrogate_key` macro call that stripping would remove.

use regex::Regex;
use staging_lint_core::utils::isolate_block;
use staging_lint_core::utils::pattern::cached;
use staging_lint_core::{ModelContext, Rule, Severity, Violation};
use std::sync::OnceLock;

static MARKER: OnceLock<Regex> = OnceLock::new();

fn marker() -> &'static Regex {
    cached(&MARKER, r"(?i)generate_surrogate_key|surrogate_key|_sk\b")
}

/// Rule code for surrogate-key.
pub const CODE: &str = "SURROGATE_KEY";

/// Rule name for surrogate-key.
pub const NAME: &str = "surrogate-key";

/// Warns when the `enhanced` block has no surrogate-key marker.
///
/// Skipped when there is no `enhanced` block.
#[derive(Debug, Clone)]
pub struct SurrogateKey {
    severity: Severity,
}

impl Default for SurrogateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl SurrogateKey {
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

impl Rule for SurrogateKey {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a surrogate key in the enhanced CTE"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
        let Some(block) = ctx.block("enhanced") else {
            return Vec::new();
        };
        let region = isolate_block(ctx.source.raw(), "enhanced").unwrap_or_default();
        if marker().is_match(region) {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            "No surrogate key found in 'enhanced' CTE.",
        )
        .at_line(block.line)
        .with_remediation(
            "Add a surrogate key in enhanced:\n  {{ dbt_utils.generate_surrogate_key(['primary_key']) }} as entity_sk",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, GOOD_MODEL};

    #[test]
    fn test_allows_macro_call() {
        assert!(check(&SurrogateKey::new(), GOOD_MODEL).is_empty());
    }

    #[test]
    fn test_allows_sk_suffix() {
        let sql = "with enhanced as (\n  select md5(id) as WELL_SK\n  from x\n)";
        assert!(check(&SurrogateKey::new(), sql).is_empty());
    }

    #[test]
    fn test_detects_missing_key() {
        let sql = GOOD_MODEL.replace(
            "{{ dbt_utils.generate_surrogate_key(['id']) }} as well_sk,",
            "id as well_id,",
        );
        let violations = check(&SurrogateKey::new(), &sql);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(violations[0].line, Some(28));
    }

    #[test]
    fn test_key_in_other_block_does_not_count() {
        let sql = "with renamed as (\n  select id as well_sk\n),\nenhanced as (\n  select * from renamed\n),\nfinal as (\n  select a, b from enhanced\n)";
        assert_eq!(check(&SurrogateKey::new(), sql).len(), 1);
    }

    #[test]
    fn test_skipped_without_enhanced() {
        assert!(check(&SurrogateKey::new(), "with source as (select 1)").is_empty());
    }
}
