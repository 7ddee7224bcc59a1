//! Rule trait for defining structural lint rules.

use crate::context::ModelContext;
use crate::types::{Severity, Violation};

/// A per-file structural rule.
///
/// Rules receive a [`ModelContext`] holding the raw and stripped text plus
/// everything extracted from them, and return zero or more violations.
/// Rules never fail: a heuristic that finds nothing either skips the check
/// or reports the missing pattern.
///
/// # Example
///
/// ```ignore
/// use staging_lint_core::{ModelContext, Rule, Severity, Violation};
///
/// pub struct NoUnionAll;
///
/// impl Rule for NoUnionAll {
///     fn name(&self) -> &'static str { "no-union-all" }
///     fn code(&self) -> &'static str { "NO_UNION_ALL" }
///
///     fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
///         if ctx.source.stripped().to_lowercase().contains("union all") {
///             vec![Violation::new(self.code(), self.name(), Severity::Warning, "union all found")]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "cte-order").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CTE_ORDER").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single model and returns any violations found.
    fn check(&self, ctx: &ModelContext) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Conventions;
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &ModelContext) -> Vec<Violation> {
            if ctx.blocks.is_empty() {
                vec![Violation::new(
                    self.code(),
                    self.name(),
                    self.default_severity(),
                    "Test violation",
                )]
            } else {
                vec![]
            }
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);
    }

    #[test]
    fn test_rule_sees_context() {
        let conventions = Conventions::default();
        let ctx = ModelContext::new(Path::new("m.sql"), "select 1", Path::new("."), &conventions);
        assert_eq!(TestRule.check(&ctx).len(), 1);
    }
}
