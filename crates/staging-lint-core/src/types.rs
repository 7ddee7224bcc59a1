//! Core types for lint violations and per-file reports.

use serde::{Deserialize, Serialize};

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning that should be addressed but does not fail the file.
    Warning,
    /// Error that must be fixed before merging.
    Error,
}

impl Severity {
    /// Glyph used by the human-readable report.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Warning => "⚠",
            Self::Error => "✗",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single structural finding with remediation guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "CTE_ORDER").
    pub code: String,
    /// Rule name (e.g., "cte-order").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Line number (1-indexed), when the finding has a meaningful location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// How to fix it. May span several lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl Violation {
    /// Creates a new violation without location or remediation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            message: message.into(),
            line: None,
            remediation: None,
        }
    }

    /// Attaches a 1-indexed line number.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attaches an optional line number.
    #[must_use]
    pub fn at(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    /// Adds remediation guidance to this violation.
    #[must_use]
    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }

    /// Returns true for error-severity violations.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.severity, self.code)?;
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        write!(f, " {}", self.message)
    }
}

/// Result of validating a single model file.
///
/// Pass/fail and the severity counts are derived from `violations` on every
/// call and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// Path as displayed to the user (relative to the project root when possible).
    pub path: String,
    /// Violations in rule-evaluation order.
    pub violations: Vec<Violation>,
    /// Whether the file was excluded from validation.
    pub skipped: bool,
    /// Why the file was excluded. Empty when not skipped.
    pub skip_reason: String,
}

impl FileReport {
    /// Creates an empty report for `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Creates a skipped report carrying `reason`.
    #[must_use]
    pub fn skipped(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            violations: Vec::new(),
            skipped: true,
            skip_reason: reason.into(),
        }
    }

    /// True when no violation has error severity.
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.violations.iter().any(Violation::is_error)
    }

    /// Number of error-severity violations.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.violations.iter().filter(|v| v.is_error()).count()
    }

    /// Number of warning-severity violations.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count()
    }
}

/// Aggregate counts over a set of reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Reports in the run, skipped included.
    pub total: usize,
    /// Non-skipped reports that passed.
    pub passed: usize,
    /// Non-skipped reports that failed.
    pub failed: usize,
    /// Skipped reports.
    pub skipped: usize,
    /// Error-severity violations across all reports.
    pub errors: usize,
    /// Warning-severity violations across all reports.
    pub warnings: usize,
}

impl Summary {
    /// Reports that were actually evaluated.
    #[must_use]
    pub fn checked(&self) -> usize {
        self.total - self.skipped
    }
}

/// Result of running the analyzer over a file list.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// One report per input file, in input order.
    pub reports: Vec<FileReport>,
}

impl LintResult {
    /// Returns true if any evaluated report failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(|r| !r.skipped && !r.passed())
    }

    /// Computes the aggregate counts.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            total: self.reports.len(),
            ..Summary::default()
        };
        for report in &self.reports {
            if report.skipped {
                summary.skipped += 1;
            } else if report.passed() {
                summary.passed += 1;
            } else {
                summary.failed += 1;
            }
            summary.errors += report.error_count();
            summary.warnings += report.warning_count();
        }
        summary
    }

    /// Violation counts grouped by code, most frequent first.
    ///
    /// Ties keep the order in which each code was first seen.
    #[must_use]
    pub fn counts_by_code(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for v in self.reports.iter().flat_map(|r| &r.violations) {
            match counts.iter_mut().find(|(code, _)| *code == v.code) {
                Some((_, n)) => *n += 1,
                None => counts.push((v.code.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}
