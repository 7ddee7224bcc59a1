//! Report rendering.
//!
//! Renderers are pure and return the whole report as one string so the
//! caller decides where it goes.

use anyhow::Result;
use serde::Serialize;
use staging_lint_core::{FileReport, LintResult, Severity, Summary, Violation};

use crate::OutputFormat;

/// Rendering switches shared by all formats.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Include remediation lines in text output.
    pub remediation: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { remediation: true }
    }
}

/// Renders `result` in the requested format.
pub fn render(result: &LintResult, format: OutputFormat, options: RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result, options)),
        OutputFormat::Json => render_json(result),
        OutputFormat::Summary => Ok(render_summary(result)),
    }
}

/// Per-file findings framed by a count header and a verdict line.
pub fn render_text(result: &LintResult, options: RenderOptions) -> String {
    let summary = result.summary();
    let mut lines = vec![format!(
        "Staging Validator: {} checked, {} passed, {} errors, {} warnings, {} skipped",
        summary.checked(),
        summary.passed,
        summary.errors,
        summary.warnings,
        summary.skipped
    )];

    // Without remediation the listing is terse: warning-only files are
    // counted as passed and not shown.
    for report in result
        .reports
        .iter()
        .filter(|r| !r.skipped && !r.violations.is_empty())
        .filter(|r| options.remediation || !r.passed())
    {
        let status = if report.passed() { "WARN" } else { "FAIL" };
        lines.push(format!("\n{status}: {}", report.path));
        for v in &report.violations {
            lines.push(violation_line(v));
            if let Some(remediation) = v.remediation.as_deref().filter(|_| options.remediation) {
                lines.extend(remediation.lines().map(|l| format!("    → {l}")));
            }
        }
    }

    if summary.errors == 0 {
        lines.push(format!("\n✓ All {} checked models pass.", summary.checked()));
    } else {
        lines.push(format!(
            "\n✗ {} error(s) across {} file(s). Fix errors before merging.",
            summary.errors, summary.failed
        ));
    }

    lines.join("\n")
}

fn violation_line(v: &Violation) -> String {
    let location = v.line.map(|l| format!(" (line {l})")).unwrap_or_default();
    format!("  {} [{}]{location} {}", v.severity.glyph(), v.code, v.message)
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    files: Vec<JsonFile<'a>>,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a str,
    passed: bool,
    skipped: bool,
    skip_reason: Option<&'a str>,
    violations: Vec<JsonViolation<'a>>,
}

#[derive(Serialize)]
struct JsonViolation<'a> {
    rule: &'a str,
    severity: Severity,
    message: &'a str,
    line: Option<usize>,
    remediation: Option<&'a str>,
}

impl<'a> From<&'a FileReport> for JsonFile<'a> {
    fn from(report: &'a FileReport) -> Self {
        Self {
            path: &report.path,
            passed: report.passed(),
            skipped: report.skipped,
            skip_reason: Some(report.skip_reason.as_str()).filter(|r| !r.is_empty()),
            violations: report
                .violations
                .iter()
                .map(|v| JsonViolation {
                    rule: &v.code,
                    severity: v.severity,
                    message: &v.message,
                    line: v.line,
                    remediation: v.remediation.as_deref(),
                })
                .collect(),
        }
    }
}

/// Summary counts plus every file that failed or has findings.
pub fn render_json(result: &LintResult) -> Result<String> {
    let output = JsonOutput {
        summary: result.summary(),
        files: result
            .reports
            .iter()
            .filter(|r| !r.passed() || !r.violations.is_empty())
            .map(JsonFile::from)
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Pass/fail tally and violation counts per rule code.
pub fn render_summary(result: &LintResult) -> String {
    let summary = result.summary();
    let mut lines = vec![
        format!(
            "Staging Validator Summary: {} models checked",
            summary.checked()
        ),
        format!(
            "  ✓ {} pass  |  ✗ {} fail  |  ⊘ {} skipped",
            summary.passed, summary.failed, summary.skipped
        ),
        String::new(),
        "Violations by rule:".to_string(),
    ];
    lines.extend(
        result
            .counts_by_code()
            .into_iter()
            .map(|(code, count)| format!("  {count:>4}  {code}")),
    );
    lines.join("\n")
}
