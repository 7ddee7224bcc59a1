//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::ModelContext;
use crate::rule::{Rule, RuleBox};
use crate::types::{FileReport, LintResult, Severity, Violation};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error resolving the project root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A model file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    parallelism: Option<usize>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the project root.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude pattern (path substring or glob).
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Caps the number of files analyzed at once.
    #[must_use]
    pub fn parallelism(mut self, workers: usize) -> Self {
        self.parallelism = Some(workers);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or the
    /// worker pool cannot be created.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        // Merge exclude patterns from config
        let mut exclude_patterns = self.exclude_patterns;
        if let Some(ref config) = self.config {
            exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        }

        let parallelism = self
            .parallelism
            .or_else(|| self.config.as_ref().and_then(|c| c.analyzer.parallelism));
        let pool = match parallelism {
            Some(n) if n > 0 => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
            _ => None,
        };

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
            config: self.config.unwrap_or_default(),
            pool,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Each file is evaluated independently. [`Analyzer::analyze`] spreads the
/// files over a worker pool and returns reports in input order.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Config,
    pool: Option<rayon::ThreadPool>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes `files` and returns one report per file, in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read. Missing files
    /// are reported as violations instead.
    pub fn analyze(&self, files: &[PathBuf]) -> Result<LintResult, AnalyzerError> {
        info!("Analyzing {} files under {:?}", files.len(), self.root);

        let run = || {
            files
                .par_iter()
                .map(|path| self.lint_file(path))
                .collect::<Result<Vec<_>, _>>()
        };
        let reports = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }?;

        let result = LintResult { reports };
        let summary = result.summary();
        info!(
            "Analysis complete: {} passed, {} failed, {} skipped",
            summary.passed, summary.failed, summary.skipped
        );

        Ok(result)
    }

    /// Reads and analyzes a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read. Bytes that
    /// are not valid UTF-8 are replaced, never an error.
    pub fn lint_file(&self, path: &Path) -> Result<FileReport, AnalyzerError> {
        if let Some(pattern) = self.excluded_by(path) {
            debug!("Excluding: {}", path.display());
            return Ok(skipped_report(self.display_path(path), pattern));
        }

        match std::fs::read(path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                if matches!(content, std::borrow::Cow::Owned(_)) {
                    debug!("Replaced invalid UTF-8 in {}", path.display());
                }
                Ok(self.lint_source(path, &content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let display = self.display_path(path);
                let violation = Violation::new(
                    "FILE_EXISTS",
                    "file-exists",
                    Severity::Error,
                    format!("File not found: {display}"),
                );
                Ok(FileReport {
                    violations: vec![violation],
                    ..FileReport::new(display)
                })
            }
            Err(e) => Err(AnalyzerError::Read {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Analyzes already-loaded text as if it were read from `path`.
    #[must_use]
    pub fn lint_source(&self, path: &Path, content: &str) -> FileReport {
        let display = self.display_path(path);
        if let Some(pattern) = self.excluded_by(path) {
            return skipped_report(display, pattern);
        }

        debug!("Analyzing: {}", path.display());
        let ctx = ModelContext::new(path, content, &self.root, &self.config.conventions);
        let mut report = FileReport::new(display);

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let violations = rule.check(&ctx);
            let violations = self.apply_severity_override(rule.name(), violations);
            report.violations.extend(violations);
        }

        report
    }

    /// Returns the first exclude pattern matching `path`.
    ///
    /// A pattern matches when it occurs as a substring of the path, or when
    /// it is a glob matching the whole path.
    #[must_use]
    pub fn excluded_by(&self, path: &Path) -> Option<&str> {
        let path_str = path.to_string_lossy();

        self.exclude_patterns
            .iter()
            .find(|pattern| {
                if glob::Pattern::new(pattern).is_ok_and(|g| g.matches(&path_str)) {
                    return true;
                }
                let normalized_pattern = pattern.replace("**", "");
                !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern)
            })
            .map(String::as_str)
    }

    /// Path as shown in reports, relative to the root when possible.
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }
}

fn skipped_report(display: String, pattern: &str) -> FileReport {
    FileReport::skipped(display, format!("Excluded by pattern: {pattern}"))
}
