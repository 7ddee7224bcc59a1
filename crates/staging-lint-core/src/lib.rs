//! # staging-lint-core
//!
//! Core framework for structural linting of dbt staging models.
//!
//! Models are analyzed as text, not parsed. Template directives are blanked
//! out with equal-length whitespace so every offset, and therefore every
//! line number, still points into the original file. This crate provides:
//!
//! - [`SourceText`] and [`ModelContext`], the per-file facts rules read
//! - [`Rule`] trait for per-file structural rules
//! - [`Analyzer`] for running rules over many files in parallel
//! - [`FileReport`] and [`Violation`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use staging_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root(".")
//!     .rule(MyRule::new())
//!     .exclude("wiserock_tables")
//!     .build()?;
//!
//! let result = analyzer.analyze(&files)?;
//! assert!(!result.has_errors());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, Conventions, RuleConfig};
pub use context::{ModelContext, SourceText};
pub use rule::{Rule, RuleBox};
pub use types::{FileReport, LintResult, Severity, Summary, Violation};
