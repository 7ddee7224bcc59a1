//! # staging-lint-rules
//!
//! Built-in structural rules for dbt staging models.
//!
//! ## Available Rules
//!
//! | Code | Name | Severity | Description |
//! |------|------|----------|-------------|
//! | `CONFIG_BLOCK` | `config-block` | error | Requires a `{{ config(...) }}` call |
//! | `MATERIALIZED_VIEW` | `materialized-view` | error | Requires `materialized='view'` |
//! | `TAGS_MISSING` | `tags-missing` | error | Requires a non-empty tags list |
//! | `TAGS_STAGING` | `tags-staging` | error | Requires the `staging` tag |
//! | `TAGS_THIRD` | `tags-third` | warning | Checks the third tag |
//! | `TAGS_SOURCE` | `tags-source` | warning | Checks the first tag against the directory |
//! | `CTE_PATTERN` | `cte-presence` | error | Requires the five named CTEs |
//! | `CTE_ORDER` | `cte-order` | error | Requires canonical CTE order |
//! | `SURROGATE_KEY` | `surrogate-key` | warning | Requires a surrogate key in `enhanced` |
//! | `LOADED_AT` | `loaded-at` | warning | Requires `_loaded_at` in `enhanced` |
//! | `FINAL_EXPLICIT_COLUMNS` | `final-explicit-columns` | error | Forbids `select *` in `final` |
//! | `COLUMN_GROUPING` | `column-grouping` | warning | Requires column group comments |
//! | `FINAL_SELECT` | `final-select` | warning | Requires a terminal `select * from final` |
//!
//! `cte-presence` reports each missing block under its own code,
//! `CTE_MISSING_<NAME>`.
//!
//! ## Usage
//!
//! ```ignore
//! use staging_lint_core::Analyzer;
//! use staging_lint_rules::staging_rules;
//!
//! let mut builder = Analyzer::builder().root(".");
//! for rule in staging_rules() {
//!     builder = builder.rule_box(rule);
//! }
//! let analyzer = builder.build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod column_grouping;
mod common;
mod config_block;
mod cte_order;
mod cte_presence;
mod final_explicit_columns;
mod final_select;
mod loaded_at;
mod materialized_view;
mod presets;
mod surrogate_key;
mod tags_missing;
mod tags_source;
mod tags_staging;
mod tags_third;

#[cfg(test)]
mod test_support;

pub use column_grouping::ColumnGrouping;
pub use config_block::ConfigBlock;
pub use cte_order::CteOrder;
pub use cte_presence::CtePresence;
pub use final_explicit_columns::FinalExplicitColumns;
pub use final_select::FinalSelect;
pub use loaded_at::LoadedAt;
pub use materialized_view::MaterializedView;
pub use presets::{all_rules, staging_rules};
pub use surrogate_key::SurrogateKey;
pub use tags_missing::TagsMissing;
pub use tags_source::TagsSource;
pub use tags_staging::TagsStaging;
pub use tags_third::TagsThird;

/// Re-export core types for convenience.
pub use staging_lint_core::{Rule, Severity, Violation};
