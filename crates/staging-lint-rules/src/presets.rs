//! Built-in rule sets.

use crate::{
    ColumnGrouping, ConfigBlock, CteOrder, CtePresence, FinalExplicitColumns, FinalSelect,
    LoadedAt, MaterializedView, SurrogateKey, TagsMissing, TagsSource, TagsStaging, TagsThird,
};
use staging_lint_core::RuleBox;

/// Returns the full staging battery in evaluation order.
///
/// The order fixes the order of violations within a report.
#[must_use]
pub fn staging_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ConfigBlock::new()),
        Box::new(MaterializedView::new()),
        Box::new(TagsMissing::new()),
        Box::new(TagsStaging::new()),
        Box::new(TagsThird::new()),
        Box::new(TagsSource::new()),
        Box::new(CtePresence::new()),
        Box::new(CteOrder::new()),
        Box::new(SurrogateKey::new()),
        Box::new(LoadedAt::new()),
        Box::new(FinalExplicitColumns::new()),
        Box::new(ColumnGrouping::new()),
        Box::new(FinalSelect::new()),
    ]
}

/// Returns all available rules.
///
/// Used for listing. Identical to [`staging_rules`] while the staging
/// battery is the only rule set.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    staging_rules()
}
