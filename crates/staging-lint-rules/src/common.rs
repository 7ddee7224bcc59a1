//! Message helpers shared by several rules.

use staging_lint_core::ModelContext;

/// Source name for suggestions, falling back to a placeholder.
pub(crate) fn source_or_placeholder<'a>(ctx: &'a ModelContext) -> &'a str {
    ctx.source_name.as_deref().unwrap_or("source")
}

/// Tag list a model in this directory is expected to declare.
pub(crate) fn suggested_tags(ctx: &ModelContext) -> String {
    let conventions = ctx.conventions;
    let first = ctx
        .expected_source_tag()
        .unwrap_or_else(|| source_or_placeholder(ctx));
    format!(
        "['{first}', '{}', '{}']",
        conventions.required_tag, conventions.canonical_third_tag
    )
}

/// Formats names as a bracketed, single-quoted list.
pub(crate) fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    let inner: Vec<String> = items
        .iter()
        .map(|s| format!("'{}'", s.as_ref()))
        .collect();
    format!("[{}]", inner.join(", "))
}
