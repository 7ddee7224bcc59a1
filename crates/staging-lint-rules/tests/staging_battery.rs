//! Integration test: the full staging battery through the analyzer.

use proptest::prelude::*;
use staging_lint_core::{Analyzer, Config, FileReport};
use staging_lint_rules::staging_rules;
use std::path::Path;

const GOOD: &str = include_str!("fixtures/stg_oda__wells.sql");
const MODEL_PATH: &str = "/project/models/operations/staging/oda/stg_oda__wells.sql";
const BLOCKS: [&str; 5] = ["source", "renamed", "filtered", "enhanced", "final"];

fn analyzer() -> Analyzer {
    let mut builder = Analyzer::builder().root("/project").config(Config::default());
    for rule in staging_rules() {
        builder = builder.rule_box(rule);
    }
    builder.build().expect("analyzer should build")
}

fn lint(sql: &str) -> FileReport {
    analyzer().lint_source(Path::new(MODEL_PATH), sql)
}

fn codes(report: &FileReport) -> Vec<&str> {
    report.violations.iter().map(|v| v.code.as_str()).collect()
}

#[test]
fn well_formed_model_passes_cleanly() {
    let report = lint(GOOD);
    assert!(report.violations.is_empty(), "{:#?}", report.violations);
    assert!(report.passed());
    assert_eq!(report.path, "models/operations/staging/oda/stg_oda__wells.sql");
}

#[test]
fn swapped_blocks_yield_only_an_order_violation() {
    let sql = GOOD
        .replace("renamed as (", "swap_marker as (")
        .replace("filtered as (", "renamed as (")
        .replace("swap_marker as (", "filtered as (");
    let report = lint(&sql);
    assert_eq!(codes(&report), vec!["CTE_ORDER"]);
    assert!(!report.passed());
}

#[test]
fn bare_query_fails_config_and_pattern() {
    let report = lint("select * from raw_wells\n");
    assert_eq!(codes(&report), vec!["CONFIG_BLOCK", "CTE_PATTERN"]);
    assert_eq!(report.error_count(), 2);
    assert!(!report.passed());
}

#[test]
fn select_star_in_final_is_the_only_violation() {
    let start = GOOD.find("final as (").expect("fixture has a final block");
    let end = GOOD.rfind("select * from final").expect("fixture has a terminal select");
    let sql = format!(
        "{}final as (\n  select * from enhanced\n)\n\n{}",
        &GOOD[..start],
        &GOOD[end..]
    );
    let report = lint(&sql);
    assert_eq!(codes(&report), vec!["FINAL_EXPLICIT_COLUMNS"]);
}

#[test]
fn excluded_path_is_skipped_regardless_of_content() {
    let report = analyzer().lint_source(
        Path::new("/project/models/operations/staging/wiserock_tables/stg_x.sql"),
        "not a model at all",
    );
    assert!(report.skipped);
    assert!(report.violations.is_empty());
    assert!(report.passed());
}

#[test]
fn warnings_do_not_fail_a_model() {
    let sql = GOOD.replace("'formentera'", "'acme'");
    let report = lint(&sql);
    assert_eq!(codes(&report), vec!["TAGS_THIRD"]);
    assert!(report.passed());
    assert_eq!(report.warning_count(), 1);
}

#[test]
fn table_materialization_and_missing_tags() {
    let sql = GOOD.replace(
        "materialized='view',\n    tags=['oda', 'staging', 'formentera']",
        "materialized='table'",
    );
    let report = lint(&sql);
    assert_eq!(codes(&report), vec!["MATERIALIZED_VIEW", "TAGS_MISSING"]);
    assert!(report.violations.iter().all(|v| v.line == Some(1)));
}

#[test]
fn missing_enhanced_suppresses_its_body_checks() {
    let start = GOOD.find("enhanced as (").expect("fixture has an enhanced block");
    let end = GOOD.find("final as (").expect("fixture has a final block");
    let sql = format!("{}{}", &GOOD[..start], &GOOD[end..]);
    let report = lint(&sql);
    assert_eq!(codes(&report), vec!["CTE_MISSING_ENHANCED"]);
}

#[test]
fn directives_do_not_shift_line_numbers() {
    let sql = GOOD.replace(
        "with source as (",
        "{% set cols = [\n  'a',\n  'b'\n] %}\nwith source as (",
    );
    let sql = sql
        .replace("renamed as (", "swap_marker as (")
        .replace("filtered as (", "renamed as (")
        .replace("swap_marker as (", "filtered as (");
    let report = lint(&sql);
    assert_eq!(report.violations[0].code, "CTE_ORDER");
    assert_eq!(report.violations[0].line, Some(16));
}

fn model_with(present: &[&str]) -> String {
    let blocks: Vec<String> = present
        .iter()
        .map(|name| format!("{name} as (\n  select a, b from upstream\n)"))
        .collect();
    format!(
        "{{{{ config(materialized='view', tags=['oda', 'staging', 'formentera']) }}}}\n\nwith {}\n",
        blocks.join(",\n")
    )
}

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("with ".to_string()),
        Just("source as (".to_string()),
        Just("final as (".to_string()),
        Just("enhanced as (".to_string()),
        Just("),\n".to_string()),
        Just("select * from final\n".to_string()),
        Just("{{ config(materialized='view', tags=['oda']) }}".to_string()),
        Just("{% if x %}".to_string()),
        Just("-- identifiers\n".to_string()),
        Just("_loaded_at".to_string()),
        "[a-z_ ,()\n]{0,12}",
    ]
}

proptest! {
    #[test]
    fn battery_is_idempotent(parts in prop::collection::vec(fragment(), 0..24)) {
        let sql = parts.concat();
        let analyzer = analyzer();
        let first = analyzer.lint_source(Path::new(MODEL_PATH), &sql);
        let second = analyzer.lint_source(Path::new(MODEL_PATH), &sql);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn missing_blocks_reported_exactly_once_each(
        present in prop::sample::subsequence(BLOCKS.to_vec(), 0..=BLOCKS.len())
    ) {
        let report = lint(&model_with(&present));
        let missing: Vec<&str> = codes(&report)
            .into_iter()
            .filter(|c| c.starts_with("CTE_MISSING_") || *c == "CTE_PATTERN")
            .collect();

        if present.is_empty() {
            prop_assert_eq!(missing, vec!["CTE_PATTERN"]);
        } else {
            let expected: Vec<String> = BLOCKS
                .iter()
                .filter(|b| !present.contains(b))
                .map(|b| format!("CTE_MISSING_{}", b.to_uppercase()))
                .collect();
            prop_assert_eq!(missing, expected);
        }
    }
}
