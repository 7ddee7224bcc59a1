//! Fixtures shared by rule tests.

use staging_lint_core::{Conventions, ModelContext, Rule, Violation};
use std::path::Path;

/// Path of a model under the `oda` source directory.
pub const ODA_PATH: &str = "models/operations/staging/oda/stg_oda__wells.sql";

/// A model that satisfies every built-in rule.
pub const GOOD_MODEL: &str = r"{{
  config(
    materialized='view',
    tags=['oda', 'staging', 'formentera']
  )
}}

with source as (
  select * from {{ source('oda', 'wells') }}
),

renamed as (
  select
    -- identifiers
    well_id as id,
    -- dates
    cast(spud_date as date) as spud_date,
    -- descriptive
    trim(well_name) as well_name
  from source
),

filtered as (
  select * from renamed
  where coalesce(_fivetran_deleted, false) = false
),

enhanced as (
  select
    *,
    {{ dbt_utils.generate_surrogate_key(['id']) }} as well_sk,
    current_timestamp() as _loaded_at
  from filtered
),

final as (
  select
    -- identifiers
    well_sk,
    id,
    -- descriptive
    well_name,
    -- dates
    spud_date,
    _loaded_at
  from enhanced
)

select * from final
";

/// Runs `rule` against `sql` as if it lived at `path`.
pub fn check_at(rule: &dyn Rule, path: &str, sql: &str) -> Vec<Violation> {
    let conventions = Conventions::default();
    let ctx = ModelContext::new(Path::new(path), sql, Path::new("."), &conventions);
    rule.check(&ctx)
}

/// Runs `rule` against `sql` under the `oda` source directory.
pub fn check(rule: &dyn Rule, sql: &str) -> Vec<Violation> {
    check_at(rule, ODA_PATH, sql)
}
