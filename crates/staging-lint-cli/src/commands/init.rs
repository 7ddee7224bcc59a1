//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "staging-lint.toml";

const DEFAULT_CONFIG: &str = r#"# staging-lint configuration

[analyzer]
# Project root, relative to this file; reported paths are relative to it
# root = "."

# Directories searched when no paths are given
paths = ["models/operations/staging"]

# Path substrings or glob patterns to skip
exclude = ["wiserock_tables"]

# Worker threads (default: one per CPU)
# parallelism = 4

[conventions]
materialization = "view"
required_tag = "staging"
canonical_third_tag = "formentera"
# Directory whose child names the source system
anchor_dir = "staging"

# Expected first tag when it differs from the source directory name
[conventions.source_tags]
# prodview_v2 = "prodview"

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

# [rules.surrogate-key]
# enabled = false

# [rules.final-select]
# severity = "error"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_default(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to match your project conventions");
    println!("  2. Run: staging-lint check");

    Ok(())
}

fn write_default(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
