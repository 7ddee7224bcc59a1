//! Check command implementation.

use anyhow::{Context, Result};
use clap::Args;
use staging_lint_core::{Analyzer, Config};
use staging_lint_rules::staging_rules;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::discover;
use super::output::{self, RenderOptions};
use crate::config_resolver::{self, ConfigSource};
use crate::{OutputFormat, EXIT_USAGE};

/// Arguments of `staging-lint check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Model files or directories to validate (default: configured staging directories)
    pub paths: Vec<PathBuf>,

    /// Only validate models changed relative to origin/main
    #[arg(long, conflicts_with = "paths")]
    pub changed: bool,

    /// Project root (default: from config, else current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Omit remediation guidance from text output
    #[arg(long)]
    pub no_remediation: bool,
}

/// Runs the check command.
pub fn run(args: &CheckArgs, explicit_config: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    let start = args.root.as_ref().map_or_else(|| cwd.clone(), |root| cwd.join(root));
    let source = config_resolver::resolve(&start, explicit_config);
    tracing::debug!("Configuration: {source}");
    let mut config = load_config(&source)?;
    if let ConfigSource::Explicit(path) | ConfigSource::Project(path) = &source {
        anchor_root(&mut config, path);
    }

    let mut builder = Analyzer::builder().config(config);
    if let Some(root) = &args.root {
        builder = builder.root(root);
    }
    for rule in staging_rules() {
        builder = builder.rule_box(rule);
    }
    let analyzer = builder.build().context("Failed to build analyzer")?;
    let root = analyzer.root().to_path_buf();
    let search_dirs = &analyzer.config().analyzer.paths;

    let files = if args.changed {
        match discover::changed_files(&root, search_dirs) {
            Some(files) if files.is_empty() => {
                println!("No changed staging models found.");
                return Ok(ExitCode::SUCCESS);
            }
            Some(files) => files,
            None => {
                tracing::warn!("git not available, falling back to all staging models");
                discover::default_files(&root, search_dirs)?
            }
        }
    } else if args.paths.is_empty() {
        discover::default_files(&root, search_dirs)?
    } else {
        discover::explicit_files(&root, &args.paths)?
    };

    if files.is_empty() {
        eprintln!("No staging models found to validate.");
        return Ok(ExitCode::from(EXIT_USAGE));
    }

    tracing::info!(
        "Validating {} models with {} rules",
        files.len(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze(&files).context("Analysis failed")?;

    let options = RenderOptions {
        remediation: !args.no_remediation,
    };
    println!("{}", output::render(&result, args.format, options)?);

    if result.has_errors() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if matches!(other, ConfigSource::Global(_)) {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// Makes a relative `[analyzer].root` relative to the file that set it.
fn anchor_root(config: &mut Config, config_path: &Path) {
    if config.analyzer.root.is_relative() {
        if let Some(dir) = config_path.parent() {
            config.analyzer.root = dir.join(&config.analyzer.root);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_defaults_without_file() {
        let config = load_config(&ConfigSource::Default).unwrap();
        assert_eq!(config.conventions.required_tag, "staging");
    }

    #[test]
    fn load_config_reads_project_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("staging-lint.toml");
        fs::write(&path, "[analyzer]\nexclude = [\"legacy\"]\n").unwrap();

        let config = load_config(&ConfigSource::Project(path)).unwrap();
        assert_eq!(config.analyzer.exclude, vec!["legacy"]);
    }

    #[test]
    fn load_config_reports_missing_explicit_file() {
        let err = load_config(&ConfigSource::Explicit(PathBuf::from("/nonexistent.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn relative_root_follows_config_file() {
        let mut config = Config::parse("[analyzer]\nroot = \"warehouse\"\n").unwrap();
        anchor_root(&mut config, Path::new("/repo/staging-lint.toml"));
        assert_eq!(config.analyzer.root, PathBuf::from("/repo/warehouse"));

        let mut config = Config::parse("[analyzer]\nroot = \"/abs\"\n").unwrap();
        anchor_root(&mut config, Path::new("/repo/staging-lint.toml"));
        assert_eq!(config.analyzer.root, PathBuf::from("/abs"));
    }
}
