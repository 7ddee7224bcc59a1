//! Locating the configuration file for a run.
//!
//! Lookup order:
//!
//! 1. `--config <path>`, taken as-is
//! 2. `staging-lint.toml` or `.staging-lint.toml` in the start directory or
//!    any ancestor, stopping at the dbt project root (the first directory
//!    holding `dbt_project.yml`)
//! 3. `config.toml` in `$STAGING_LINT_CONFIG_DIR`, else in `~/.staging-lint/`
//! 4. Built-in defaults

use std::fmt;
use std::path::{Path, PathBuf};

/// Project-level file names, preferred in this order within one directory.
const PROJECT_CONFIG_NAMES: [&str; 2] = ["staging-lint.toml", ".staging-lint.toml"];

/// Marks the top of a dbt project; the upward search ends there.
const DBT_PROJECT_FILE: &str = "dbt_project.yml";

const GLOBAL_CONFIG_NAME: &str = "config.toml";
const GLOBAL_DIR_ENV: &str = "STAGING_LINT_CONFIG_DIR";

/// Where the configuration for this run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to the models, in the start directory or above it.
    Project(PathBuf),
    /// Per-user fallback.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// File to load, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::Project(p) => write!(f, "{} (project)", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Default => write!(f, "built-in defaults"),
        }
    }
}

/// Resolves the configuration for a run started in `start`.
#[must_use]
pub fn resolve(start: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with_global(start, explicit, global_config_dir().as_deref())
}

fn resolve_with_global(start: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(path) = find_project_config(start) {
        return ConfigSource::Project(path);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|path| path.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// Nearest project config at or above `start`, within the dbt project.
fn find_project_config(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let found = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());
        if found.is_some() {
            return found;
        }
        if dir.join(DBT_PROJECT_FILE).is_file() {
            tracing::debug!("Reached dbt project root {}", dir.display());
            return None;
        }
    }
    None
}

/// Per-user configuration directory.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os(GLOBAL_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home::home_dir().map(|home| home.join(".staging-lint")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn explicit_path_is_trusted_without_checking() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("staging-lint.toml"));

        let explicit = Path::new("/nonexistent/staging-lint.toml");
        assert_eq!(
            resolve_with_global(tmp.path(), Some(explicit), None),
            ConfigSource::Explicit(explicit.to_path_buf())
        );
    }

    #[test]
    fn plain_name_wins_over_hidden_name() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("staging-lint.toml"));
        write(&tmp.path().join(".staging-lint.toml"));

        assert_eq!(
            resolve_with_global(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("staging-lint.toml"))
        );
    }

    #[test]
    fn found_in_ancestor_of_model_directory() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("warehouse/dbt_project.yml"));
        write(&tmp.path().join("warehouse/.staging-lint.toml"));
        let start = tmp.path().join("warehouse/models/operations/staging");
        fs::create_dir_all(&start).unwrap();

        assert_eq!(
            resolve_with_global(&start, None, None),
            ConfigSource::Project(tmp.path().join("warehouse/.staging-lint.toml"))
        );
    }

    #[test]
    fn search_stops_at_dbt_project_root() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("staging-lint.toml"));
        write(&tmp.path().join("warehouse/dbt_project.yml"));
        let start = tmp.path().join("warehouse/models");
        fs::create_dir_all(&start).unwrap();

        assert_eq!(resolve_with_global(&start, None, None), ConfigSource::Default);
    }

    #[test]
    fn global_config_used_when_project_has_none() {
        let project = TempDir::new().unwrap();
        write(&project.path().join("dbt_project.yml"));
        let global = TempDir::new().unwrap();
        write(&global.path().join("config.toml"));

        assert_eq!(
            resolve_with_global(project.path(), None, Some(global.path())),
            ConfigSource::Global(global.path().join("config.toml"))
        );
    }

    #[test]
    fn empty_global_dir_falls_back_to_defaults() {
        let project = TempDir::new().unwrap();
        write(&project.path().join("dbt_project.yml"));
        let global = TempDir::new().unwrap();

        let source = resolve_with_global(project.path(), None, Some(global.path()));
        assert_eq!(source, ConfigSource::Default);
        assert!(source.path().is_none());
        assert_eq!(source.to_string(), "built-in defaults");
    }
}
