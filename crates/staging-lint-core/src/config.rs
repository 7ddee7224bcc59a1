//! Configuration types for staging-lint.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Top-level configuration for staging-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Project conventions the rules check against.
    #[serde(default)]
    pub conventions: Conventions,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<crate::Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Project root. Reported paths are shown relative to it.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directories searched when no paths are given, relative to `root`.
    #[serde(default = "default_paths")]
    pub paths: Vec<PathBuf>,

    /// Path substrings or glob patterns whose files are skipped.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Maximum number of parallel file analyses.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            paths: default_paths(),
            exclude: default_exclude(),
            parallelism: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("models/operations/staging")]
}

fn default_exclude() -> Vec<String> {
    vec!["wiserock_tables".to_string()]
}

/// Naming conventions a staging model must follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conventions {
    /// Required `materialized` value.
    pub materialization: String,
    /// Tag every staging model must carry.
    pub required_tag: String,
    /// Expected value of the third tag.
    pub canonical_third_tag: String,
    /// Directory whose child names the source system.
    pub anchor_dir: String,
    /// Source directory name to expected first tag. Unlisted names map to themselves.
    pub source_tags: BTreeMap<String, String>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            materialization: "view".to_string(),
            required_tag: "staging".to_string(),
            canonical_third_tag: "formentera".to_string(),
            anchor_dir: "staging".to_string(),
            source_tags: BTreeMap::new(),
        }
    }
}

impl Conventions {
    /// Expected first tag for models under the `source` directory.
    #[must_use]
    pub fn source_tag<'a>(&'a self, source: &'a str) -> &'a str {
        self.source_tags.get(source).map_or(source, String::as_str)
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analyzer.exclude, vec!["wiserock_tables"]);
        assert_eq!(
            config.analyzer.paths,
            vec![PathBuf::from("models/operations/staging")]
        );
        assert_eq!(config.conventions.materialization, "view");
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "./warehouse"
exclude = ["legacy_"]
parallelism = 4

[conventions]
canonical_third_tag = "acme"

[conventions.source_tags]
prodview_v2 = "prodview"

[rules.surrogate-key]
enabled = false

[rules.final-select]
severity = "error"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./warehouse"));
        assert_eq!(config.analyzer.exclude, vec!["legacy_"]);
        assert_eq!(config.analyzer.parallelism, Some(4));
        assert_eq!(config.conventions.canonical_third_tag, "acme");
        assert_eq!(config.conventions.required_tag, "staging");
        assert!(!config.is_rule_enabled("surrogate-key"));
        assert!(config.is_rule_enabled("cte-order"));
        assert_eq!(config.rule_severity("final-select"), Some(Severity::Error));
        assert_eq!(config.rule_severity("cte-order"), None);
    }

    #[test]
    fn test_source_tag_defaults_to_identity() {
        let mut conventions = Conventions::default();
        assert_eq!(conventions.source_tag("oda"), "oda");

        conventions
            .source_tags
            .insert("prodview_v2".to_string(), "prodview".to_string());
        assert_eq!(conventions.source_tag("prodview_v2"), "prodview");
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[analyzer\nroot = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_severity_is_rejected() {
        assert!(Config::parse("[rules.cte-order]\nseverity = \"fatal\"").is_err());
    }
}
