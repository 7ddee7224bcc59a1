//! Context types for rule execution.

use std::path::{Component, Path, PathBuf};

use crate::config::Conventions;
use crate::utils::blocks::{find_blocks, BlockEntry};
use crate::utils::directives::strip_directives;
use crate::utils::model_config::{find_config_call, ConfigMetadata};

/// Raw file text paired with its directive-stripped form.
///
/// Both strings have the same byte length and the same line breaks, so an
/// offset found in one is valid in the other.
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    raw: &'a str,
    stripped: String,
}

impl<'a> SourceText<'a> {
    /// Strips `raw` and keeps both forms.
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            stripped: strip_directives(raw),
        }
    }

    /// The file as read from disk.
    #[must_use]
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The file with every template directive blanked out.
    #[must_use]
    pub fn stripped(&self) -> &str {
        &self.stripped
    }
}

/// Context provided to per-file rules.
///
/// Everything here is derived once from the file's path and text before
/// any rule runs, so rules only read shared facts.
#[derive(Debug, Clone)]
pub struct ModelContext<'a> {
    /// Path to the file as given to the analyzer.
    pub path: &'a Path,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// Raw and stripped text.
    pub source: SourceText<'a>,
    /// Line of the first config call opening, even when its arguments are unreadable.
    pub config_line: Option<usize>,
    /// Metadata of the first config call, when its arguments could be extracted.
    pub config: Option<ConfigMetadata>,
    /// Named blocks in source order.
    pub blocks: Vec<BlockEntry>,
    /// Source system inferred from the directory layout.
    pub source_name: Option<String>,
    /// Conventions in effect for this run.
    pub conventions: &'a Conventions,
}

impl<'a> ModelContext<'a> {
    /// Creates a new model context.
    #[must_use]
    pub fn new(path: &'a Path, raw: &'a str, root: &Path, conventions: &'a Conventions) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        let source = SourceText::new(raw);
        let blocks = find_blocks(source.stripped());
        let source_name = Self::detect_source_name(&relative_path, &conventions.anchor_dir);

        Self {
            path,
            relative_path,
            config_line: find_config_call(raw),
            config: ConfigMetadata::from_raw(raw),
            blocks,
            source_name,
            source,
            conventions,
        }
    }

    /// Returns true if a block called `name` was found.
    #[must_use]
    pub fn has_block(&self, name: &str) -> bool {
        self.block(name).is_some()
    }

    /// First block called `name`, compared case-insensitively.
    #[must_use]
    pub fn block(&self, name: &str) -> Option<&BlockEntry> {
        self.blocks
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// Block names in source order.
    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.name.as_str())
    }

    /// First tag the model is expected to carry, if the source is known.
    #[must_use]
    pub fn expected_source_tag(&self) -> Option<&str> {
        self.source_name
            .as_deref()
            .map(|s| self.conventions.source_tag(s))
    }

    /// Finds the directory directly under `anchor`.
    ///
    /// The file name itself never counts, so a model placed directly in the
    /// anchor directory has no source.
    fn detect_source_name(relative_path: &Path, anchor: &str) -> Option<String> {
        let parts: Vec<&str> = relative_path
            .parent()?
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .collect();

        let idx = parts.iter().position(|p| *p == anchor)?;
        parts.get(idx + 1).map(|s| (*s).to_string())
    }
}
