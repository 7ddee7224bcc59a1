//! Model file discovery.
//!
//! Three sources: the configured staging directories, explicit paths from
//! the command line, and files changed according to git. Every source
//! yields `*.sql` files only.

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

const MODEL_EXTENSION: &str = "sql";

/// Every model under `dirs`, resolved against `root`, sorted.
///
/// Directories that do not exist are skipped.
pub fn default_files(root: &Path, dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for dir in dirs {
        let dir = root.join(dir);
        if !dir.is_dir() {
            tracing::debug!("Staging directory not found: {}", dir.display());
            continue;
        }
        files.extend(sql_files_under(&dir)?);
    }
    Ok(files.into_iter().collect())
}

/// Models named on the command line.
///
/// Relative paths resolve against `root`. Directories are searched
/// recursively; their files are sorted. Paths that do not exist are warned
/// about and skipped.
pub fn explicit_files(root: &Path, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for p in paths {
        let path = if p.is_absolute() { p.clone() } else { root.join(p) };
        if path.is_dir() {
            files.extend(sql_files_under(&path)?);
        } else if path.is_file() {
            files.push(path);
        } else {
            tracing::warn!("Path not found: {}", p.display());
        }
    }
    Ok(files)
}

/// Models changed relative to `origin/main`, or to `HEAD` when that fails.
///
/// Returns `None` when git cannot be run at all.
pub fn changed_files(root: &Path, dirs: &[PathBuf]) -> Option<Vec<PathBuf>> {
    let diff = git_diff(root, "origin/main", dirs).and_then(|out| match out {
        Some(out) => Ok(Some(out)),
        None => {
            tracing::debug!("Diff against origin/main failed, using HEAD");
            git_diff(root, "HEAD", dirs)
        }
    });

    match diff {
        Ok(stdout) => Some(parse_diff_output(root, &stdout.unwrap_or_default())),
        Err(e) => {
            tracing::debug!("Failed to run git: {e}");
            None
        }
    }
}

/// Runs `git diff --name-only`, returning its output when git succeeds.
///
/// Paths are printed relative to `root`, which need not be the top of the
/// repository.
fn git_diff(root: &Path, base: &str, dirs: &[PathBuf]) -> std::io::Result<Option<String>> {
    let output = Command::new("git")
        .args(["diff", "--name-only", "--relative", base, "--"])
        .args(dirs)
        .current_dir(root)
        .output()?;

    if !output.status.success() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
}

/// Existing model files listed in `git diff --name-only` output.
fn parse_diff_output(root: &Path, stdout: &str) -> Vec<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| has_model_extension(Path::new(line)))
        .map(|line| root.join(line))
        .filter(|path| path.exists())
        .collect()
}

fn sql_files_under(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut builder = ignore::WalkBuilder::new(dir);
    builder.hidden(false).git_ignore(true);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && has_model_extension(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn has_model_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(MODEL_EXTENSION)
}
