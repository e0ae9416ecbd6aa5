//! File system utility functions

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};

/// Path of a directory named `name` next to `dir`
///
/// `dir` is canonicalized first so relative workspaces such as `.` still
/// resolve to a real sibling.
pub fn sibling_dir(dir: &Path, name: &str) -> Result<PathBuf> {
    let canonical = dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve directory {}", dir.display()))?;
    let parent = canonical
        .parent()
        .ok_or_else(|| anyhow!("Directory {} has no parent", canonical.display()))?;
    Ok(parent.join(name))
}

/// Remove a file, symlink or directory tree
///
/// Symlinks are removed themselves, never followed.
pub fn remove_path(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .with_context(|| format!("Failed to inspect {}", path.display()))?;

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.with_context(|| format!("Failed to remove {}", path.display()))
}
