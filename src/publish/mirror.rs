//! Working tree replacement
//!
//! The clone's working directory is emptied (version-control metadata
//! aside) and refilled with a copy of the publish source.

use crate::constants::git::METADATA_DIR;
use crate::utils::remove_path;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Counts reported after a tree replacement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorStats {
    pub removed: usize,
    pub copied: usize,
}

/// Remove every top-level entry of `dir` except the one named `keep`
///
/// Returns the number of entries removed.
pub fn clear_except(dir: &Path, keep: &str) -> Result<usize> {
    let mut removed = 0;
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        if entry.file_name() == keep {
            continue;
        }
        remove_path(&entry.path())?;
        removed += 1;
    }

    Ok(removed)
}

/// Copy the contents of `src` into `dst`, skipping `src`'s top-level `.git`
///
/// Existing files in `dst` are overwritten. Returns the number of files and
/// symlinks copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    let src = src
        .canonicalize()
        .with_context(|| format!("Failed to resolve source directory {}", src.display()))?;
    fs::create_dir_all(dst)
        .with_context(|| format!("Failed to create directory {}", dst.display()))?;
    let dst = dst.canonicalize()?;

    if dst.starts_with(&src) {
        bail!(
            "Cannot copy {} into itself ({})",
            src.display(),
            dst.display()
        );
    }

    let mut copied = 0;
    let walker = WalkDir::new(&src)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !(e.depth() == 1 && e.file_name() == METADATA_DIR));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let relative = entry.path().strip_prefix(&src)?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            if fs::symlink_metadata(&target).is_ok_and(|m| !m.is_dir()) {
                remove_path(&target)?;
            }
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory {}", target.display()))?;
            continue;
        }

        if fs::symlink_metadata(&target).is_ok() {
            remove_path(&target)?;
        }

        if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
        copied += 1;
    }

    Ok(copied)
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let destination =
        fs::read_link(link).with_context(|| format!("Failed to read link {}", link.display()))?;
    std::os::unix::fs::symlink(&destination, target)
        .with_context(|| format!("Failed to create link {}", target.display()))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    fs::copy(link, target)
        .map(|_| ())
        .with_context(|| format!("Failed to copy {}", link.display()))
}

/// Make `clone_dir`'s working tree an exact copy of `source`
pub fn replace_tree(source: &Path, clone_dir: &Path) -> Result<MirrorStats> {
    let removed = clear_except(clone_dir, METADATA_DIR)?;
    let copied = copy_tree(source, clone_dir)?;
    Ok(MirrorStats { removed, copied })
}
