//! Source pruning
//!
//! Source files are dropped from the top level of the published tree, from
//! both the index and the working directory.

use crate::git::Git;
use crate::utils::remove_path;
use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Top-level entries of `dir` matching `pattern`, sorted by name
pub fn matching_sources(dir: &Path, pattern: &str) -> Result<Vec<String>> {
    let pattern = Pattern::new(pattern)
        .with_context(|| format!("Invalid source pattern '{}'", pattern))?;

    let mut matches = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if pattern.matches_with(&name, MATCH_OPTIONS) {
            matches.push(name);
        }
    }

    matches.sort();
    Ok(matches)
}

/// Remove every top-level entry matching `pattern` from the repository
///
/// Nothing matching is not an error. Entries git does not track, ignored
/// files included, are deleted from disk directly.
pub async fn prune_sources(git: &Git<'_>, pattern: &str) -> Result<Vec<String>> {
    let matches = matching_sources(git.dir(), pattern)?;
    if matches.is_empty() {
        return Ok(matches);
    }

    git.remove_paths(&matches).await?;

    for name in &matches {
        let path = git.dir().join(name);
        if fs::symlink_metadata(&path).is_ok() {
            remove_path(&path)?;
        }
    }

    Ok(matches)
}
