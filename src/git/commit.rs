//! Staging, committing and pushing the published tree
//!
//! ## Publish sequence
//!
//! 1. [`Git::add_all`] - Stage every change, deletions included
//! 2. [`Git::remove_paths`] - Drop source files from index and disk
//! 3. [`Git::has_changes`] - Check whether anything is left to commit
//! 4. [`Git::commit`] - Commit, or report that there was nothing to commit
//! 5. [`Git::push_force`] - Overwrite the remote branch with `HEAD`

use super::Git;
use crate::constants;
use crate::error::{Stage, fail};
use anyhow::Result;

/// Result of the commit step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    NothingToCommit,
}

impl Git<'_> {
    /// Check if the repository has uncommitted changes
    pub async fn has_changes(&self) -> Result<bool> {
        let output = self
            .git(Stage::Commit, &["status", "--porcelain"])
            .await?;
        Ok(!output.stdout.trim().is_empty())
    }

    /// Stage all changes, including deletions
    pub async fn add_all(&self) -> Result<()> {
        self.git(Stage::Mirror, &["add", "-A"]).await?;
        Ok(())
    }

    /// Remove paths from both the index and the working tree
    pub async fn remove_paths(&self, paths: &[String]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["rm", "-r", "-f", "--ignore-unmatch", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.git(Stage::Mirror, &args).await?;
        Ok(())
    }

    /// Paths tracked in the index
    pub async fn tracked_files(&self) -> Result<Vec<String>> {
        let output = self.git(Stage::Commit, &["ls-files"]).await?;
        Ok(output.stdout.lines().map(str::to_string).collect())
    }

    /// Commit staged changes with a message
    ///
    /// An empty diff is not an error: it yields
    /// [`CommitOutcome::NothingToCommit`].
    pub async fn commit(&self, message: &str) -> Result<CommitOutcome> {
        if !self.has_changes().await? {
            return Ok(CommitOutcome::NothingToCommit);
        }

        let output = self
            .try_git(Stage::Commit, &["commit", "-m", message])
            .await?;
        if !output.success() {
            return Err(fail(
                Stage::Commit,
                format!("Failed to commit changes: {}", self.diagnostics(&output)),
            ));
        }

        Ok(CommitOutcome::Committed)
    }

    /// Force-push `HEAD` to `branch` on origin, replacing its history
    pub async fn push_force(&self, branch: &str) -> Result<()> {
        let refspec = format!("HEAD:{}", branch);
        let output = self
            .try_git(
                Stage::Push,
                &["push", "--force", constants::git::REMOTE, refspec.as_str()],
            )
            .await?;
        if !output.success() {
            return Err(fail(
                Stage::Push,
                format!(
                    "Something went wrong while pushing to branch '{}': {}",
                    branch,
                    self.diagnostics(&output)
                ),
            ));
        }
        Ok(())
    }
}
