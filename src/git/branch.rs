//! Identity and branch checkout

use super::Git;
use crate::config::CommitAuthor;
use crate::constants;
use crate::error::{Stage, fail};
use anyhow::Result;

impl Git<'_> {
    /// Set the commit identity for this repository only
    pub async fn configure_identity(&self, author: &CommitAuthor) -> Result<()> {
        self.git(Stage::Clone, &["config", "user.name", author.name.as_str()])
            .await?;
        self.git(Stage::Clone, &["config", "user.email", author.email.as_str()])
            .await?;
        Ok(())
    }

    /// Check out a branch that exists on the remote, keeping its history
    ///
    /// The local branch is reset to the remote-tracking one, and the trailing
    /// `--` keeps a same-named path in the default branch from being taken
    /// for a pathspec.
    pub async fn checkout_existing(&self, branch: &str) -> Result<()> {
        let tracking = format!("{}/{}", constants::git::REMOTE, branch);
        let output = self
            .try_git(
                Stage::Checkout,
                &["checkout", "-B", branch, tracking.as_str(), "--"],
            )
            .await?;
        if !output.success() {
            return Err(fail(
                Stage::Checkout,
                format!(
                    "Something went wrong while checking out branch '{}': {}",
                    branch,
                    self.diagnostics(&output)
                ),
            ));
        }
        Ok(())
    }

    /// Create `branch` with no parent commit
    pub async fn checkout_orphan(&self, branch: &str) -> Result<()> {
        let output = self
            .try_git(Stage::Checkout, &["checkout", "--orphan", branch])
            .await?;
        if !output.success() {
            return Err(fail(
                Stage::Checkout,
                format!(
                    "Something went wrong while creating branch '{}': {}",
                    branch,
                    self.diagnostics(&output)
                ),
            ));
        }
        Ok(())
    }

    /// SHA of `HEAD`, or `None` while the branch has no commit yet
    pub async fn head_sha(&self) -> Result<Option<String>> {
        let output = self
            .try_git(Stage::Push, &["rev-parse", "--verify", "--quiet", "HEAD"])
            .await?;
        if output.success() {
            Ok(Some(output.stdout.trim().to_string()))
        } else {
            Ok(None)
        }
    }
}
