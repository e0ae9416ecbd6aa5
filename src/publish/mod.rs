//! Branch publishing
//!
//! Mirrors a built tree into a working clone of the target branch, drops the
//! sources, commits and force-pushes. Every run ends with the remote branch
//! tip replaced; nothing is ever merged.

pub mod mirror;
pub mod prune;

use crate::config::{CommitAuthor, Settings};
use crate::error::{Stage, fail};
use crate::git::{self, CommitOutcome, Git};
use crate::github::{BranchSource, BranchState, RemoteBranches};
use crate::logger::Logger;
use crate::runner::ToolRunner;
use anyhow::Result;
use std::path::PathBuf;

/// Everything needed to publish one branch
#[derive(Debug, Clone)]
pub struct PublishPlan {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub remote_url: String,
    pub clone_dir: PathBuf,
    pub source_dir: PathBuf,
    pub commit_message: String,
    pub author: CommitAuthor,
    pub source_pattern: String,
    pub secrets: Vec<String>,
}

impl PublishPlan {
    /// Plan publishing `source_dir` for the commit `sha`
    pub fn from_settings(settings: &Settings, source_dir: PathBuf, sha: &str) -> Result<Self> {
        let (owner, repo) = settings.repository_parts()?;
        Ok(Self {
            owner,
            repo,
            branch: settings.target_branch()?.to_string(),
            remote_url: settings.clone_url()?,
            clone_dir: settings.clone_dir()?,
            source_dir,
            commit_message: settings.commit_message(sha),
            author: settings.author.clone(),
            source_pattern: settings.source_pattern.clone(),
            secrets: settings.secrets(),
        })
    }
}

/// Outcome of a successful publish
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    /// Branch name as pushed
    pub branch: String,
    /// Whether the branch did not exist before
    pub created: bool,
    pub commit: CommitOutcome,
    /// Pushed head SHA
    pub head: String,
    /// Source entries removed from the published tree
    pub pruned: Vec<String>,
}

pub struct BranchPublisher<'a> {
    runner: &'a dyn ToolRunner,
    branches: &'a dyn BranchSource,
}

impl<'a> BranchPublisher<'a> {
    pub fn new(runner: &'a dyn ToolRunner, branches: &'a dyn BranchSource) -> Self {
        Self { runner, branches }
    }

    /// Publish according to `plan`
    ///
    /// # Errors
    /// Fails with a stage failure when listing branches, cloning, checking
    /// out, copying, committing or pushing goes wrong. An empty diff is only
    /// a warning.
    pub async fn publish(&self, plan: &PublishPlan) -> Result<PublishReport> {
        let logger = Logger::new(Stage::Branches);
        let remote = RemoteBranches::fetch(self.branches, &plan.owner, &plan.repo).await?;
        let state = remote.state_of(&plan.branch);
        match &state {
            BranchState::Exists(name) => logger.info(&format!("Branch '{}' exists", name)),
            BranchState::Absent => logger.info(&format!(
                "Branch '{}' not found among {} remote branches",
                plan.branch,
                remote.names().len()
            )),
        }

        git::clone_repository(self.runner, &plan.remote_url, &plan.clone_dir, &plan.secrets)
            .await?;

        let repo = Git::new(self.runner, &plan.clone_dir).with_secrets(&plan.secrets);
        repo.configure_identity(&plan.author).await?;

        let logger = Logger::new(Stage::Checkout);
        let (branch, created) = match state {
            BranchState::Exists(name) => {
                logger.info(&format!("Checking out existing branch '{}'", name));
                repo.checkout_existing(&name).await?;
                (name, false)
            }
            BranchState::Absent => {
                logger.info(&format!("Creating orphan branch '{}'", plan.branch));
                repo.checkout_orphan(&plan.branch).await?;
                (plan.branch.clone(), true)
            }
        };

        let logger = Logger::new(Stage::Mirror);
        let stats = mirror::replace_tree(&plan.source_dir, &plan.clone_dir).map_err(|e| {
            fail(
                Stage::Mirror,
                format!("Something went wrong while copying the build output: {:#}", e),
            )
        })?;
        logger.info(&format!(
            "Replaced {} entries with {} files from {}",
            stats.removed,
            stats.copied,
            plan.source_dir.display()
        ));

        repo.add_all().await?;
        let pruned = prune::prune_sources(&repo, &plan.source_pattern).await?;
        if pruned.is_empty() {
            logger.info(&format!("No files match '{}'", plan.source_pattern));
        } else {
            logger.info(&format!("Removed sources: {}", pruned.join(", ")));
        }

        let logger = Logger::new(Stage::Commit);
        let commit = repo.commit(&plan.commit_message).await?;
        match commit {
            CommitOutcome::Committed => logger.success(&plan.commit_message),
            CommitOutcome::NothingToCommit => {
                logger.warn("Couldn't commit new changes because there aren't any")
            }
        }

        let logger = Logger::new(Stage::Push);
        let head = repo.head_sha().await?.ok_or_else(|| {
            fail(
                Stage::Push,
                format!(
                    "Branch '{}' has no commit to push because the published tree is empty",
                    branch
                ),
            )
        })?;
        repo.push_force(&branch).await?;
        logger.success(&format!("Pushed {} to '{}'", head, branch));

        Ok(PublishReport {
            branch,
            created,
            commit,
            head,
            pruned,
        })
    }
}
