//! Git operations using system git commands for maximum compatibility
//!
//! All commands run through a [`ToolRunner`] inside one repository
//! directory. This module is organized by workflow:
//!
//! - [`clone`]: fresh authenticated clone of the repository
//! - [`branch`]: local identity, checkout of existing or orphan branches
//! - [`commit`]: staging, source removal, commit and force push

pub mod branch;
pub mod clone;
pub mod commit;

pub use clone::clone_repository;
pub use commit::CommitOutcome;

use crate::error::Stage;
use crate::runner::{Invocation, ToolOutput, ToolRunner};
use crate::utils::redact;
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

/// A local repository operated on through a [`ToolRunner`]
pub struct Git<'a> {
    runner: &'a dyn ToolRunner,
    dir: PathBuf,
    secrets: Vec<String>,
}

impl<'a> Git<'a> {
    pub fn new(runner: &'a dyn ToolRunner, dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            dir: dir.into(),
            secrets: Vec::new(),
        }
    }

    /// Mask these values in anything git invocations log
    pub fn with_secrets(mut self, secrets: &[String]) -> Self {
        self.secrets.extend(secrets.iter().cloned());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn invocation(&self, stage: Stage, args: &[&str]) -> Invocation {
        Invocation::new(stage, "git")
            .args(args.iter().copied())
            .current_dir(&self.dir)
            .secrets(&self.secrets)
    }

    /// Diagnostics of a failed invocation, with secrets masked
    pub fn diagnostics(&self, output: &ToolOutput) -> String {
        redact(output.diagnostics(), &self.secrets)
    }

    /// Run git and return its output whatever the exit code
    pub async fn try_git(&self, stage: Stage, args: &[&str]) -> Result<ToolOutput> {
        self.runner.run(&self.invocation(stage, args)).await
    }

    /// Run git, failing on a non-zero exit code
    pub async fn git(&self, stage: Stage, args: &[&str]) -> Result<ToolOutput> {
        let output = self.try_git(stage, args).await?;
        if !output.success() {
            bail!(
                "git {} failed (exit code {}): {}",
                args.first().unwrap_or(&""),
                output.exit_code.unwrap_or(-1),
                self.diagnostics(&output)
            );
        }
        Ok(output)
    }
}
