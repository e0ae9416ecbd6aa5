//! Branches command implementation

use super::{Command, CommandContext};
use crate::github::RemoteBranches;
use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;

/// List the remote repository's branches
pub struct BranchesCommand {
    pub json: bool,
}

#[async_trait]
impl Command for BranchesCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let (owner, repo) = context
            .settings
            .repository_parts()
            .context("Set GITHUB_REPOSITORY or pass --repository")?;

        let remote = RemoteBranches::fetch(context.branches.as_ref(), &owner, &repo).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(remote.names())?);
            return Ok(());
        }

        if remote.names().is_empty() {
            println!("{}", format!("No branches found in {}/{}", owner, repo).yellow());
            return Ok(());
        }

        let target = context.settings.branch.as_deref().and_then(|b| remote.find(b));
        for name in remote.names() {
            if Some(name.as_str()) == target {
                println!("{} {}", name.green().bold(), "(target)".dimmed());
            } else {
                println!("{}", name);
            }
        }
        Ok(())
    }
}
