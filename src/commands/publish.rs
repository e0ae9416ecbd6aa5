//! Publish command implementation

use super::{Command, CommandContext};
use crate::config::PublishSource;
use crate::error::{Stage, fail};
use crate::git::Git;
use crate::project::{TsProject, detect_project};
use crate::publish::{BranchPublisher, PublishPlan, PublishReport};
use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Publish a workspace that was built elsewhere
pub struct PublishCommand;

#[async_trait]
impl Command for PublishCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        context.settings.validate_for_publish()?;
        publish_workspace(context, None).await?;
        Ok(())
    }
}

/// Publish the build output to the target branch
///
/// `project` is the project that was just built, if any. Settings must
/// already be validated for publishing.
pub(crate) async fn publish_workspace(
    context: &CommandContext,
    project: Option<&TsProject>,
) -> Result<PublishReport> {
    let settings = &context.settings;
    let source_dir = source_dir(context, project)?;
    let sha = resolve_sha(context).await;

    let plan = PublishPlan::from_settings(settings, source_dir, &sha)?;
    BranchPublisher::new(context.runner.as_ref(), context.branches.as_ref())
        .publish(&plan)
        .await
}

fn source_dir(context: &CommandContext, project: Option<&TsProject>) -> Result<PathBuf> {
    let settings = &context.settings;
    let dir = match settings.publish_source {
        PublishSource::Workspace => settings.workspace.clone(),
        PublishSource::OutDir => match project {
            Some(project) => project.output_dir().to_path_buf(),
            None => detect_project(&settings.workspace)?.output_dir().to_path_buf(),
        },
    };

    if !dir.is_dir() {
        return Err(fail(
            Stage::Mirror,
            format!("Nothing to publish: {} is not a directory", dir.display()),
        ));
    }
    Ok(dir)
}

/// Commit SHA to record: configured, else the workspace's `HEAD`
async fn resolve_sha(context: &CommandContext) -> String {
    if let Some(sha) = context
        .settings
        .sha
        .as_deref()
        .map(str::trim)
        .filter(|sha| !sha.is_empty())
    {
        return sha.to_string();
    }

    let workspace = Git::new(context.runner.as_ref(), &context.settings.workspace);
    match workspace.try_git(Stage::Commit, &["rev-parse", "HEAD"]).await {
        Ok(output) if output.success() && !output.stdout.trim().is_empty() => {
            output.stdout.trim().to_string()
        }
        _ => "unknown".to_string(),
    }
}
