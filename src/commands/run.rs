//! Run command implementation

use super::build::build_project;
use super::publish::publish_workspace;
use super::{Command, CommandContext};
use crate::error::Stage;
use crate::logger::Logger;
use anyhow::Result;
use async_trait::async_trait;

/// Build, then publish when pushing is enabled
#[derive(Debug, Default)]
pub struct RunCommand;

#[async_trait]
impl Command for RunCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let settings = &context.settings;

        // Missing inputs must stop the run before anything is installed
        if settings.push_to_branch {
            settings.validate_for_publish()?;
        }

        let project = build_project(context).await?;

        if !settings.push_to_branch {
            Logger::new(Stage::Build).info("Pushing is disabled, not publishing");
            return Ok(());
        }

        let report = publish_workspace(context, Some(&project)).await?;
        Logger::new(Stage::Push).success(&format!(
            "Published {} to '{}'{}",
            report.head,
            report.branch,
            if report.created { " (new branch)" } else { "" }
        ));
        Ok(())
    }
}
