//! Build command implementation

use super::{Command, CommandContext};
use crate::build::Builder;
use crate::error::Stage;
use crate::logger::Logger;
use crate::project::{TsProject, detect_project};
use anyhow::Result;
use async_trait::async_trait;

/// Build the project without publishing, whatever the push flag says
pub struct BuildCommand;

#[async_trait]
impl Command for BuildCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        build_project(context).await?;
        Ok(())
    }
}

/// Detect the project in the workspace and compile it
pub(crate) async fn build_project(context: &CommandContext) -> Result<TsProject> {
    let project = detect_project(&context.settings.workspace)?;
    Logger::new(Stage::Detect).info(&format!(
        "Found {}",
        project.config_path.display()
    ));

    Builder::new(context.runner.as_ref())
        .install_compiler(context.settings.install_compiler)
        .build(&project)
        .await?;

    Logger::new(Stage::Build).success(&format!(
        "Build finished, output in {}",
        project.output_dir().display()
    ));
    Ok(project)
}
