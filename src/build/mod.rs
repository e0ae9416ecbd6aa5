//! Project build
//!
//! Installs the compiler, installs dependencies on a best-effort basis and
//! runs `tsc` in the workspace.

use crate::constants::build::{COMPILER, COMPILER_PACKAGE, PACKAGE_MANAGER};
use crate::error::{Stage, fail};
use crate::logger::Logger;
use crate::project::TsProject;
use crate::runner::{Invocation, ToolRunner};
use anyhow::Result;

/// What happened to the dependency install step
#[derive(Debug, Clone, PartialEq)]
pub enum DependencyInstall {
    Installed,
    /// The install failed and was ignored; carries the reason
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub compiler_installed: bool,
    pub dependencies: DependencyInstall,
}

pub struct Builder<'a> {
    runner: &'a dyn ToolRunner,
    install_compiler: bool,
    logger: Logger,
}

impl<'a> Builder<'a> {
    pub fn new(runner: &'a dyn ToolRunner) -> Self {
        Self {
            runner,
            install_compiler: true,
            logger: Logger::new(Stage::Build),
        }
    }

    pub fn install_compiler(mut self, install: bool) -> Self {
        self.install_compiler = install;
        self
    }

    /// Build `project`
    ///
    /// # Errors
    /// Fails at the build stage when the compiler cannot be installed or
    /// `tsc` does not succeed. Dependency install failures are absorbed.
    pub async fn build(&self, project: &TsProject) -> Result<BuildReport> {
        if self.install_compiler {
            self.logger.info("Installing tsc");
            let install = Invocation::new(Stage::Build, PACKAGE_MANAGER)
                .args(["i", "-g", COMPILER_PACKAGE]);
            let output = self.runner.run(&install).await?;
            if !output.success() {
                return Err(fail(
                    Stage::Build,
                    format!(
                        "Something went wrong while installing tsc: {}",
                        output.diagnostics()
                    ),
                ));
            }
        }

        self.logger.info("Installing dependencies");
        let dependencies = self.install_dependencies(project).await;
        if let DependencyInstall::Skipped(reason) = &dependencies {
            self.logger
                .info(&format!("Dependency install failed, continuing: {}", reason));
        }

        self.logger.info("Building project");
        let compile = Invocation::new(Stage::Build, COMPILER).current_dir(&project.root);
        let output = self.runner.run(&compile).await?;
        if !output.success() {
            return Err(fail(Stage::Build, "Something went wrong while building."));
        }

        self.logger.success("Build finished");
        Ok(BuildReport {
            compiler_installed: self.install_compiler,
            dependencies,
        })
    }

    async fn install_dependencies(&self, project: &TsProject) -> DependencyInstall {
        let install = Invocation::new(Stage::Build, PACKAGE_MANAGER)
            .arg("i")
            .current_dir(&project.root);

        match self.runner.run(&install).await {
            Ok(output) if output.success() => DependencyInstall::Installed,
            Ok(output) => DependencyInstall::Skipped(output.diagnostics().to_string()),
            Err(e) => DependencyInstall::Skipped(format!("{:#}", e)),
        }
    }
}
