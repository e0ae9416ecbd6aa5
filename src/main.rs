use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tsc_publish::commands::*;
use tsc_publish::config::{self, ActionInputs, Overrides, Settings};
use tsc_publish::error::{Stage, StageFailure, fail};
use tsc_publish::{constants, logger};

#[derive(Parser)]
#[command(name = "tsc-publish")]
#[command(about = "Build a TypeScript project and publish the output to a branch")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Workspace directory (default: GITHUB_WORKSPACE, then the current directory)
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,

    /// Configuration file path (default: tsc-publish.yaml in the workspace)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Publish the build output to the target branch (true/false)
    #[arg(long, global = true, value_name = "BOOL")]
    push_to_branch: Option<String>,

    /// Branch receiving the build output
    #[arg(short, long, global = true)]
    branch: Option<String>,

    /// GitHub token used to list branches and push
    #[arg(long, global = true)]
    token: Option<String>,

    /// Repository as owner/repo
    #[arg(long, global = true)]
    repository: Option<String>,

    /// Commit SHA recorded in the publish commit message
    #[arg(long, global = true)]
    sha: Option<String>,

    /// Directory mirrored into the branch: workspace or outDir
    #[arg(long, global = true, value_name = "SOURCE")]
    publish_source: Option<String>,
}

impl GlobalArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            workspace: self.workspace.clone(),
            config: self.config.clone(),
            push_to_branch: self.push_to_branch.clone(),
            branch: self.branch.clone(),
            token: self.token.clone(),
            repository: self.repository.clone(),
            sha: self.sha.clone(),
            publish_source: self.publish_source.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build, then publish when pushing is enabled (the default)
    Run,

    /// Build only, whatever the push flag says
    Build,

    /// Publish a workspace that was built elsewhere
    Publish,

    /// List the remote repository's branches
    Branches {
        /// Print branch names as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file into the workspace
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        overwrite: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger::report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<()> {
    let overrides = cli.global.overrides();
    let inputs = ActionInputs::from_env();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => RunCommand.execute(&load_context(&overrides, &inputs)?).await,
        Commands::Build => {
            BuildCommand
                .execute(&load_context(&overrides, &inputs)?)
                .await
        }
        Commands::Publish => {
            PublishCommand
                .execute(&load_context(&overrides, &inputs)?)
                .await
        }
        Commands::Branches { json } => {
            BranchesCommand { json }
                .execute(&load_context(&overrides, &inputs)?)
                .await
        }
        Commands::Init { overwrite } => {
            // Only the workspace is needed, so a broken config file can be replaced
            let workspace = config::resolve_workspace(&overrides, &inputs)?;
            let output = overrides
                .config
                .clone()
                .unwrap_or_else(|| workspace.join(constants::config::DEFAULT_CONFIG_FILE));
            let context = CommandContext::new(Settings::for_workspace(workspace));
            InitCommand { output, overwrite }.execute(&context).await
        }
    }
}

fn load_context(overrides: &Overrides, inputs: &ActionInputs) -> Result<CommandContext> {
    let settings = config::load_settings(overrides, inputs).map_err(|err| {
        if err.is::<StageFailure>() {
            err
        } else {
            fail(Stage::Inputs, format!("Invalid configuration: {:#}", err))
        }
    })?;
    Ok(CommandContext::new(settings))
}
