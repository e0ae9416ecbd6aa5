//! Configuration management module
//!
//! Resolves [`Settings`] from, in increasing precedence: built-in defaults,
//! the optional `tsc-publish.yaml` file, action inputs and runner context in
//! the environment, and command line overrides.

pub mod builder;
pub mod event;
pub mod file;
pub mod inputs;
pub mod settings;

pub use builder::SettingsBuilder;
pub use file::{FileConfig, FlagValue};
pub use inputs::ActionInputs;
pub use settings::{CommitAuthor, PublishSource, Settings};

use crate::constants;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub workspace: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub push_to_branch: Option<String>,
    pub branch: Option<String>,
    pub token: Option<String>,
    pub repository: Option<String>,
    pub sha: Option<String>,
    /// `workspace` or `outDir`
    pub publish_source: Option<String>,
}

/// Workspace directory: command line, then `GITHUB_WORKSPACE`, then cwd
pub fn resolve_workspace(overrides: &Overrides, inputs: &ActionInputs) -> Result<PathBuf> {
    match overrides.workspace.as_ref().or(inputs.workspace.as_ref()) {
        Some(workspace) => Ok(workspace.clone()),
        None => std::env::current_dir().context("Failed to determine working directory"),
    }
}

/// Resolve settings from every configuration layer
pub fn load_settings(overrides: &Overrides, inputs: &ActionInputs) -> Result<Settings> {
    let workspace = resolve_workspace(overrides, inputs)?;

    let file = match &overrides.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => FileConfig::load_optional(&workspace.join(constants::config::DEFAULT_CONFIG_FILE))?,
    };

    let mut builder = SettingsBuilder::new();
    if let Some(file) = &file {
        builder = builder.merge_file(file);
    }
    builder = builder.merge_inputs(inputs).workspace(workspace);

    if let Some(push) = &overrides.push_to_branch {
        builder = builder.push_to_branch(push.clone());
    }
    if let Some(branch) = &overrides.branch {
        builder = builder.branch(branch.clone());
    }
    if let Some(token) = &overrides.token {
        builder = builder.token(token.clone());
    }
    if let Some(repository) = &overrides.repository {
        builder = builder.repository(repository.clone());
    }
    if let Some(sha) = &overrides.sha {
        builder = builder.sha(sha.clone());
    }
    if let Some(source) = &overrides.publish_source {
        builder = builder.publish_source(source.parse::<PublishSource>()?);
    }

    builder.build()
}
