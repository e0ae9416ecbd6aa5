//! Settings builder
//!
//! Layers configuration sources on top of each other. Every `merge_*` call
//! and setter overrides what earlier layers provided, so callers apply the
//! file first, then environment inputs, then command line overrides.

use super::event;
use super::file::{FileConfig, FlagValue};
use super::inputs::ActionInputs;
use super::{CommitAuthor, PublishSource, Settings};
use crate::constants::inputs;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Builder for resolved [`Settings`]
#[derive(Debug, Default, Clone)]
pub struct SettingsBuilder {
    push_to_branch: Option<FlagValue>,
    branch: Option<String>,
    token: Option<String>,
    workspace: Option<PathBuf>,
    repository: Option<String>,
    sha: Option<String>,
    actor: Option<String>,
    head_message: Option<String>,
    event_path: Option<PathBuf>,
    server_url: Option<String>,
    api_url: Option<String>,
    publish_source: Option<PublishSource>,
    install_compiler: Option<bool>,
    source_pattern: Option<String>,
    author_name: Option<String>,
    author_email: Option<String>,
}

fn replace<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply values from a configuration file
    pub fn merge_file(mut self, file: &FileConfig) -> Self {
        replace(&mut self.push_to_branch, file.push_to_branch.clone());
        replace(&mut self.branch, file.branch.clone());
        replace(&mut self.publish_source, file.publish_source);
        replace(&mut self.install_compiler, file.install_compiler);
        replace(&mut self.source_pattern, file.source_pattern.clone());
        replace(&mut self.author_name, file.author_name.clone());
        replace(&mut self.author_email, file.author_email.clone());
        self
    }

    /// Apply action inputs and runner context
    pub fn merge_inputs(mut self, inputs: &ActionInputs) -> Self {
        replace(
            &mut self.push_to_branch,
            inputs.push_to_branch.clone().map(FlagValue::Text),
        );
        replace(&mut self.branch, inputs.branch.clone());
        replace(&mut self.token, inputs.github_token.clone());
        replace(&mut self.workspace, inputs.workspace.clone());
        replace(&mut self.repository, inputs.repository.clone());
        replace(&mut self.sha, inputs.sha.clone());
        replace(&mut self.actor, inputs.actor.clone());
        replace(&mut self.server_url, inputs.server_url.clone());
        replace(&mut self.api_url, inputs.api_url.clone());
        replace(&mut self.event_path, inputs.event_path.clone());
        self
    }

    pub fn push_to_branch(mut self, raw: impl Into<String>) -> Self {
        self.push_to_branch = Some(FlagValue::Text(raw.into()));
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn workspace(mut self, workspace: impl Into<PathBuf>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    pub fn sha(mut self, sha: impl Into<String>) -> Self {
        self.sha = Some(sha.into());
        self
    }

    pub fn head_message(mut self, message: impl Into<String>) -> Self {
        self.head_message = Some(message.into());
        self
    }

    pub fn publish_source(mut self, source: PublishSource) -> Self {
        self.publish_source = Some(source);
        self
    }

    /// Resolve every layer into [`Settings`]
    ///
    /// # Errors
    /// Returns an error if the push flag is not a recognizable boolean or the
    /// working directory cannot be determined
    pub fn build(self) -> Result<Settings> {
        let workspace = match self.workspace {
            Some(workspace) => workspace,
            None => std::env::current_dir().context("Failed to determine working directory")?,
        };

        let mut settings = Settings::for_workspace(workspace);

        settings.push_to_branch = match &self.push_to_branch {
            Some(flag) => flag.resolve(inputs::PUSH_TO_BRANCH)?,
            None => false,
        };
        settings.branch = self.branch.filter(|b| !b.trim().is_empty());
        settings.token = self.token.filter(|t| !t.trim().is_empty());
        settings.repository = self.repository;
        settings.sha = self.sha;
        settings.actor = self.actor;
        settings.head_message = self
            .head_message
            .or_else(|| self.event_path.as_deref().and_then(event::head_commit_message));

        if let Some(server_url) = self.server_url {
            settings.server_url = server_url;
        }
        if let Some(api_url) = self.api_url {
            settings.api_url = api_url;
        }
        if let Some(source) = self.publish_source {
            settings.publish_source = source;
        }
        if let Some(install) = self.install_compiler {
            settings.install_compiler = install;
        }
        if let Some(pattern) = self.source_pattern {
            settings.source_pattern = pattern;
        }

        let defaults = CommitAuthor::default();
        settings.author = CommitAuthor {
            name: self.author_name.unwrap_or(defaults.name),
            email: self.author_email.unwrap_or(defaults.email),
        };

        Ok(settings)
    }
}
