//! Base types and traits for the command pattern

use crate::config::Settings;
use crate::github::{self, BranchSource};
use crate::runner::{CommandRunner, ToolRunner};
use anyhow::Result;
use std::sync::Arc;

/// Context passed to all commands containing resolved settings and the
/// seams to the outside world
#[derive(Clone)]
pub struct CommandContext {
    /// Settings resolved from every configuration layer
    pub settings: Settings,
    /// Runs npm, tsc and git
    pub runner: Arc<dyn ToolRunner>,
    /// Lists the remote's branches
    pub branches: Arc<dyn BranchSource>,
}

impl CommandContext {
    /// Context backed by real processes and the GitHub API
    pub fn new(settings: Settings) -> Self {
        let branches = Arc::new(github::client_for(&settings));
        Self {
            settings,
            runner: Arc::new(CommandRunner::new()),
            branches,
        }
    }

    pub fn with_runner(mut self, runner: Arc<dyn ToolRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_branches(mut self, branches: Arc<dyn BranchSource>) -> Self {
        self.branches = branches;
        self
    }
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    async fn execute(&self, context: &CommandContext) -> Result<()>;
}
