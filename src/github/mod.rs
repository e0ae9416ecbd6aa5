//! Remote branch lookup
//!
//! The publisher only needs to know which branches exist on the remote.
//! [`BranchSource`] is the seam: production uses the GitHub REST API through
//! [`GitHubClient`], tests substitute a fixed list.

use crate::config::Settings;
use crate::error::{Stage, fail};
use anyhow::Result;
use async_trait::async_trait;
use tsc_publish_github::GitHubClient;

/// Anything able to list the branch names of a repository
#[async_trait]
pub trait BranchSource: Send + Sync {
    async fn branch_names(&self, owner: &str, repo: &str) -> Result<Vec<String>>;
}

#[async_trait]
impl BranchSource for GitHubClient {
    async fn branch_names(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        let branches = self.list_branches(owner, repo).await?;
        Ok(branches.into_iter().map(|branch| branch.name).collect())
    }
}

/// API client for the configured token and API root
pub fn client_for(settings: &Settings) -> GitHubClient {
    GitHubClient::new(settings.token.clone()).with_api_url(settings.api_url.clone())
}

/// Whether the target branch exists on the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchState {
    /// Exists under this exact name
    Exists(String),
    Absent,
}

/// Branch names fetched once per run
#[derive(Debug, Clone, Default)]
pub struct RemoteBranches {
    names: Vec<String>,
}

impl RemoteBranches {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub async fn fetch(source: &dyn BranchSource, owner: &str, repo: &str) -> Result<Self> {
        let names = source.branch_names(owner, repo).await.map_err(|e| {
            fail(
                Stage::Branches,
                format!("Something went wrong while listing branches: {:#}", e),
            )
        })?;
        Ok(Self::new(names))
    }

    /// Find `branch` ignoring case; an exact match wins over a folded one
    pub fn find(&self, branch: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|name| name.as_str() == branch)
            .or_else(|| {
                let wanted = branch.to_lowercase();
                self.names.iter().find(|name| name.to_lowercase() == wanted)
            })
            .map(String::as_str)
    }

    pub fn state_of(&self, branch: &str) -> BranchState {
        match self.find(branch) {
            Some(name) => BranchState::Exists(name.to_string()),
            None => BranchState::Absent,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
