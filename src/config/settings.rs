//! Resolved settings for one run

use crate::constants;
use crate::utils::{sanitize_for_dirname, sibling_dir, validators};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tsc_publish_github::{authenticated_clone_url, parse_repository};

/// Directory whose contents are mirrored into the published branch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PublishSource {
    /// The whole workspace, minus `.git`
    #[default]
    Workspace,
    /// Only the compiler output directory
    OutDir,
}

impl FromStr for PublishSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "workspace" => Ok(PublishSource::Workspace),
            "outdir" | "out-dir" | "out_dir" => Ok(PublishSource::OutDir),
            other => Err(anyhow::anyhow!(
                "Invalid publish source '{}': expected workspace or outDir",
                other
            )),
        }
    }
}

/// Identity recorded on publish commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
}

impl Default for CommitAuthor {
    fn default() -> Self {
        Self {
            name: constants::git::AUTHOR_NAME.to_string(),
            email: constants::git::AUTHOR_EMAIL.to_string(),
        }
    }
}

/// Everything one run needs to know, after all configuration layers merged
#[derive(Clone)]
pub struct Settings {
    pub push_to_branch: bool,
    pub branch: Option<String>,
    pub token: Option<String>,
    pub workspace: PathBuf,
    /// `owner/repo` or a GitHub URL
    pub repository: Option<String>,
    pub sha: Option<String>,
    pub actor: Option<String>,
    /// Message of the commit that triggered the run, if known
    pub head_message: Option<String>,
    pub server_url: String,
    pub api_url: String,
    pub publish_source: PublishSource,
    pub install_compiler: bool,
    pub source_pattern: String,
    pub author: CommitAuthor,
}

impl Settings {
    /// Settings for `workspace` with every other value at its default
    pub fn for_workspace(workspace: impl Into<PathBuf>) -> Self {
        Self {
            push_to_branch: false,
            branch: None,
            token: None,
            workspace: workspace.into(),
            repository: None,
            sha: None,
            actor: None,
            head_message: None,
            server_url: constants::github::SERVER_URL.to_string(),
            api_url: tsc_publish_github::DEFAULT_API_URL.to_string(),
            publish_source: PublishSource::default(),
            install_compiler: true,
            source_pattern: constants::git::DEFAULT_SOURCE_PATTERN.to_string(),
            author: CommitAuthor::default(),
        }
    }

    /// Check everything publishing depends on
    pub fn validate_for_publish(&self) -> Result<()> {
        validators::validate_publish_settings(self).map_err(validators::validation_errors_to_anyhow)
    }

    /// `(owner, repo)` of the repository being published
    pub fn repository_parts(&self) -> Result<(String, String)> {
        let repository = self
            .repository
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Repository is not set (owner/repo)"))?;
        parse_repository(repository)
    }

    pub fn target_branch(&self) -> Result<&str> {
        self.branch
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Target branch is not set"))
    }

    /// Sibling directory holding the working clone of the target branch
    pub fn clone_dir(&self) -> Result<PathBuf> {
        let name = format!(
            "{}{}",
            constants::git::CLONE_DIR_PREFIX,
            sanitize_for_dirname(self.target_branch()?)
        );
        sibling_dir(&self.workspace, &name)
    }

    /// Token-authenticated HTTPS clone URL
    pub fn clone_url(&self) -> Result<String> {
        let (owner, repo) = self.repository_parts()?;
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("GitHub token is not set"))?;
        let actor = self
            .actor
            .as_deref()
            .unwrap_or(constants::github::FALLBACK_ACTOR);
        authenticated_clone_url(&self.server_url, actor, token, &owner, &repo)
    }

    /// Message for the publish commit
    pub fn commit_message(&self, sha: &str) -> String {
        match self.head_message.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => {
                format!("{} {} {}", constants::git::COMMIT_PREFIX, sha, message)
            }
            _ => format!("{} {}", constants::git::COMMIT_PREFIX, sha),
        }
    }

    /// Values that must never appear in logs
    pub fn secrets(&self) -> Vec<String> {
        self.token.iter().cloned().collect()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("push_to_branch", &self.push_to_branch)
            .field("branch", &self.branch)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("workspace", &self.workspace)
            .field("repository", &self.repository)
            .field("sha", &self.sha)
            .field("actor", &self.actor)
            .field("head_message", &self.head_message)
            .field("server_url", &self.server_url)
            .field("api_url", &self.api_url)
            .field("publish_source", &self.publish_source)
            .field("install_compiler", &self.install_compiler)
            .field("source_pattern", &self.source_pattern)
            .field("author", &self.author)
            .finish()
    }
}
