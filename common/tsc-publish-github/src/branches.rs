//! Branch listing operations

use crate::client::GitHubClient;
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Page size used when walking the branch list (API maximum)
const PER_PAGE: usize = 100;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Branch {
    pub name: String,
    #[serde(default)]
    pub protected: bool,
}

impl GitHubClient {
    /// List every branch of a repository
    ///
    /// Walks the paginated `GET /repos/{owner}/{repo}/branches` endpoint until
    /// a page shorter than the page size comes back.
    ///
    /// # Errors
    /// Returns an error if any page request fails or cannot be parsed
    pub async fn list_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>> {
        let mut branches = Vec::new();
        let mut page = 1;

        loop {
            let url = format!(
                "{}/repos/{}/{}/branches?per_page={}&page={}",
                self.api_url, owner, repo, PER_PAGE, page
            );

            let response = self.get(&url).send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let error_msg = if status.as_u16() == 403 || status.as_u16() == 404 {
                    if self.token.is_none() {
                        "Access denied. This may be a private repository; a token is required."
                    } else {
                        "Access denied. Check the token permissions or repository name."
                    }
                } else {
                    status.canonical_reason().unwrap_or("Unknown error")
                };
                return Err(anyhow!(
                    "Failed to list branches of {}/{} ({} {})",
                    owner,
                    repo,
                    status.as_u16(),
                    error_msg
                ));
            }

            let batch: Vec<Branch> = response
                .json()
                .await
                .context("Failed to parse GitHub API response")?;
            let done = batch.len() < PER_PAGE;
            branches.extend(batch);

            if done {
                break;
            }
            page += 1;
        }

        Ok(branches)
    }
}
