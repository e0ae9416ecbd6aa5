//! Utility functions for GitHub operations

use anyhow::{Result, anyhow};

/// Parse a repository identifier into `(owner, repo)`
///
/// Accepts the `owner/repo` slug found in `GITHUB_REPOSITORY` as well as
/// the usual GitHub URL formats:
/// - SSH: `git@github.com:owner/repo.git`
/// - HTTPS: `https://github.com/owner/repo.git`
/// - Legacy: `github.com/owner/repo`
///
/// # Errors
/// Returns an error if the identifier format is not recognized
pub fn parse_repository(identifier: &str) -> Result<(String, String)> {
    let id = identifier
        .trim()
        .trim_end_matches('/')
        .trim_end_matches(".git");

    // Handle SSH URLs: git@github.com:owner/repo or git@github-enterprise:owner/repo
    if id.starts_with("git@")
        && let Some(colon_pos) = id.find(':')
    {
        return split_pair(&id[colon_pos + 1..], identifier);
    }

    // Handle HTTPS URLs: https://github.com/owner/repo
    if id.starts_with("https://") || id.starts_with("http://") {
        let without_protocol = id
            .trim_start_matches("https://")
            .trim_start_matches("http://");

        let parts: Vec<&str> = without_protocol.split('/').collect();
        if parts.len() == 3 {
            return split_pair(&format!("{}/{}", parts[1], parts[2]), identifier);
        }
        return Err(anyhow!("Invalid repository format: {}", identifier));
    }

    // Legacy support: github.com/owner/repo
    if id.contains("github.com/") {
        let parts: Vec<&str> = id.split('/').collect();
        if parts.len() >= 3 {
            let idx = parts.len() - 2;
            return split_pair(&format!("{}/{}", parts[idx], parts[idx + 1]), identifier);
        }
    }

    split_pair(id, identifier)
}

fn split_pair(pair: &str, original: &str) -> Result<(String, String)> {
    match pair.split('/').collect::<Vec<_>>().as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(anyhow!(
            "Invalid repository format: {} (expected owner/repo)",
            original
        )),
    }
}

/// Build an HTTPS clone URL carrying `actor:token` credentials
///
/// `server_url` is the web root of the GitHub instance, e.g.
/// `https://github.com`.
///
/// # Errors
/// Returns an error if `server_url` has no `http(s)://` scheme
pub fn authenticated_clone_url(
    server_url: &str,
    actor: &str,
    token: &str,
    owner: &str,
    repo: &str,
) -> Result<String> {
    let server_url = server_url.trim_end_matches('/');
    let (scheme, host) = server_url
        .split_once("://")
        .filter(|(scheme, host)| (*scheme == "https" || *scheme == "http") && !host.is_empty())
        .ok_or_else(|| anyhow!("Invalid server URL: {}", server_url))?;

    Ok(format!(
        "{}://{}:{}@{}/{}/{}.git",
        scheme, actor, token, host, owner, repo
    ))
}
