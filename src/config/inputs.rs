//! Action inputs and runner context from the environment
//!
//! A workflow input named `x` reaches the process as `INPUT_<X>`, upper-cased
//! with spaces turned into underscores. An input that was not provided shows
//! up as an empty string, so empty values count as unset.

use crate::constants::{env, inputs};
use std::path::PathBuf;

/// Environment variable carrying the action input `name`
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Raw values read from the environment, before any parsing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionInputs {
    pub push_to_branch: Option<String>,
    pub branch: Option<String>,
    pub github_token: Option<String>,
    pub workspace: Option<PathBuf>,
    pub repository: Option<String>,
    pub sha: Option<String>,
    pub actor: Option<String>,
    pub server_url: Option<String>,
    pub api_url: Option<String>,
    pub event_path: Option<PathBuf>,
}

impl ActionInputs {
    /// Read inputs from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read inputs through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let input = |name: &str| get(&input_env_name(name));

        Self {
            push_to_branch: input(inputs::PUSH_TO_BRANCH),
            branch: input(inputs::BRANCH).map(|b| b.trim().to_string()),
            github_token: input(inputs::GITHUB_TOKEN).map(|t| t.trim().to_string()),
            workspace: get(env::WORKSPACE).map(PathBuf::from),
            repository: get(env::REPOSITORY),
            sha: get(env::SHA),
            actor: get(env::ACTOR),
            server_url: get(env::SERVER_URL),
            api_url: get(env::API_URL),
            event_path: get(env::EVENT_PATH).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_input_env_name() {
        assert_eq!(input_env_name("pushToBranch"), "INPUT_PUSHTOBRANCH");
        assert_eq!(input_env_name("githubToken"), "INPUT_GITHUBTOKEN");
        assert_eq!(input_env_name("my input"), "INPUT_MY_INPUT");
    }

    #[test]
    fn test_from_lookup_reads_inputs_and_context() {
        let inputs = ActionInputs::from_lookup(lookup_from(&[
            ("INPUT_PUSHTOBRANCH", "true"),
            ("INPUT_BRANCH", " gh-pages "),
            ("INPUT_GITHUBTOKEN", "tok"),
            ("GITHUB_WORKSPACE", "/home/runner/work/app/app"),
            ("GITHUB_REPOSITORY", "octo/app"),
            ("GITHUB_SHA", "deadbeef"),
            ("GITHUB_ACTOR", "octocat"),
            ("GITHUB_EVENT_PATH", "/tmp/event.json"),
        ]));

        assert_eq!(inputs.push_to_branch.as_deref(), Some("true"));
        assert_eq!(inputs.branch.as_deref(), Some("gh-pages"));
        assert_eq!(inputs.github_token.as_deref(), Some("tok"));
        assert_eq!(
            inputs.workspace,
            Some(PathBuf::from("/home/runner/work/app/app"))
        );
        assert_eq!(inputs.repository.as_deref(), Some("octo/app"));
        assert_eq!(inputs.sha.as_deref(), Some("deadbeef"));
        assert_eq!(inputs.actor.as_deref(), Some("octocat"));
        assert_eq!(inputs.event_path, Some(PathBuf::from("/tmp/event.json")));
        assert!(inputs.server_url.is_none());
    }

    #[test]
    fn test_empty_values_are_unset() {
        let inputs = ActionInputs::from_lookup(lookup_from(&[
            ("INPUT_PUSHTOBRANCH", ""),
            ("INPUT_GITHUBTOKEN", "   "),
        ]));
        assert_eq!(inputs, ActionInputs::default());
    }
}
