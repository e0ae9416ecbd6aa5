//! Configuration file loading and saving
//!
//! The file is optional and holds repository-level defaults. Secrets are not
//! accepted here: unknown keys, including `githubToken`, are rejected.

use super::PublishSource;
use crate::utils::parse_flag;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Template written by `tsc-publish init`
pub const TEMPLATE: &str = r#"---
# tsc-publish configuration. Action inputs and CLI flags override these values.

# Publish the build to `branch` after compiling.
pushToBranch: false

# Branch receiving the build output. Created as an orphan branch if missing.
branch: dist

# What to mirror into the branch: `workspace` (everything but .git) or `outDir`.
publishSource: workspace

# Run `npm i -g typescript` before building.
installCompiler: true

# Top-level files matching this glob are removed from the published branch.
sourcePattern: "*.ts"

# Identity used for publish commits.
authorName: actions-user
authorEmail: action@github.com
"#;

/// A boolean that may be written as a YAML bool or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Text(String),
}

impl FlagValue {
    pub fn resolve(&self, input: &str) -> Result<bool> {
        match self {
            FlagValue::Bool(value) => Ok(*value),
            FlagValue::Text(text) => parse_flag(input, text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_to_branch: Option<FlagValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_source: Option<PublishSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_compiler: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
}

impl FileConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load configuration if the file exists
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        // An empty document is a valid, empty configuration
        if content.trim().is_empty() || content.trim() == "---" {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses() {
        let config = FileConfig::parse(TEMPLATE).unwrap();
        assert_eq!(config.push_to_branch, Some(FlagValue::Bool(false)));
        assert_eq!(config.branch.as_deref(), Some("dist"));
        assert_eq!(config.publish_source, Some(PublishSource::Workspace));
        assert_eq!(config.install_compiler, Some(true));
        assert_eq!(config.source_pattern.as_deref(), Some("*.ts"));
        assert_eq!(config.author_name.as_deref(), Some("actions-user"));
        assert_eq!(config.author_email.as_deref(), Some("action@github.com"));
    }

    #[test]
    fn test_flag_accepts_text() {
        let config = FileConfig::parse("pushToBranch: \"yes\"\npublishSource: outDir\n").unwrap();
        let flag = config.push_to_branch.unwrap();
        assert_eq!(flag, FlagValue::Text("yes".to_string()));
        assert!(flag.resolve("pushToBranch").unwrap());
        assert_eq!(config.publish_source, Some(PublishSource::OutDir));
    }

    #[test]
    fn test_token_in_file_rejected() {
        let err = FileConfig::parse("githubToken: abc\n").unwrap_err();
        assert!(err.to_string().contains("githubToken"));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(FileConfig::parse("").unwrap(), FileConfig::default());
        assert_eq!(FileConfig::parse("---\n").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_load_optional_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = FileConfig::load_optional(&temp_dir.path().join("tsc-publish.yaml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tsc-publish.yaml");
        std::fs::write(&path, "branch: [unterminated").unwrap();

        let err = FileConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("tsc-publish.yaml"));
    }
}
