//! Settings validation utilities
//!
//! Publishing needs more than building: a token, a target branch with a
//! well-formed name, and the repository to push to. All problems are
//! collected and reported together.

use crate::config::Settings;
use crate::error::{Stage, fail};
use tsc_publish_github::parse_repository;

fn is_forbidden_ref_char(c: char) -> bool {
    c.is_ascii_control() || c == ' ' || matches!(c, '~' | '^' | ':' | '?' | '*' | '[' | '\\')
}

/// Enumeration of possible validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Publishing requested without a token
    MissingToken,
    /// Publishing requested without a target branch
    MissingBranch,
    /// Target branch is not a valid git ref name
    InvalidBranchName(String, &'static str),
    /// Publishing requested without a repository
    MissingRepository,
    /// Repository is not `owner/repo` or a GitHub URL
    InvalidRepository(String),
    /// Source pattern is empty, not a glob, or not top-level
    InvalidSourcePattern(String, &'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingToken => write!(
                f,
                "A GitHub secret token is a required input for pushing code (hint: use ${{{{ secrets.GITHUB_TOKEN }}}} )"
            ),
            ValidationError::MissingBranch => {
                write!(f, "A target branch is a required input for pushing code")
            }
            ValidationError::InvalidBranchName(name, reason) => {
                write!(f, "Invalid branch name '{}': {}", name, reason)
            }
            ValidationError::MissingRepository => write!(
                f,
                "The repository to publish to is unknown (set GITHUB_REPOSITORY or --repository)"
            ),
            ValidationError::InvalidRepository(repository) => {
                write!(f, "Invalid repository '{}': expected owner/repo", repository)
            }
            ValidationError::InvalidSourcePattern(pattern, reason) => {
                write!(f, "Invalid source pattern '{}': {}", pattern, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a branch name against git's ref naming rules
pub fn validate_branch_name(name: &str) -> Result<(), ValidationError> {
    let invalid = |reason| Err(ValidationError::InvalidBranchName(name.to_string(), reason));

    if name.is_empty() {
        return invalid("name cannot be empty");
    }
    if name.chars().any(is_forbidden_ref_char) {
        return invalid("contains whitespace, control or special characters");
    }
    if name.contains("..") || name.contains("@{") || name.contains("//") {
        return invalid("contains '..', '@{' or '//'");
    }
    if name == "@" || name.starts_with('-') || name.starts_with('/') || name.ends_with('/') {
        return invalid("cannot be '@', start with '-' or '/', or end with '/'");
    }
    if name.ends_with('.') || name.ends_with(".lock") {
        return invalid("cannot end with '.' or '.lock'");
    }
    if name.split('/').any(|component| component.starts_with('.')) {
        return invalid("path components cannot start with '.'");
    }

    Ok(())
}

/// Validates the glob selecting source files to drop from the branch
pub fn validate_source_pattern(pattern: &str) -> Result<(), ValidationError> {
    let invalid = |reason| Err(ValidationError::InvalidSourcePattern(pattern.to_string(), reason));

    if pattern.trim().is_empty() {
        return invalid("pattern cannot be empty");
    }
    if pattern.contains('/') || pattern.contains('\\') {
        return invalid("only top-level file patterns are supported");
    }
    if glob::Pattern::new(pattern).is_err() {
        return invalid("not a valid glob");
    }

    Ok(())
}

/// Validates everything publishing needs
pub fn validate_publish_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.token.is_none() {
        errors.push(ValidationError::MissingToken);
    }

    match settings.branch.as_deref() {
        None => errors.push(ValidationError::MissingBranch),
        Some(branch) => {
            if let Err(error) = validate_branch_name(branch) {
                errors.push(error);
            }
        }
    }

    match settings.repository.as_deref() {
        None => errors.push(ValidationError::MissingRepository),
        Some(repository) => {
            if parse_repository(repository).is_err() {
                errors.push(ValidationError::InvalidRepository(repository.to_string()));
            }
        }
    }

    if let Err(error) = validate_source_pattern(&settings.source_pattern) {
        errors.push(error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Convert validation errors to a fatal input failure
pub fn validation_errors_to_anyhow(errors: Vec<ValidationError>) -> anyhow::Error {
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    fail(Stage::Inputs, messages.join("; "))
}
