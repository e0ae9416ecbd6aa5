//! Central constants for the tsc-publish application

/// Default values for the TypeScript build
pub mod build {
    /// Compiler configuration file expected at the workspace root
    pub const TSCONFIG_FILE: &str = "tsconfig.json";

    /// Package manager used for installs
    pub const PACKAGE_MANAGER: &str = "npm";

    /// npm package providing the compiler
    pub const COMPILER_PACKAGE: &str = "typescript";

    /// Compiler executable
    pub const COMPILER: &str = "tsc";
}

/// Default values for Git operations
pub mod git {
    /// Commit author name for the automation identity
    pub const AUTHOR_NAME: &str = "actions-user";

    /// Commit author email for the automation identity
    pub const AUTHOR_EMAIL: &str = "action@github.com";

    /// Version-control metadata entry that tree replacement never touches
    pub const METADATA_DIR: &str = ".git";

    /// Prefix of the sibling clone directory
    pub const CLONE_DIR_PREFIX: &str = "branch-";

    /// Prefix of publish commit messages
    pub const COMMIT_PREFIX: &str = "TS Build:";

    /// Top-level files removed from the published branch
    pub const DEFAULT_SOURCE_PATTERN: &str = "*.ts";

    /// Remote name created by `git clone`
    pub const REMOTE: &str = "origin";
}

/// Default values for GitHub operations
pub mod github {
    /// GitHub web root used to build clone URLs
    pub const SERVER_URL: &str = "https://github.com";

    /// Username used in clone URLs when no actor is known
    pub const FALLBACK_ACTOR: &str = "x-access-token";
}

/// Action input names, read from `INPUT_<NAME>` environment variables
pub mod inputs {
    pub const PUSH_TO_BRANCH: &str = "pushToBranch";
    pub const BRANCH: &str = "branch";
    pub const GITHUB_TOKEN: &str = "githubToken";
}

/// Runner context environment variables
pub mod env {
    pub const WORKSPACE: &str = "GITHUB_WORKSPACE";
    pub const REPOSITORY: &str = "GITHUB_REPOSITORY";
    pub const SHA: &str = "GITHUB_SHA";
    pub const ACTOR: &str = "GITHUB_ACTOR";
    pub const SERVER_URL: &str = "GITHUB_SERVER_URL";
    pub const API_URL: &str = "GITHUB_API_URL";
    pub const EVENT_PATH: &str = "GITHUB_EVENT_PATH";
    /// Set to `true` by the Actions runner
    pub const ACTIONS: &str = "GITHUB_ACTIONS";
}

/// Default values for configuration
pub mod config {
    /// Default configuration file name, looked up in the workspace root
    pub const DEFAULT_CONFIG_FILE: &str = "tsc-publish.yaml";
}
