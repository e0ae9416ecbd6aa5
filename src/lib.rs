//! tsc-publish - Build a TypeScript project and publish the output to a branch

pub mod build;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod github;
pub mod logger;
pub mod project;
pub mod publish;
pub mod runner;
pub mod utils;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use commands::{Command, CommandContext};
pub use config::Settings;
pub use error::{Stage, StageFailure};
