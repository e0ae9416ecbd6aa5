//! Command implementations

pub mod base;
pub mod branches;
pub mod build;
pub mod init;
pub mod publish;
pub mod run;

pub use base::{Command, CommandContext};
pub use branches::BranchesCommand;
pub use build::BuildCommand;
pub use init::InitCommand;
pub use publish::PublishCommand;
pub use run::RunCommand;
