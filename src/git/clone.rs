//! Git clone operations
//!
//! The working clone is disposable: whatever sits at the target path is
//! removed before cloning so every run starts from the remote's state.

use crate::error::{Stage, fail};
use crate::logger::Logger;
use crate::runner::{Invocation, ToolRunner};
use crate::utils::remove_path;
use anyhow::{Context, Result};
use std::path::Path;

/// Clone `url` into `target_dir`, replacing anything already there
pub async fn clone_repository(
    runner: &dyn ToolRunner,
    url: &str,
    target_dir: &Path,
    secrets: &[String],
) -> Result<()> {
    let logger = Logger::new(Stage::Clone);

    if std::fs::symlink_metadata(target_dir).is_ok() {
        logger.warn(&format!(
            "Removing leftover clone at {}",
            target_dir.display()
        ));
        remove_path(target_dir).context("Failed to remove previous clone")?;
    }

    logger.info("Cloning branch");
    let invocation = Invocation::new(Stage::Clone, "git")
        .args(["clone", url])
        .arg(target_dir.to_string_lossy())
        .secrets(secrets);

    let output = runner.run(&invocation).await?;
    if !output.success() {
        return Err(fail(
            Stage::Clone,
            "Something went wrong while cloning the repository.",
        ));
    }

    logger.success(&format!("Cloned into {}", target_dir.display()));
    Ok(())
}
