//! Init command implementation

use super::{Command, CommandContext};
use crate::config::file::TEMPLATE;
use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;
use std::path::PathBuf;

/// Init command writing a commented default configuration file
pub struct InitCommand {
    pub output: PathBuf,
    pub overwrite: bool,
}

#[async_trait]
impl Command for InitCommand {
    async fn execute(&self, _context: &CommandContext) -> Result<()> {
        if self.output.exists() && !self.overwrite {
            return Err(anyhow::anyhow!(
                "Output file '{}' already exists. Use --overwrite to replace it.",
                self.output.display()
            ));
        }

        std::fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        println!(
            "{}",
            format!("Configuration saved to '{}'", self.output.display()).green()
        );

        Ok(())
    }
}
