//! TypeScript project detection
//!
//! A workspace is buildable when it has a `tsconfig.json` at its root. The
//! file is read to find where the compiler writes its output.

use crate::constants;
use crate::error::{Stage, fail};
use crate::utils::strip_json_comments;
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfig {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    out_dir: Option<String>,
}

/// A detected TypeScript project
#[derive(Debug, Clone, PartialEq)]
pub struct TsProject {
    /// Workspace root the compiler runs in
    pub root: PathBuf,
    /// Path of the compiler configuration file
    pub config_path: PathBuf,
    /// `compilerOptions.outDir`, resolved against the root
    pub out_dir: Option<PathBuf>,
}

impl TsProject {
    /// Where build artifacts land: `outDir` if configured, else the root
    pub fn output_dir(&self) -> &Path {
        self.out_dir.as_deref().unwrap_or(&self.root)
    }
}

/// Detect the TypeScript project in `workspace`
///
/// # Errors
/// Fails at the detect stage when `tsconfig.json` is missing or is not
/// valid JSON (comments and trailing commas are allowed)
pub fn detect_project(workspace: &Path) -> Result<TsProject> {
    let config_path = workspace.join(constants::build::TSCONFIG_FILE);

    if !config_path.is_file() {
        return Err(fail(
            Stage::Detect,
            format!(
                "No {} found in {}; nothing to build",
                constants::build::TSCONFIG_FILE,
                workspace.display()
            ),
        ));
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        fail(
            Stage::Detect,
            format!("Failed to read {}: {}", config_path.display(), e),
        )
    })?;

    let tsconfig: TsConfig = serde_json::from_str(&strip_json_comments(&content)).map_err(|e| {
        fail(
            Stage::Detect,
            format!("Failed to parse {}: {}", config_path.display(), e),
        )
    })?;

    let out_dir = tsconfig
        .compiler_options
        .out_dir
        .filter(|dir| !dir.trim().is_empty())
        .map(|dir| workspace.join(dir));

    Ok(TsProject {
        root: workspace.to_path_buf(),
        config_path,
        out_dir,
    })
}
