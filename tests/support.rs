//! Common test support utilities and fixtures
//!
//! This module provides shared functionality to reduce code duplication
//! across integration and E2E tests.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tsc_publish::commands::CommandContext;
use tsc_publish::config::Settings;
use tsc_publish::github::BranchSource;
use tsc_publish::runner::{CommandRunner, Invocation, ToolOutput, ToolRunner};

pub const TOKEN: &str = "t0ps3cr3t";
pub const SHA: &str = "4f2c9a1d";

/// Result of running a CLI command
#[derive(Debug)]
pub struct CliOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run the tsc-publish binary with given arguments and environment
pub fn run_cli(args: &[&str], cwd: &Path, envs: &[(&str, &str)]) -> CliOutput {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tsc-publish"));
    cmd.args(args).current_dir(cwd);
    for (key, _) in std::env::vars() {
        if key.starts_with("INPUT_") || key.starts_with("GITHUB_") {
            cmd.env_remove(key);
        }
    }
    cmd.envs(envs.iter().copied());

    let output = cmd.output().expect("Failed to execute tsc-publish");

    CliOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Run git in `dir`, panicking on failure, and return stdout
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_files(dir: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let path = dir.join(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}

/// A TypeScript project in `<tmp>/app`, so the publish clone lands in `<tmp>`
pub struct Project {
    pub root: TempDir,
    pub path: PathBuf,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    /// Project with sources next to their already compiled output
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let path = root.path().join("app");
        std::fs::create_dir(&path).unwrap();
        let project = Self { root, path };
        project.write(&[
            ("tsconfig.json", "{\n  // defaults\n  \"compilerOptions\": {},\n}\n"),
            ("package.json", "{\"name\": \"app\"}\n"),
            ("index.ts", "export const answer: number = 42;\n"),
            ("index.js", "exports.answer = 42;\n"),
            ("lib/util.ts", "export {};\n"),
            ("lib/util.js", "\"use strict\";\n"),
        ]);
        project
    }

    pub fn write(&self, files: &[(&str, &str)]) {
        write_files(&self.path, files);
    }

    /// Sibling directory the publisher clones into
    pub fn clone_dir(&self, branch: &str) -> PathBuf {
        self.root
            .path()
            .canonicalize()
            .unwrap()
            .join(format!("branch-{}", branch))
    }

    /// Settings for publishing to `branch` of `octo/widgets`
    pub fn settings(&self, branch: &str) -> Settings {
        let mut settings = Settings::for_workspace(&self.path);
        settings.push_to_branch = true;
        settings.branch = Some(branch.to_string());
        settings.token = Some(TOKEN.to_string());
        settings.repository = Some("octo/widgets".to_string());
        settings.actor = Some("octocat".to_string());
        settings.sha = Some(SHA.to_string());
        settings.head_message = Some("Add answer".to_string());
        settings
    }
}

/// A bare repository standing in for the GitHub remote
pub struct Remote {
    pub root: TempDir,
    pub bare: PathBuf,
    seed: PathBuf,
}

impl Default for Remote {
    fn default() -> Self {
        Self::new()
    }
}

impl Remote {
    /// Bare repository whose `main` holds a README
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let bare = root.path().join("remote.git");
        let seed = root.path().join("seed");
        std::fs::create_dir_all(&bare).unwrap();
        std::fs::create_dir_all(&seed).unwrap();

        git(&bare, &["init", "--bare", "--quiet"]);
        git(&seed, &["init", "--quiet"]);
        git(&seed, &["config", "user.name", "Test User"]);
        git(&seed, &["config", "user.email", "test@example.com"]);
        git(&seed, &["remote", "add", "origin", bare.to_str().unwrap()]);
        write_files(&seed, &[("README.md", "# widgets\n")]);
        git(&seed, &["add", "-A"]);
        git(&seed, &["commit", "--quiet", "-m", "Initial commit"]);
        git(&seed, &["push", "--quiet", "origin", "HEAD:refs/heads/main"]);
        git(&bare, &["symbolic-ref", "HEAD", "refs/heads/main"]);

        Self { root, bare, seed }
    }

    /// Create or replace `branch` on the remote with exactly `files`
    pub fn push_branch(&self, branch: &str, files: &[(&str, &str)]) {
        git(&self.seed, &["checkout", "--quiet", "--detach"]);
        let local = format!("refs/heads/{}", branch);
        let exists = Command::new("git")
            .args(["rev-parse", "--verify", "--quiet", local.as_str()])
            .current_dir(&self.seed)
            .status()
            .expect("Failed to execute git")
            .success();
        if exists {
            git(&self.seed, &["branch", "--quiet", "-D", branch]);
        }
        git(&self.seed, &["checkout", "--quiet", "--orphan", branch]);
        git(&self.seed, &["rm", "-r", "-f", "--quiet", "--ignore-unmatch", "."]);
        write_files(&self.seed, files);
        git(&self.seed, &["add", "-A"]);
        git(&self.seed, &["commit", "--quiet", "-m", "Previous build"]);
        let refspec = format!("HEAD:refs/heads/{}", branch);
        git(
            &self.seed,
            &["push", "--quiet", "--force", "origin", refspec.as_str()],
        );
    }

    pub fn branches(&self) -> Vec<String> {
        git(&self.bare, &["for-each-ref", "--format=%(refname:short)", "refs/heads"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Every path tracked on `branch`
    pub fn files_on(&self, branch: &str) -> Vec<String> {
        git(&self.bare, &["ls-tree", "-r", "--name-only", branch])
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn read(&self, branch: &str, path: &str) -> String {
        let object = format!("{}:{}", branch, path);
        git(&self.bare, &["show", object.as_str()])
    }

    /// Commit subjects on `branch`, newest first
    pub fn log(&self, branch: &str) -> Vec<String> {
        git(&self.bare, &["log", "--format=%s", branch])
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Author of the tip of `branch` as `name <email>`
    pub fn author(&self, branch: &str) -> String {
        git(&self.bare, &["log", "-1", "--format=%an <%ae>", branch])
            .trim()
            .to_string()
    }

    pub fn head(&self, branch: &str) -> String {
        git(&self.bare, &["rev-parse", branch]).trim().to_string()
    }
}

/// Branch source answering from a fixed list and counting its queries
pub struct FakeBranches {
    names: Vec<String>,
    queries: Arc<AtomicUsize>,
}

impl FakeBranches {
    pub fn of(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle that keeps counting after the source moves into a context
    pub fn queries(&self) -> Arc<AtomicUsize> {
        self.queries.clone()
    }
}

#[async_trait]
impl BranchSource for FakeBranches {
    async fn branch_names(&self, _owner: &str, _repo: &str) -> Result<Vec<String>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.names.clone())
    }
}

/// Branch source reading the branches of a local bare repository
pub struct BareBranches(pub PathBuf);

#[async_trait]
impl BranchSource for BareBranches {
    async fn branch_names(&self, _owner: &str, _repo: &str) -> Result<Vec<String>> {
        Ok(
            git(&self.0, &["for-each-ref", "--format=%(refname:short)", "refs/heads"])
                .lines()
                .map(str::to_string)
                .collect(),
        )
    }
}

/// Tool runner that records every invocation
///
/// npm and tsc are faked and succeed unless told otherwise. git really runs,
/// with `git clone` redirected to a local bare repository when one is set.
pub struct ScriptedRunner {
    calls: Mutex<Vec<Invocation>>,
    failures: Mutex<Vec<(String, bool, i32)>>,
    clone_source: Option<PathBuf>,
    git: CommandRunner,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
            clone_source: None,
            git: CommandRunner::quiet(),
        }
    }

    /// Clone `bare` whenever the pipeline clones anything
    pub fn cloning_from(bare: &Path) -> Self {
        Self {
            clone_source: Some(bare.to_path_buf()),
            ..Self::new()
        }
    }

    /// Make the command whose line is exactly `line` exit with `code`
    pub fn fail_exact(&self, line: &str, code: i32) {
        self.failures
            .lock()
            .unwrap()
            .push((line.to_string(), false, code));
    }

    /// Make every command whose line starts with `prefix` exit with `code`
    pub fn fail_prefix(&self, prefix: &str, code: i32) {
        self.failures
            .lock()
            .unwrap()
            .push((prefix.to_string(), true, code));
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded command lines, secrets included
    pub fn lines(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| format!("{} {}", call.program, call.args.join(" ")).trim().to_string())
            .collect()
    }

    pub fn ran(&self, prefix: &str) -> bool {
        self.lines().iter().any(|line| line.starts_with(prefix))
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.lines()
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }

    fn scripted_exit(&self, line: &str) -> Option<i32> {
        self.failures
            .lock()
            .unwrap()
            .iter()
            .find(|(pattern, prefix, _)| {
                if *prefix {
                    line.starts_with(pattern.as_str())
                } else {
                    line == pattern
                }
            })
            .map(|(_, _, code)| *code)
    }
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolRunner for ScriptedRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput> {
        self.calls.lock().unwrap().push(invocation.clone());

        let line = format!("{} {}", invocation.program, invocation.args.join(" "))
            .trim()
            .to_string();
        if let Some(code) = self.scripted_exit(&line) {
            return Ok(ToolOutput {
                exit_code: Some(code),
                stdout: String::new(),
                stderr: format!("scripted failure of '{}'", invocation.program),
            });
        }

        if invocation.program != "git" {
            return Ok(ToolOutput {
                exit_code: Some(0),
                ..ToolOutput::default()
            });
        }

        let mut real = invocation.clone();
        let is_clone = real.args.first().is_some_and(|arg| arg == "clone");
        if is_clone && real.args.len() > 1 {
            if let Some(bare) = &self.clone_source {
                real.args[1] = bare.to_string_lossy().into_owned();
            }
        }
        self.git.run(&real).await
    }
}

/// Context running tools through `runner` and listing branches from `branches`
pub fn context(
    settings: Settings,
    runner: &Arc<ScriptedRunner>,
    branches: impl BranchSource + 'static,
) -> CommandContext {
    CommandContext::new(settings)
        .with_runner(runner.clone())
        .with_branches(Arc::new(branches))
}
