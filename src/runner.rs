//! External tool invocation
//!
//! Every external program the pipeline starts (npm, tsc, git) goes through a
//! [`ToolRunner`]. The production [`CommandRunner`] streams the tool's output
//! to the console while capturing it; tests substitute their own runner to
//! observe which tools were invoked and in what order.

use crate::error::Stage;
use crate::logger::Logger;
use crate::utils::{describe_exit, redact};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// A single external tool invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub stage: Stage,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// Values masked in anything this invocation logs
    pub secrets: Vec<String>,
}

impl Invocation {
    pub fn new(stage: Stage, program: impl Into<String>) -> Self {
        Self {
            stage,
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            secrets: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn secrets(mut self, secrets: &[String]) -> Self {
        self.secrets.extend(secrets.iter().cloned());
        self
    }

    /// Command line for logs, with secrets masked
    pub fn display(&self) -> String {
        let line = if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        };
        redact(&line, &self.secrets)
    }
}

/// Captured result of a finished tool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Most useful diagnostic text: stderr, falling back to stdout
    pub fn diagnostics(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Runs external tools
///
/// Implementations return `Ok` whenever the tool could be started, whatever
/// its exit code; callers decide which failures are fatal.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput>;
}

/// Runs tools as child processes, streaming their output
#[derive(Default)]
pub struct CommandRunner {
    quiet: bool,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture output without echoing it or logging invocations
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ToolRunner for CommandRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput> {
        let logger = Logger::new(invocation.stage);
        if !self.quiet {
            logger.info(&format!("Running '{}'", invocation.display()));
        }

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }

        let mut child = command
            .spawn()
            .with_context(|| format!("Failed to execute {}", invocation.program))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("Failed to capture stdout of {}", invocation.program))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow!("Failed to capture stderr of {}", invocation.program))?;

        let echo = !self.quiet;
        let stdout_handle = tokio::spawn(pump(stdout, echo, false, invocation.secrets.clone()));
        let stderr_handle = tokio::spawn(pump(stderr, echo, true, invocation.secrets.clone()));

        let (stdout_result, stderr_result) = tokio::join!(stdout_handle, stderr_handle);
        let status = child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for {}", invocation.program))?;

        let output = ToolOutput {
            exit_code: status.code(),
            stdout: stdout_result.unwrap_or_default(),
            stderr: stderr_result.unwrap_or_default(),
        };

        if !self.quiet {
            let code = output
                .exit_code
                .map_or_else(|| "none".to_string(), |c| c.to_string());
            logger.info(&format!(
                "'{}' ended with exit code {} ({})",
                invocation.program,
                code,
                describe_exit(output.exit_code)
            ));
        }

        Ok(output)
    }
}

/// Read a child stream line by line, optionally echoing it, and return it all
async fn pump<R>(stream: R, echo: bool, to_stderr: bool, secrets: Vec<String>) -> String
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    let mut content = String::new();
    while let Ok(Some(line)) = lines.next_line().await {
        if echo {
            let shown = redact(&line, &secrets);
            if to_stderr {
                eprintln!("{}", shown);
            } else {
                println!("{}", shown);
            }
        }
        content.push_str(&line);
        content.push('\n');
    }
    content
}
