//! Console logging for pipeline stages
//!
//! Every line is prefixed with the stage name in cyan/bold. When running
//! under GitHub Actions, warnings and errors are also emitted as workflow
//! commands so they surface as annotations on the run.

use crate::constants;
use crate::error::{Stage, StageFailure};
use colored::*;

/// Logger for pipeline stages with consistent formatting
///
/// ## Example
///
/// ```rust,no_run
/// use tsc_publish::logger::Logger;
/// use tsc_publish::error::Stage;
///
/// let logger = Logger::new(Stage::Build);
/// logger.info("Installing dependencies");
/// logger.success("Build finished");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    stage: Stage,
}

impl Logger {
    pub fn new(stage: Stage) -> Self {
        Self { stage }
    }

    fn prefix(&self) -> ColoredString {
        self.stage.name().cyan().bold()
    }

    pub fn info(&self, msg: &str) {
        println!("{} | {}", self.prefix(), msg);
    }

    pub fn success(&self, msg: &str) {
        println!("{} | {}", self.prefix(), msg.green());
    }

    pub fn warn(&self, msg: &str) {
        if running_in_actions() {
            println!("::warning::{}", escape_workflow_data(msg));
        }
        println!("{} | {}", self.prefix(), msg.yellow());
    }

    pub fn error(&self, msg: &str) {
        eprintln!("{} | {}", self.prefix(), msg.red());
    }
}

/// Whether the process runs inside a GitHub Actions job
pub fn running_in_actions() -> bool {
    std::env::var(constants::env::ACTIONS).is_ok_and(|v| v == "true")
}

/// Escape a message for use as workflow command data
pub fn escape_workflow_data(msg: &str) -> String {
    msg.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format a fatal error the way it is reported to the user
///
/// Expected stage failures keep their own message; anything else is
/// reported generically with the full error chain appended.
pub fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<StageFailure>() {
        Some(failure) => failure.message.clone(),
        None => format!("Something went wrong: {:#}", err),
    }
}

/// Report a fatal error and mark the run failed
///
/// This is the single exit path for fatal errors. The caller is expected
/// to terminate with a non-zero exit code right after.
pub fn report_failure(err: &anyhow::Error) {
    let message = failure_message(err);
    if running_in_actions() {
        println!("::error::{}", escape_workflow_data(&message));
    }
    eprintln!("{} {}", "Error:".red().bold(), message.red());
}
