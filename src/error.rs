//! Fatal stage failures
//!
//! Expected failures carry the stage they happened in and a message meant
//! for the person reading the CI log. They travel inside `anyhow::Error` and
//! are recognized again by [`crate::logger::report_failure`].

use std::fmt;

/// Pipeline stage a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Inputs,
    Detect,
    Build,
    Branches,
    Clone,
    Checkout,
    Mirror,
    Commit,
    Push,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Inputs => "inputs",
            Stage::Detect => "detect",
            Stage::Build => "build",
            Stage::Branches => "branches",
            Stage::Clone => "clone",
            Stage::Checkout => "checkout",
            Stage::Mirror => "mirror",
            Stage::Commit => "commit",
            Stage::Push => "push",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fatal, expected failure of one pipeline stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageFailure {
    pub stage: Stage,
    pub message: String,
}

impl StageFailure {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for StageFailure {}

/// Shorthand for returning a [`StageFailure`] as an `anyhow::Error`
pub fn fail(stage: Stage, message: impl Into<String>) -> anyhow::Error {
    anyhow::Error::new(StageFailure::new(stage, message))
}
