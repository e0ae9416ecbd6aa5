//! Triggering event payload
//!
//! The Actions runner writes the webhook payload of the triggering event to
//! the file named by `GITHUB_EVENT_PATH`. Only the head commit message is
//! used, to annotate publish commits.

use serde_json::Value;
use std::path::Path;

/// Head commit message of the event payload at `path`, if any
///
/// A missing or unreadable payload simply yields `None`.
pub fn head_commit_message(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let payload: Value = serde_json::from_str(&content).ok()?;
    message_from_payload(&payload)
}

/// Extract the head commit message from an event payload
///
/// `workflow_run` events carry it under `workflow_run.head_commit`, `push`
/// events under `head_commit`.
pub fn message_from_payload(payload: &Value) -> Option<String> {
    [
        payload.pointer("/workflow_run/head_commit/message"),
        payload.pointer("/head_commit/message"),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .map(str::trim)
    .find(|message| !message.is_empty())
    .map(str::to_string)
}
