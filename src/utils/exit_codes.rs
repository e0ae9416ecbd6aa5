//! Exit code utilities and mappings

/// Get a human-readable description for a tool's exit status
///
/// `None` means the process did not exit normally (killed by a signal on
/// unix).
pub fn describe_exit(exit_code: Option<i32>) -> &'static str {
    match exit_code {
        None => "terminated by signal",
        Some(0) => "success",
        Some(1) => "general error",
        Some(2) => "shell builtin misuse",
        Some(126) => "command invoked cannot execute",
        Some(127) => "command not found",
        Some(130) => "terminated by Control-C",
        Some(128..=255) => "terminated by signal",
        Some(_) => "error",
    }
}
