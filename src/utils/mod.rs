//! Utility modules for common functionality

pub mod exit_codes;
pub mod filesystem;
pub mod flags;
pub mod sanitizers;
pub mod validators;

// Re-export commonly used functions
pub use exit_codes::describe_exit;
pub use filesystem::{remove_path, sibling_dir};
pub use flags::parse_flag;
pub use sanitizers::{redact, sanitize_for_dirname, strip_json_comments};
