//! Boolean flag normalization
//!
//! Action inputs always arrive as text. Flags are parsed into a real `bool`
//! before anything compares them.

use anyhow::{Result, anyhow};

/// Parse a textual flag into a boolean
///
/// Accepts `true/1/yes/y/on` and `false/0/no/n/off`, case-insensitively and
/// ignoring surrounding whitespace. An empty value is `false`.
///
/// # Errors
/// Returns an error naming `input` for any other value
pub fn parse_flag(input: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "0" | "no" | "n" | "off" | "" => Ok(false),
        other => Err(anyhow!(
            "Invalid value '{}' for {}: expected true or false",
            other,
            input
        )),
    }
}
