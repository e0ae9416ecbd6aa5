//! GitHub API client library
//!
//! This library provides the small slice of the GitHub REST API that the
//! publish step needs: authenticated branch enumeration, plus helpers for
//! repository identifiers and authenticated clone URLs.
//!
//! ## Modules
//!
//! - [`client`]: Core GitHub client implementation
//! - [`branches`]: Branch listing with pagination
//! - [`util`]: Utility functions for GitHub operations

mod branches;
mod client;
mod util;

// Re-export public API
pub use branches::Branch;
pub use client::{DEFAULT_API_URL, GitHubClient};
pub use util::{authenticated_clone_url, parse_repository};
