//! Git operations using the git CLI
//!
//! Provides functionality for:
//! - Running read-only git queries against a workspace
//! - Resolving the current branch, with fallbacks for detached HEAD

mod branch;
mod query;

pub use branch::*;
pub use query::*;
