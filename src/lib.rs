//! # git_rollback
//!
//! Confirmation-gated rollback for git working directories.
//!
//! Works out which local state would be thrown away to match the remote
//! (commits ahead of the tracking branch, uncommitted changes), shows it to
//! the operator, and hard-resets only after confirmation.
//!
//! ## Features
//!
//! - **Divergence Analysis**: Finds local commits newer than the remote head
//! - **Working Tree Scan**: Lists untracked, conflicted, added, deleted, modified and renamed files
//! - **Confirmation Gate**: Dry-run, forced, and interactive modes
//! - **Pluggable VCS**: Core logic runs against any [`git::VcsAdapter`]
//!
//! ## Usage
//!
//! ```bash
//! git_rollback                   # Show what would be discarded, confirm, reset
//! git_rollback --dry             # Only show what would be discarded
//! git_rollback --force           # Reset without asking
//! git_rollback --no-history ../other-repo
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod error;
pub mod git;
pub mod rollback;

// Re-export main types for public API
pub use cli::Args;
pub use error::{CliError, ConfigError, GitError, Result, RollbackError};
pub use git::{GitCliOperations, VcsAdapter};
pub use rollback::{
    Decision, EventSink, Resolution, Rollback, RollbackEvent, RollbackOptions, RollbackOutcome,
    RollbackOverrides, RunConfig,
};
