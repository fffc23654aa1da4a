//! Command line interface for git_rollback.
//!
//! Parses arguments, opens the repository, runs the rollback and owns the
//! interactive side of the confirmation gate.

mod args;
pub mod commands;
mod output;

pub use args::{Args, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
