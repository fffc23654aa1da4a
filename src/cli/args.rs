//! Command line argument parsing and validation.
//!
//! Flags map onto a [`RollbackOverrides`] layer that is stacked on top of the
//! optional config file, so only flags the operator actually passed override
//! anything.

use crate::error::{CliError, Result};
use crate::rollback::{RollbackOptions, RollbackOverrides, RunConfig, TargetOverrides};
use clap::Parser;
use std::path::PathBuf;

/// Confirmation-gated rollback of local git history and working tree
#[derive(Parser, Debug)]
#[command(
    name = "git_rollback",
    version,
    about = "Discard local commits and uncommitted changes to match the remote",
    long_about = "Discard local commits ahead of the remote tracking branch and uncommitted
changes in the working tree. Shows what will be lost and asks before resetting.

Usage:
  git_rollback
  git_rollback --dry
  git_rollback --force --no-working-tree
  git_rollback --remote upstream /path/to/repo"
)]
pub struct Args {
    /// Path to the repository
    #[arg(index = 1, value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Remote whose tracking branch history is rolled back to
    #[arg(short, long, env = "GIT_ROLLBACK_REMOTE")]
    pub remote: Option<String>,

    /// Roll back without asking for confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Only show what would be rolled back
    #[arg(short, long)]
    pub dry: bool,

    /// Keep local commits
    #[arg(long)]
    pub no_history: bool,

    /// Keep uncommitted changes
    #[arg(long)]
    pub no_working_tree: bool,

    /// Number of local commits searched for the remote head
    #[arg(long, value_name = "N")]
    pub max_history: Option<usize>,

    /// TOML or JSON file with rollback options
    #[arg(short, long, value_name = "FILE", env = "GIT_ROLLBACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only print errors and the confirmation prompt
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), CliError> {
        if self.max_history == Some(0) {
            return Err(CliError::InvalidArguments {
                reason: "--max-history must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Overrides coming from flags; unset flags stay `None`
    pub fn overrides(&self) -> RollbackOverrides {
        let rollback = (self.no_history || self.no_working_tree).then(|| TargetOverrides {
            working_tree: self.no_working_tree.then_some(false),
            history: self.no_history.then_some(false),
        });

        RollbackOverrides {
            remote: self.remote.clone(),
            rollback,
            force: self.force.then_some(true),
            max_history: self.max_history,
        }
    }

    /// Resolve options: defaults, then config file, then flags
    pub fn resolve_options(&self) -> Result<RollbackOptions> {
        let file = match &self.config {
            Some(path) => RollbackOverrides::from_file(path)?,
            None => RollbackOverrides::default(),
        };
        Ok(RollbackOptions::merged(file.overlay(self.overrides())))
    }

    /// Per-invocation settings
    pub fn run_config(&self) -> RunConfig {
        RunConfig { dry: self.dry }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.quiet)
    }
}
