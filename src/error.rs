//! Error types for git_rollback operations.
//!
//! Expected empty conditions (no remote, nothing dirty, already in sync) are
//! not errors; they are reported as [`crate::rollback::RollbackEvent`]s.
//! Everything in here terminates the run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for git_rollback operations
pub type Result<T> = std::result::Result<T, RollbackError>;

/// Main error type for all git_rollback operations
#[derive(Error, Debug)]
pub enum RollbackError {
    /// Git operation errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Configuration loading errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON config parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Path is not inside a git working tree
    #[error("Not a git repository: {path}")]
    NotRepository {
        /// Path that was opened
        path: PathBuf,
    },

    /// The git executable could not be located
    #[error("The git executable was not found in PATH")]
    GitNotFound,

    /// A git command exited unsuccessfully
    #[error("'git {command}' failed: {reason}")]
    CommandFailed {
        /// Command line passed to git
        command: String,
        /// Captured stderr or spawn error
        reason: String,
    },

    /// Git produced output we could not interpret
    #[error("Failed to parse git output: {reason}")]
    Parse {
        /// Reason for the error
        reason: String,
    },
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file extension is neither .toml nor .json
    #[error("Unsupported config format for {path}. Use a .toml or .json file.")]
    UnsupportedFormat {
        /// Config file path
        path: PathBuf,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl RollbackError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            RollbackError::Git(GitError::NotRepository { .. }) => vec![
                "Run from inside a git working tree or pass its path as an argument".to_string(),
            ],
            RollbackError::Git(GitError::GitNotFound) => vec![
                "Install git and make sure it is on PATH".to_string(),
            ],
            RollbackError::Git(GitError::CommandFailed { command, .. })
                if command.starts_with("fetch") =>
            {
                vec![
                    "Verify the remote is reachable: git remote -v".to_string(),
                    "Pick another remote with --remote <name>".to_string(),
                    "Skip history rollback with --no-history".to_string(),
                ]
            }
            RollbackError::Git(GitError::CommandFailed { command, .. })
                if command.starts_with("reset") =>
            {
                vec![
                    "The rollback may have been partially applied".to_string(),
                    "Inspect the repository with: git status && git log".to_string(),
                ]
            }
            RollbackError::Config(_) | RollbackError::Json(_) | RollbackError::Toml(_) => vec![
                "Check the config file passed with --config or GIT_ROLLBACK_CONFIG".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Whether the repository may have been left partially rolled back
    pub fn may_have_mutated(&self) -> bool {
        matches!(
            self,
            RollbackError::Git(GitError::CommandFailed { command, .. }) if command.starts_with("reset")
        )
    }
}
