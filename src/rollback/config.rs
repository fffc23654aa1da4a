//! Configuration for rollback operations.
//!
//! [`RollbackOptions`] is the immutable, fully resolved configuration for one
//! run. It is only ever built by merging [`RollbackOverrides`] layers onto the
//! defaults; nested tables are merged key by key.

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;

/// Local history window compared against the remote
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Which kinds of local state a run may discard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollbackTargets {
    /// Discard uncommitted changes
    pub working_tree: bool,
    /// Discard commits not on the remote
    pub history: bool,
}

impl Default for RollbackTargets {
    fn default() -> Self {
        Self {
            working_tree: true,
            history: true,
        }
    }
}

/// Resolved configuration for rollback operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackOptions {
    /// Remote whose tracking branch history is rolled back to
    pub remote: String,
    /// Enabled rollback kinds
    pub rollback: RollbackTargets,
    /// Execute without asking for confirmation
    pub force: bool,
    /// Number of local commits searched for the remote head
    pub max_history: usize,
}

impl Default for RollbackOptions {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            rollback: RollbackTargets::default(),
            force: false,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl RollbackOptions {
    /// Defaults with `overrides` applied field by field
    pub fn merged(overrides: RollbackOverrides) -> Self {
        let defaults = Self::default();
        let targets = overrides.rollback.unwrap_or_default();

        Self {
            remote: overrides.remote.unwrap_or(defaults.remote),
            rollback: RollbackTargets {
                working_tree: targets
                    .working_tree
                    .unwrap_or(defaults.rollback.working_tree),
                history: targets.history.unwrap_or(defaults.rollback.history),
            },
            force: overrides.force.unwrap_or(defaults.force),
            max_history: overrides.max_history.unwrap_or(defaults.max_history),
        }
    }
}

/// Partial rollback targets; unset keys keep the lower layer's value
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TargetOverrides {
    /// Override for `rollback.working-tree`
    pub working_tree: Option<bool>,
    /// Override for `rollback.history`
    pub history: Option<bool>,
}

/// Caller-supplied configuration layer
///
/// Loaded from a TOML or JSON file and from CLI flags:
///
/// ```toml
/// remote = "upstream"
/// force = false
///
/// [rollback]
/// working-tree = true
/// history = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RollbackOverrides {
    /// Remote name
    pub remote: Option<String>,
    /// Nested rollback target toggles
    pub rollback: Option<TargetOverrides>,
    /// Skip confirmation
    pub force: Option<bool>,
    /// Local history window
    pub max_history: Option<usize>,
}

impl RollbackOverrides {
    /// Stack `higher` on top of `self`; fields set in `higher` win
    pub fn overlay(self, higher: RollbackOverrides) -> Self {
        let rollback = match (self.rollback, higher.rollback) {
            (Some(low), Some(high)) => Some(TargetOverrides {
                working_tree: high.working_tree.or(low.working_tree),
                history: high.history.or(low.history),
            }),
            (low, high) => high.or(low),
        };

        Self {
            remote: higher.remote.or(self.remote),
            rollback,
            force: higher.force.or(self.force),
            max_history: higher.max_history.or(self.max_history),
        }
    }

    /// Load overrides from a `.toml` or `.json` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&contents)?),
            Some("json") => Ok(serde_json::from_str(&contents)?),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
            .into()),
        }
    }
}

/// Per-invocation settings supplied by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Report what would be rolled back without doing it
    pub dry: bool,
}
