//! Core VCS operations trait and types for rollback.
//!
//! This module defines the VcsAdapter trait that specifies every repository
//! query and mutation the rollback flow needs. The production implementation
//! is provided by the git_adapter module, which shells out to the git CLI.

use crate::error::Result;
use std::future::Future;

/// Trait defining all required VCS operations for rollback
pub trait VcsAdapter {
    /// List configured remotes (with URLs)
    fn get_remotes(&self) -> impl Future<Output = Result<Vec<RemoteInfo>>>;

    /// Name of the checked-out branch, `None` when HEAD is detached
    fn current_branch(&self) -> impl Future<Output = Result<Option<String>>>;

    /// Fetch a single branch from a remote
    fn fetch(&self, remote: &str, branch: &str) -> impl Future<Output = Result<()>>;

    /// Local commit history from HEAD, newest first
    fn recent_commits(&self, max_count: usize) -> impl Future<Output = Result<Vec<CommitInfo>>>;

    /// Commit history of a specific ref, newest first; empty if the ref does not resolve
    fn ref_commits(
        &self,
        reference: &str,
        max_count: usize,
    ) -> impl Future<Output = Result<Vec<CommitInfo>>>;

    /// Working tree status split by category
    fn status(&self) -> impl Future<Output = Result<WorkingTreeStatus>>;

    /// Hard-reset HEAD, index and working tree to a revision
    fn reset_to_commit(&self, revision: &str) -> impl Future<Output = Result<()>>;

    /// Discard uncommitted changes to tracked files
    fn reset_working_tree(&self) -> impl Future<Output = Result<()>>;
}

/// Information about a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Commit hash (full SHA)
    pub hash: String,
    /// Full commit message
    pub message: String,
}

impl CommitInfo {
    /// Create a commit record
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
        }
    }

    /// First non-empty line of the message
    pub fn summary(&self) -> &str {
        self.message
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
    }
}

/// Last 7 characters of a hash (the whole hash if shorter)
pub fn short_hash(hash: &str) -> &str {
    let start = hash
        .char_indices()
        .rev()
        .nth(6)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    &hash[start..]
}

/// Information about a remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    /// Remote name
    pub name: String,
    /// Fetch URL
    pub fetch_url: String,
    /// Push URL (may be different from fetch)
    pub push_url: String,
}

/// Dirty paths reported by the VCS, grouped by category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingTreeStatus {
    /// Untracked paths
    pub not_added: Vec<String>,
    /// Paths with unresolved merge conflicts
    pub conflicted: Vec<String>,
    /// Paths newly added to the index
    pub created: Vec<String>,
    /// Deleted paths
    pub deleted: Vec<String>,
    /// Modified paths
    pub modified: Vec<String>,
    /// Renamed paths, rendered as `from -> to`
    pub renamed: Vec<String>,
}

impl WorkingTreeStatus {
    /// All dirty paths in category order: not-added, conflicted, created,
    /// deleted, modified, renamed
    pub fn dirty_files(&self) -> Vec<String> {
        [
            &self.not_added,
            &self.conflicted,
            &self.created,
            &self.deleted,
            &self.modified,
            &self.renamed,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }

    /// Whether no category has any entry
    pub fn is_clean(&self) -> bool {
        self.not_added.is_empty()
            && self.conflicted.is_empty()
            && self.created.is_empty()
            && self.deleted.is_empty()
            && self.modified.is_empty()
            && self.renamed.is_empty()
    }
}
