//! Git integration for rollback operations.
//!
//! Repository access goes through the [`VcsAdapter`] trait so the rollback
//! flow can run against the git CLI or an in-memory fake.

pub mod git_adapter;
pub mod operations;
pub mod porcelain;

pub use git_adapter::GitCliOperations;
pub use operations::{CommitInfo, RemoteInfo, VcsAdapter, WorkingTreeStatus, short_hash};
