//! Status events emitted while planning and executing a rollback.

use crate::git::short_hash;
use std::fmt;

/// Prompt appended to the confirmation text
pub const CONFIRM_PROMPT: &str = "Press enter to confirm:";

/// A single status update from a rollback run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackEvent {
    /// Configured remote is missing or HEAD is detached
    RemoteNotFound {
        /// Configured remote name
        remote: String,
        /// Current branch, if any
        branch: Option<String>,
    },
    /// Fetching the tracking branch
    Fetching {
        /// Remote name
        remote: String,
        /// Branch name
        branch: String,
    },
    /// HEAD has no commits
    NoLocalCommits,
    /// The remote tracking ref has no commits
    NoRemoteCommits {
        /// `remote/branch`
        remote_ref: String,
    },
    /// Local history already matches the remote
    NoCommitsToRollBack,
    /// The remote head is not among the local commits searched
    RemoteCommitNotFound {
        /// `remote/branch`
        remote_ref: String,
        /// Remote head hash
        hash: String,
        /// Number of local commits searched
        window: usize,
    },
    /// No dirty files
    CleanWorkingTree,
    /// Neither analysis scheduled anything
    NothingToRollBack,
    /// Dry run: what would be rolled back
    DryRun {
        /// Joined confirmation text
        summary: String,
    },
    /// Operator declined the confirmation prompt
    ConfirmationDeclined,
    /// History reset starting
    RollingBackHistory {
        /// Target hash
        hash: String,
    },
    /// History reset finished
    HistoryRolledBack {
        /// Target hash
        hash: String,
    },
    /// Working tree reset starting
    RollingBackWorkingTree,
    /// Working tree reset finished
    WorkingTreeRolledBack,
    /// Every scheduled action ran
    RollbackPerformed,
}

/// How a frontend should present an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    /// Work in progress
    Progress,
    /// Informational skip
    Info,
    /// Skip the operator should look at
    Warning,
    /// Completed work
    Success,
}

impl RollbackEvent {
    /// Presentation level of this event
    pub fn level(&self) -> EventLevel {
        match self {
            RollbackEvent::Fetching { .. }
            | RollbackEvent::RollingBackHistory { .. }
            | RollbackEvent::RollingBackWorkingTree => EventLevel::Progress,
            RollbackEvent::RemoteNotFound { .. }
            | RollbackEvent::RemoteCommitNotFound { .. }
            | RollbackEvent::ConfirmationDeclined => EventLevel::Warning,
            RollbackEvent::HistoryRolledBack { .. }
            | RollbackEvent::WorkingTreeRolledBack
            | RollbackEvent::RollbackPerformed => EventLevel::Success,
            _ => EventLevel::Info,
        }
    }
}

impl fmt::Display for RollbackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollbackEvent::RemoteNotFound { remote, branch } => write!(
                f,
                "Remote \"{}/{}\" not found",
                remote,
                branch.as_deref().unwrap_or("")
            ),
            RollbackEvent::Fetching { remote, branch } => {
                write!(f, "Fetching from \"{}/{}\"...", remote, branch)
            }
            RollbackEvent::NoLocalCommits => write!(f, "No commits found locally"),
            RollbackEvent::NoRemoteCommits { remote_ref } => {
                write!(f, "No commits found in \"{}\"", remote_ref)
            }
            RollbackEvent::NoCommitsToRollBack => write!(f, "No commits to roll back"),
            RollbackEvent::RemoteCommitNotFound {
                remote_ref,
                hash,
                window,
            } => write!(
                f,
                "Latest commit of \"{}\" ({}) is not among the last {} local commits, \
                 history has diverged and will not be rolled back",
                remote_ref,
                short_hash(hash),
                window
            ),
            RollbackEvent::CleanWorkingTree => {
                write!(f, "No dirty files found in the working tree")
            }
            RollbackEvent::NothingToRollBack => write!(f, "Nothing to roll back"),
            RollbackEvent::DryRun { summary } => write!(f, "{}", summary),
            RollbackEvent::ConfirmationDeclined => write!(f, "Rollback cancelled"),
            RollbackEvent::RollingBackHistory { hash } => {
                write!(f, "Rolling back history to \"{}\"...", short_hash(hash))
            }
            RollbackEvent::HistoryRolledBack { hash } => {
                write!(f, "History rolled back to \"{}\"", short_hash(hash))
            }
            RollbackEvent::RollingBackWorkingTree => write!(f, "Rolling back working tree..."),
            RollbackEvent::WorkingTreeRolledBack => write!(f, "Working tree rolled back"),
            RollbackEvent::RollbackPerformed => write!(f, "Rollback performed"),
        }
    }
}

/// Write-only channel receiving status events
pub trait EventSink {
    /// Record one event
    fn emit(&mut self, event: RollbackEvent);
}

impl EventSink for Vec<RollbackEvent> {
    fn emit(&mut self, event: RollbackEvent) {
        self.push(event);
    }
}
