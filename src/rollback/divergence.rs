//! History divergence analysis.
//!
//! Finds the local commits that are newer than the remote tracking branch's
//! head and therefore have to be discarded to match the remote.

use crate::error::Result;
use crate::git::{CommitInfo, VcsAdapter};

use super::config::RollbackOptions;
use super::events::{EventSink, RollbackEvent};
use super::planner::{PlannedStep, RollbackAction};

/// Relationship between a local log window and the remote head
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    /// Remote head is the newest local commit
    InSync,
    /// Local commits newer than the remote head, newest first
    Ahead(Vec<CommitInfo>),
    /// Remote head does not appear in the local window
    NotFound,
}

/// Locate `remote_head` in `local` (newest first) and return what precedes it
pub fn find_divergence(local: &[CommitInfo], remote_head: &CommitInfo) -> Divergence {
    match local.iter().position(|commit| commit.hash == remote_head.hash) {
        Some(0) => Divergence::InSync,
        Some(index) => Divergence::Ahead(local[..index].to_vec()),
        None => Divergence::NotFound,
    }
}

/// Confirmation text for discarding `commits`
pub fn history_confirmation(commits: &[CommitInfo]) -> String {
    let mut text = format!("Rolling back {} commits:", commits.len());
    for commit in commits {
        text.push_str("\n  ");
        text.push_str(commit.summary());
    }
    text
}

/// Fetch the tracking branch and schedule a history reset if local is ahead
///
/// Every "nothing to do" condition is reported through `sink` and yields
/// `None`; only adapter failures are errors.
pub async fn analyze_history<V, S>(
    vcs: &V,
    options: &RollbackOptions,
    sink: &mut S,
) -> Result<Option<PlannedStep>>
where
    V: VcsAdapter,
    S: EventSink + ?Sized,
{
    let remotes = vcs.get_remotes().await?;
    let has_remote = remotes.iter().any(|remote| remote.name == options.remote);
    let branch = vcs.current_branch().await?;

    let branch = match branch {
        Some(branch) if has_remote => branch,
        branch => {
            sink.emit(RollbackEvent::RemoteNotFound {
                remote: options.remote.clone(),
                branch,
            });
            return Ok(None);
        }
    };

    sink.emit(RollbackEvent::Fetching {
        remote: options.remote.clone(),
        branch: branch.clone(),
    });
    vcs.fetch(&options.remote, &branch).await?;

    let remote_ref = format!("{}/{}", options.remote, branch);
    let local_log = vcs.recent_commits(options.max_history).await?;
    let remote_log = vcs.ref_commits(&remote_ref, 1).await?;

    if local_log.is_empty() {
        sink.emit(RollbackEvent::NoLocalCommits);
        return Ok(None);
    }

    let Some(remote_head) = remote_log.into_iter().next() else {
        sink.emit(RollbackEvent::NoRemoteCommits { remote_ref });
        return Ok(None);
    };

    match find_divergence(&local_log, &remote_head) {
        Divergence::InSync => {
            sink.emit(RollbackEvent::NoCommitsToRollBack);
            Ok(None)
        }
        Divergence::NotFound => {
            log::warn!(
                "Remote head {} not found in {} local commits",
                remote_head.hash,
                local_log.len()
            );
            sink.emit(RollbackEvent::RemoteCommitNotFound {
                remote_ref,
                hash: remote_head.hash,
                window: local_log.len(),
            });
            Ok(None)
        }
        Divergence::Ahead(commits) => {
            log::debug!(
                "{} local commits ahead of {}",
                commits.len(),
                remote_ref
            );
            Ok(Some(PlannedStep {
                action: RollbackAction::HistoryReset {
                    target_hash: remote_head.hash,
                },
                confirmation: history_confirmation(&commits),
            }))
        }
    }
}
