//! Working tree scan.

use crate::error::Result;
use crate::git::VcsAdapter;

use super::events::{EventSink, RollbackEvent};
use super::planner::{PlannedStep, RollbackAction};

/// Confirmation text for discarding `files`
pub fn working_tree_confirmation(files: &[String]) -> String {
    let mut text = format!("Rolling back {} files:", files.len());
    for file in files {
        text.push_str("\n  ");
        text.push_str(file);
    }
    text
}

/// Schedule a working tree reset if any file is dirty
///
/// Untracked files are listed too, although `reset --hard` leaves them on disk.
pub async fn scan_working_tree<V, S>(vcs: &V, sink: &mut S) -> Result<Option<PlannedStep>>
where
    V: VcsAdapter,
    S: EventSink + ?Sized,
{
    let status = vcs.status().await?;
    let files = status.dirty_files();

    if files.is_empty() {
        sink.emit(RollbackEvent::CleanWorkingTree);
        return Ok(None);
    }

    if !status.not_added.is_empty() {
        log::debug!(
            "{} untracked files will be left in place by the reset",
            status.not_added.len()
        );
    }

    Ok(Some(PlannedStep {
        action: RollbackAction::WorkingTreeReset,
        confirmation: working_tree_confirmation(&files),
    }))
}
