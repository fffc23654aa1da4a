//! Execution of planned rollback actions.

use crate::error::Result;
use crate::git::VcsAdapter;

use super::events::{EventSink, RollbackEvent};
use super::planner::{RollbackAction, RollbackPlan};

/// What an executed rollback did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Actions run, in order
    pub actions: Vec<RollbackAction>,
    /// Duration of the rollback
    pub duration: std::time::Duration,
}

/// Run a single action against the repository
async fn run_action<V, S>(vcs: &V, action: &RollbackAction, sink: &mut S) -> Result<()>
where
    V: VcsAdapter,
    S: EventSink + ?Sized,
{
    match action {
        RollbackAction::HistoryReset { target_hash } => {
            sink.emit(RollbackEvent::RollingBackHistory {
                hash: target_hash.clone(),
            });
            vcs.reset_to_commit(target_hash).await?;
            sink.emit(RollbackEvent::HistoryRolledBack {
                hash: target_hash.clone(),
            });
        }
        RollbackAction::WorkingTreeReset => {
            sink.emit(RollbackEvent::RollingBackWorkingTree);
            vcs.reset_working_tree().await?;
            sink.emit(RollbackEvent::WorkingTreeRolledBack);
        }
    }
    Ok(())
}

/// Run every planned action in order, stopping at the first failure
pub async fn execute<V, S>(vcs: &V, plan: &RollbackPlan, sink: &mut S) -> Result<ExecutionReport>
where
    V: VcsAdapter,
    S: EventSink + ?Sized,
{
    let start_time = std::time::Instant::now();
    let mut actions = Vec::with_capacity(plan.len());

    for action in plan.actions() {
        log::info!("Executing {:?}", action);
        run_action(vcs, action, sink).await?;
        actions.push(action.clone());
    }

    sink.emit(RollbackEvent::RollbackPerformed);

    Ok(ExecutionReport {
        actions,
        duration: start_time.elapsed(),
    })
}
