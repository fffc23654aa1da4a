//! Confirmation-gated rollback of local history and working tree.
//!
//! A run plans what would be discarded (commits ahead of the remote tracking
//! branch, dirty files), passes the plan through the confirmation gate and
//! executes it through a [`VcsAdapter`]. Progress is reported as
//! [`RollbackEvent`]s; presentation is left to the caller.

mod config;
mod divergence;
mod events;
mod executor;
mod gate;
mod planner;
mod scanner;

pub use config::{
    DEFAULT_MAX_HISTORY, RollbackOptions, RollbackOverrides, RollbackTargets, RunConfig,
    TargetOverrides,
};
pub use divergence::{Divergence, analyze_history, find_divergence, history_confirmation};
pub use events::{CONFIRM_PROMPT, EventLevel, EventSink, RollbackEvent};
pub use executor::{ExecutionReport, execute};
pub use gate::{Decision, GateState, PendingConfirmation, Resolution, confirmation_prompt};
pub use planner::{PlannedStep, RollbackAction, RollbackPlan, plan};
pub use scanner::{scan_working_tree, working_tree_confirmation};

use crate::error::Result;
use crate::git::VcsAdapter;

/// How a rollback run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// No rollback type found anything to discard
    NothingToRollBack,
    /// Dry run; nothing was executed
    DryRun {
        /// Joined confirmation text
        summary: String,
    },
    /// The plan ran without asking (forced)
    Executed(ExecutionReport),
    /// The caller must obtain a decision and resume
    AwaitingConfirmation(PendingConfirmation),
}

/// Configured rollback operation
///
/// Built once from caller overrides merged onto the defaults, then run
/// against any repository adapter.
#[derive(Debug, Clone, Default)]
pub struct Rollback {
    options: RollbackOptions,
}

impl Rollback {
    /// Create a rollback operation from caller overrides
    pub fn new(overrides: RollbackOverrides) -> Self {
        Self {
            options: RollbackOptions::merged(overrides),
        }
    }

    /// Create a rollback operation from already resolved options
    pub fn with_options(options: RollbackOptions) -> Self {
        Self { options }
    }

    /// Resolved options for this operation
    pub fn options(&self) -> &RollbackOptions {
        &self.options
    }

    /// Plan the rollback and apply the confirmation gate
    pub async fn run<V, S>(&self, vcs: &V, run: RunConfig, sink: &mut S) -> Result<RollbackOutcome>
    where
        V: VcsAdapter,
        S: EventSink + ?Sized,
    {
        let plan = plan(vcs, &self.options, sink).await?;

        match GateState::decide(&plan, run, &self.options) {
            GateState::SkippedEmpty => {
                sink.emit(RollbackEvent::NothingToRollBack);
                Ok(RollbackOutcome::NothingToRollBack)
            }
            GateState::SkippedDryRun { summary } => {
                sink.emit(RollbackEvent::DryRun {
                    summary: summary.clone(),
                });
                Ok(RollbackOutcome::DryRun { summary })
            }
            GateState::Forced => Ok(RollbackOutcome::Executed(
                execute(vcs, &plan, sink).await?,
            )),
            GateState::AwaitingConfirmation { prompt } => Ok(
                RollbackOutcome::AwaitingConfirmation(PendingConfirmation::new(prompt, plan)),
            ),
        }
    }
}
