//! Confirmation gate between planning and execution.
//!
//! ```text
//! PLANNING ─┬─> SKIPPED_EMPTY
//!           ├─> SKIPPED_DRYRUN
//!           ├─> FORCED ───────────────────────> EXECUTING ─> DONE
//!           └─> AWAITING_CONFIRMATION ─confirm─┘
//! ```
//!
//! Waiting is not done here: an awaiting plan is handed back to the caller as
//! a [`PendingConfirmation`], which the caller resumes with a [`Decision`].

use crate::error::Result;
use crate::git::VcsAdapter;

use super::config::{RollbackOptions, RunConfig};
use super::events::{CONFIRM_PROMPT, EventSink, RollbackEvent};
use super::executor::{ExecutionReport, execute};
use super::planner::RollbackPlan;

/// Gate decision for a finished plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Nothing was scheduled
    SkippedEmpty,
    /// Dry run; carries the joined confirmation text
    SkippedDryRun {
        /// Joined confirmation text
        summary: String,
    },
    /// Execute without asking
    Forced,
    /// Ask the operator first
    AwaitingConfirmation {
        /// Confirmation text plus the trailing prompt line
        prompt: String,
    },
}

impl GateState {
    /// Decide what happens to `plan`; an empty plan wins over dry and force
    pub fn decide(plan: &RollbackPlan, run: RunConfig, options: &RollbackOptions) -> Self {
        if plan.is_empty() {
            GateState::SkippedEmpty
        } else if run.dry {
            GateState::SkippedDryRun {
                summary: plan.summary(),
            }
        } else if options.force {
            GateState::Forced
        } else {
            GateState::AwaitingConfirmation {
                prompt: confirmation_prompt(plan),
            }
        }
    }
}

/// Confirmation text followed by the prompt line
pub fn confirmation_prompt(plan: &RollbackPlan) -> String {
    format!("{}\n{}", plan.summary(), CONFIRM_PROMPT)
}

/// Operator answer to a confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run the plan
    Confirm,
    /// Abandon the plan
    Decline,
}

/// How a pending confirmation was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The plan ran
    Executed(ExecutionReport),
    /// The operator declined; nothing ran
    Declined,
}

/// A plan waiting for the operator's decision
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending confirmation does nothing until resumed"]
pub struct PendingConfirmation {
    prompt: String,
    plan: RollbackPlan,
}

impl PendingConfirmation {
    pub(super) fn new(prompt: String, plan: RollbackPlan) -> Self {
        Self { prompt, plan }
    }

    /// Text to show the operator, ending with the prompt line
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The plan that runs on confirmation
    pub fn plan(&self) -> &RollbackPlan {
        &self.plan
    }

    /// Continue the run with the operator's decision
    pub async fn resume<V, S>(self, vcs: &V, decision: Decision, sink: &mut S) -> Result<Resolution>
    where
        V: VcsAdapter,
        S: EventSink + ?Sized,
    {
        match decision {
            Decision::Confirm => Ok(Resolution::Executed(execute(vcs, &self.plan, sink).await?)),
            Decision::Decline => {
                log::info!("Operator declined rollback of {} steps", self.plan.len());
                sink.emit(RollbackEvent::ConfirmationDeclined);
                Ok(Resolution::Declined)
            }
        }
    }
}
