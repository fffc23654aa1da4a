//! Rollback planning.
//!
//! A [`RollbackPlan`] is the ordered list of what a run would discard. Each
//! [`PlannedStep`] pairs the action with the text shown to the operator, so
//! the two can never get out of step.

use crate::error::Result;
use crate::git::VcsAdapter;

use super::config::RollbackOptions;
use super::divergence::analyze_history;
use super::events::EventSink;
use super::scanner::scan_working_tree;

/// A mutating operation scheduled by the planner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackAction {
    /// `reset --hard <target_hash>`
    HistoryReset {
        /// Remote head to reset to
        target_hash: String,
    },
    /// `reset --hard` of the working tree
    WorkingTreeReset,
}

/// One scheduled action and its confirmation text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    /// What will be executed
    pub action: RollbackAction,
    /// What the operator is told will be discarded
    pub confirmation: String,
}

/// Ordered steps of a rollback run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollbackPlan {
    steps: Vec<PlannedStep>,
}

impl RollbackPlan {
    /// Append a step; steps are never reordered
    pub fn push(&mut self, step: PlannedStep) {
        self.steps.push(step);
    }

    /// Scheduled steps in execution order
    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    /// Scheduled actions in execution order
    pub fn actions(&self) -> impl Iterator<Item = &RollbackAction> {
        self.steps.iter().map(|step| &step.action)
    }

    /// Confirmation lines, parallel to [`Self::actions`]
    pub fn confirmations(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.confirmation.as_str())
    }

    /// All confirmation lines joined by newlines
    pub fn summary(&self) -> String {
        self.confirmations().collect::<Vec<_>>().join("\n")
    }

    /// Whether nothing was scheduled
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of scheduled steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

impl FromIterator<PlannedStep> for RollbackPlan {
    fn from_iter<I: IntoIterator<Item = PlannedStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Run the enabled analyses, history first, and collect their steps
pub async fn plan<V, S>(vcs: &V, options: &RollbackOptions, sink: &mut S) -> Result<RollbackPlan>
where
    V: VcsAdapter,
    S: EventSink + ?Sized,
{
    let mut plan = RollbackPlan::default();

    if options.rollback.history
        && let Some(step) = analyze_history(vcs, options, sink).await?
    {
        plan.push(step);
    }

    if options.rollback.working_tree
        && let Some(step) = scan_working_tree(vcs, sink).await?
    {
        plan.push(step);
    }

    log::debug!("Planned {} rollback steps", plan.len());
    Ok(plan)
}
