//! Rollback command implementation.
//!
//! Runs the rollback against the repository at `args.path`, rendering every
//! status event to the terminal. When confirmation is needed the prompt is
//! printed and stdin decides whether the pending plan runs.

use crate::cli::{Args, RuntimeConfig};
use crate::error::{CliError, Result, RollbackError};
use crate::git::GitCliOperations;
use crate::rollback::{Resolution, Rollback, RollbackOutcome};

use super::helpers::read_acknowledgment;

/// Execute rollback command, returning the process exit code
pub(super) async fn execute_rollback(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let options = args.resolve_options()?;
    log::debug!("Resolved options: {:?}", options);

    let git = GitCliOperations::open(&args.path).await?;
    let rollback = Rollback::with_options(options);
    let mut sink = config.output().clone();

    match rollback.run(&git, args.run_config(), &mut sink).await? {
        RollbackOutcome::NothingToRollBack | RollbackOutcome::DryRun { .. } => Ok(0),
        RollbackOutcome::Executed(report) => {
            log::info!(
                "Rolled back {} actions in {:.2}s",
                report.actions.len(),
                report.duration.as_secs_f64()
            );
            Ok(0)
        }
        RollbackOutcome::AwaitingConfirmation(pending) => {
            config.output().prompt(pending.prompt())?;

            let decision = tokio::task::spawn_blocking(|| {
                read_acknowledgment(&mut std::io::stdin().lock())
            })
            .await
            .map_err(|e| {
                RollbackError::Cli(CliError::ExecutionFailed {
                    command: "confirmation prompt".to_string(),
                    reason: format!("Task join error: {}", e),
                })
            })??;

            match pending.resume(&git, decision, &mut sink).await? {
                Resolution::Executed(_) => Ok(0),
                Resolution::Declined => Ok(1),
            }
        }
    }
}
