//! Command execution.
//!
//! Validates arguments, runs the rollback command and turns its result into
//! a process exit code with operator-facing error output.

mod helpers;
mod rollback;

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;

use rollback::execute_rollback;

/// Execute the rollback based on parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        // Create output for validation errors (never quiet)
        let output = super::OutputManager::new(false);
        output.error(&validation_error.to_string());
        return Ok(2);
    }

    let config = RuntimeConfig::from(&args);

    match execute_rollback(&args, &config).await {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            config.error_println(&format!("Rollback failed: {}", e));

            if e.may_have_mutated() {
                config.error_println(
                    "The repository may be partially rolled back; inspect it before retrying",
                );
            }

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() && !config.is_quiet() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.println(&format!("  • {}", suggestion));
                }
            }

            Ok(1)
        }
    }
}
