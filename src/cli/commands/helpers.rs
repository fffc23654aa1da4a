//! Shared helper functions for command execution.

use crate::rollback::Decision;
use std::io::BufRead;

/// Wait for the operator to press enter
///
/// Any line (empty included) confirms. End of input declines, so a closed
/// stdin can never trigger a reset.
pub(super) fn read_acknowledgment<R: BufRead>(input: &mut R) -> std::io::Result<Decision> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;

    Ok(if read == 0 {
        Decision::Decline
    } else {
        Decision::Confirm
    })
}
