//! Process execution trait.

use crate::HalResult;
use std::process::Output;
use std::time::Duration;

/// External command runner.
///
/// Implementations must not return before the child has exited or the timeout has
/// elapsed. A child that outlives `timeout` is killed and reported as
/// [`crate::HalError::CommandTimeout`].
pub trait ProcessOps: Send + Sync {
    fn command_output(&self, program: &str, args: &[&str], timeout: Duration)
        -> HalResult<Output>;
}
