//! volman process layer.
//!
//! Everything that touches the operating system goes through [`ProcessOps`] so the
//! DiskPart workflows can be exercised in CI without spawning real processes.

pub mod hal;
pub mod runner;
pub mod script;

pub use hal::{FakeHal, FakeResponse, HostHal, Operation, ProcessOps};
pub use runner::{ExitKind, ProcessResult, ProcessRunner};
pub use script::ScriptedCliProcess;
pub use volman_error::{HalError, HalResult};
