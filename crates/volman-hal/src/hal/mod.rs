//! Process backends.
//!
//! `HostHal` spawns real processes; `FakeHal` records invocations and replays canned
//! output for tests.

pub mod fake_hal;
pub mod host_hal;
pub mod process_ops;

pub use fake_hal::{FakeHal, FakeResponse, Operation};
pub use host_hal::HostHal;
pub use process_ops::ProcessOps;
