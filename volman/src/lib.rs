//! volman library.
//!
//! Drives DiskPart through batch scripts and turns its column-aligned text back
//! into typed volumes, disks and partitions. The binary in `main.rs` is a thin
//! front end over [`volume_process::DiskVolumeProcess`].

pub mod cli;
pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod render;
pub mod status;
pub mod volume_process;

pub use status::{Outcome, VolumeStatus};
pub use volume_process::DiskVolumeProcess;
