//! Closed status vocabulary returned by every query and action.
//!
//! Expected failures are values, not errors: callers receive the status together
//! with the raw text the tool printed so they can explain what went wrong.

use serde::Serialize;
use std::fmt;
use volman_hal::ExitKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeStatus {
    Ok,
    /// The process could not run, or the action's confirmation text was absent.
    Error,
    /// The process ran but its output matched no grammar.
    ErrorParse,
    /// The volume is not a mounted removable volume.
    ErrorInvalidVolume,
    /// The volume is already mounted.
    ErrorVolumeMounted,
    /// The tool refused because the media is write protected.
    ErrorWriteProtected,
    /// The process was killed after exceeding its timeout.
    ErrorTimeout,
}

impl VolumeStatus {
    pub fn is_ok(&self) -> bool {
        *self == VolumeStatus::Ok
    }

    pub fn description(&self) -> &'static str {
        match self {
            VolumeStatus::Ok => "Operation completed",
            VolumeStatus::Error => "The operation failed",
            VolumeStatus::ErrorParse => "The tool output could not be understood",
            VolumeStatus::ErrorInvalidVolume => "The volume is not a mounted removable volume",
            VolumeStatus::ErrorVolumeMounted => "The volume is already mounted",
            VolumeStatus::ErrorWriteProtected => "The media is write protected",
            VolumeStatus::ErrorTimeout => "The tool did not finish in time",
        }
    }
}

impl fmt::Display for VolumeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl From<ExitKind> for VolumeStatus {
    fn from(exit: ExitKind) -> Self {
        match exit {
            ExitKind::Ok => VolumeStatus::Ok,
            ExitKind::Error => VolumeStatus::Error,
            ExitKind::TimedOut => VolumeStatus::ErrorTimeout,
        }
    }
}

/// Status plus whatever the call produced and the raw text behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub status: VolumeStatus,
    pub value: T,
    pub stdout: String,
    pub stderr: String,
}

impl<T: Default> Outcome<T> {
    /// No process was started, so there is no captured text.
    pub fn empty(status: VolumeStatus) -> Self {
        Self {
            status,
            value: T::default(),
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

impl<T> Outcome<T> {
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    /// The message a front end should show for a non-Ok outcome: status, captured
    /// error text, then captured output when there is any.
    pub fn report(&self) -> String {
        let mut msg = format!("{} ({:?})", self.status, self.status);
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            msg.push_str("\n\nError output:\n");
            msg.push_str(stderr);
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            msg.push_str("\n\nTool output:\n");
            msg.push_str(stdout);
        }
        msg
    }
}
