//! Domain records recovered from DiskPart listings.
//!
//! All enumerations are closed: unknown tokens never reach these types because the
//! grammars only accept the spellings listed in each `from_token`.

pub mod disk;
pub mod partition;
pub mod size;
pub mod volume;

pub use disk::Disk;
pub use partition::Partition;
pub use size::{Size, SizeUnit};
pub use volume::{DriveLetter, FileSystem, MountState, Volume, VolumeType, LABEL_DISPLAY_WIDTH};

use serde::Serialize;
use std::fmt;

/// Status column shared by volume and disk listings. `Blank` stands for an empty column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaStatus {
    #[default]
    Blank,
    Healthy,
    NoMedia,
    Online,
    Offline,
    NotInitialized,
    Missing,
    Foreign,
}

impl MediaStatus {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "" => Some(MediaStatus::Blank),
            "Healthy" => Some(MediaStatus::Healthy),
            "No Media" => Some(MediaStatus::NoMedia),
            "Online" => Some(MediaStatus::Online),
            "Offline" => Some(MediaStatus::Offline),
            "Not Initialized" => Some(MediaStatus::NotInitialized),
            "Missing" => Some(MediaStatus::Missing),
            "Foreign" => Some(MediaStatus::Foreign),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaStatus::Blank => "",
            MediaStatus::Healthy => "Healthy",
            MediaStatus::NoMedia => "No Media",
            MediaStatus::Online => "Online",
            MediaStatus::Offline => "Offline",
            MediaStatus::NotInitialized => "Not Initialized",
            MediaStatus::Missing => "Missing",
            MediaStatus::Foreign => "Foreign",
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape common to volumes, disks and partitions.
pub trait StorageRecord {
    fn number(&self) -> u32;
    fn status(&self) -> MediaStatus;
    fn size(&self) -> Size;
    fn read_only(&self) -> bool;

    /// Whether the record may be the target of a mutating operation.
    fn is_valid(&self) -> bool;
}
