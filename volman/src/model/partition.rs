use super::{MediaStatus, Size, StorageRecord};
use serde::Serialize;

/// One row of `list partition` for the selected disk.
///
/// The listing has no status column, so `status` stays [`MediaStatus::Blank`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Partition {
    pub number: u32,
    /// Free-text type column (`Primary`, `Reserved`, `System`, ...).
    pub kind: String,
    pub status: MediaStatus,
    pub size: Size,
    pub offset: Size,
    pub read_only: bool,
}

impl StorageRecord for Partition {
    fn number(&self) -> u32 {
        self.number
    }

    fn status(&self) -> MediaStatus {
        self.status
    }

    fn size(&self) -> Size {
        self.size
    }

    fn read_only(&self) -> bool {
        self.read_only
    }

    fn is_valid(&self) -> bool {
        self.size.value > 0
    }
}
