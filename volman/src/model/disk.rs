use super::{MediaStatus, Size, StorageRecord};
use serde::Serialize;

/// One row of `list disk`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Disk {
    pub number: u32,
    pub status: MediaStatus,
    pub size: Size,
    pub free: Size,
    pub dynamic: bool,
    pub gpt: bool,
    pub read_only: bool,
}

impl StorageRecord for Disk {
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
        self.status == MediaStatus::Online
    }
}
