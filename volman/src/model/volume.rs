use super::{MediaStatus, Size, StorageRecord};
use serde::{Serialize, Serializer};
use std::fmt;

/// Longest label the listing shows before truncating.
pub const LABEL_DISPLAY_WIDTH: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FileSystem {
    #[default]
    None,
    #[serde(rename = "NTFS")]
    Ntfs,
    #[serde(rename = "FAT32")]
    Fat32,
    #[serde(rename = "FAT")]
    Fat,
    #[serde(rename = "exFAT")]
    ExFat,
    #[serde(rename = "CDFS")]
    Cdfs,
    #[serde(rename = "UDF")]
    Udf,
    #[serde(rename = "ReFS")]
    Refs,
    #[serde(rename = "RAW")]
    Raw,
}

impl FileSystem {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "" => Some(FileSystem::None),
            "NTFS" => Some(FileSystem::Ntfs),
            "FAT32" => Some(FileSystem::Fat32),
            "FAT" => Some(FileSystem::Fat),
            "exFAT" => Some(FileSystem::ExFat),
            "CDFS" => Some(FileSystem::Cdfs),
            "UDF" => Some(FileSystem::Udf),
            "ReFS" => Some(FileSystem::Refs),
            "RAW" => Some(FileSystem::Raw),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileSystem::None => "",
            FileSystem::Ntfs => "NTFS",
            FileSystem::Fat32 => "FAT32",
            FileSystem::Fat => "FAT",
            FileSystem::ExFat => "exFAT",
            FileSystem::Cdfs => "CDFS",
            FileSystem::Udf => "UDF",
            FileSystem::Refs => "ReFS",
            FileSystem::Raw => "RAW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum VolumeType {
    #[default]
    None,
    Partition,
    Removable,
    #[serde(rename = "DVD-ROM")]
    DvdRom,
    #[serde(rename = "CD-ROM")]
    CdRom,
    Simple,
}

impl VolumeType {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "" => Some(VolumeType::None),
            "Partition" => Some(VolumeType::Partition),
            "Removable" => Some(VolumeType::Removable),
            "DVD-ROM" => Some(VolumeType::DvdRom),
            "CD-ROM" => Some(VolumeType::CdRom),
            "Simple" => Some(VolumeType::Simple),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeType::None => "",
            VolumeType::Partition => "Partition",
            VolumeType::Removable => "Removable",
            VolumeType::DvdRom => "DVD-ROM",
            VolumeType::CdRom => "CD-ROM",
            VolumeType::Simple => "Simple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MountState {
    Mounted,
    Unmounted,
}

/// An uppercase drive letter; always displayed with its colon (`E:`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DriveLetter(char);

impl DriveLetter {
    pub fn new(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        upper.is_ascii_uppercase().then_some(Self(upper))
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl fmt::Display for DriveLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.0)
    }
}

impl Serialize for DriveLetter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of `list volume`, plus the read-only flag back-filled by a second query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Volume {
    pub number: u32,
    pub letter: Option<DriveLetter>,
    pub label: String,
    pub file_system: FileSystem,
    pub volume_type: VolumeType,
    pub size: Size,
    pub status: MediaStatus,
    pub info: String,
    pub read_only: bool,
}

impl Volume {
    pub fn mount_state(&self) -> MountState {
        if self.status == MediaStatus::Offline {
            MountState::Unmounted
        } else {
            MountState::Mounted
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mount_state() == MountState::Mounted
    }

    /// `E:` or an empty string when no letter is assigned.
    pub fn letter_display(&self) -> String {
        self.letter.map(|l| l.to_string()).unwrap_or_default()
    }
}

impl StorageRecord for Volume {
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

    /// Mounted removable media only; fixed partitions are never touched.
    fn is_valid(&self) -> bool {
        self.is_mounted() && self.volume_type == VolumeType::Removable
    }
}
