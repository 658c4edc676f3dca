//! `list volume` rows.
//!
//! ```text
//!   Volume ###  Ltr  Label        Fs     Type        Size     Status     Info
//!   ----------  ---  -----------  -----  ----------  -------  ---------  --------
//!   Volume 2     C                NTFS   Partition    465 GB  Healthy    Boot
//! * Volume 3     F   USB DRIVE    FAT32  Removable     14 GB  Healthy
//! ```
//!
//! The number is left-aligned in a 3-wide column, so the gap before the letter
//! column is 3 to 5 blanks. The letter column is a single character (blank when no
//! letter is assigned) followed by 2 to 4 blanks. Labels are cut at 11 characters.

use super::{number_from, size_from};
use crate::model::{DriveLetter, FileSystem, MediaStatus, Volume, VolumeType};
use once_cell::sync::Lazy;
use regex::Regex;

static VOLUME_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[ *]\s*Volume\s(?P<number>\d{1,3})",
        r"\s{3,5}(?P<letter>[A-Z ])",
        r"\s{2,4}(?P<label>.{0,11}?)\s+",
        r"(?:(?P<fs>NTFS|FAT32|FAT|exFAT|CDFS|UDF|ReFS|RAW)\s+)?",
        r"(?:(?P<kind>Partition|Removable|DVD-ROM|CD-ROM|Simple)\s+)?",
        r"(?P<size>\d+)\s(?P<unit>[KMGT]?)B",
        r"(?:\s+(?P<status>Healthy|No Media|Online|Offline))?",
        r"\s*(?P<info>.*?)\s*$",
    ))
    .expect("volume row grammar")
});

/// Parse one listing row.
pub fn parse_volume_row(line: &str) -> Option<Volume> {
    let caps = VOLUME_ROW.captures(line)?;
    let text = |name: &str| caps.name(name).map(|m| m.as_str()).unwrap_or("");

    Some(Volume {
        number: number_from(&caps)?,
        letter: text("letter").chars().next().and_then(DriveLetter::new),
        label: text("label").trim().to_string(),
        file_system: FileSystem::from_token(text("fs")).unwrap_or_default(),
        volume_type: VolumeType::from_token(text("kind")).unwrap_or_default(),
        size: size_from(&caps, "size", "unit"),
        status: MediaStatus::from_token(text("status")).unwrap_or_default(),
        info: text("info").to_string(),
        read_only: false,
    })
}

/// Parse every recognizable row; headers, separators and chatter are skipped.
pub fn parse_volumes(text: &str) -> Vec<Volume> {
    text.lines().filter_map(parse_volume_row).collect()
}
