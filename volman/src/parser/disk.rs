//! `list disk` rows.
//!
//! ```text
//!   Disk ###  Status         Size     Free     Dyn  Gpt
//!   --------  -------------  -------  -------  ---  ---
//!   Disk 0    Online          476 GB      0 B        *
//! * Disk 1    Online           14 GB  1024 KB   *    *
//! ```
//!
//! `Dyn` and `Gpt` are star flags. A star 2-3 blanks after `Free` is the dynamic
//! flag; any later star is the GPT flag.

use super::{number_from, size_from};
use crate::model::{Disk, MediaStatus};
use once_cell::sync::Lazy;
use regex::Regex;

static DISK_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[ *]\s*Disk\s(?P<number>\d{1,3})\s+",
        r"(?P<status>Online|Offline|No Media|Not Initialized|Missing|Foreign)\s+",
        r"(?P<size>\d+)\s(?P<unit>[KMGT]?)B\s+",
        r"(?P<free>\d+)\s(?P<free_unit>[KMGT]?)B",
        r"(?P<dyn>\s{2,3}\*)?(?P<gpt>\s{2,}\*)?\s*$",
    ))
    .expect("disk row grammar")
});

pub fn parse_disk_row(line: &str) -> Option<Disk> {
    let caps = DISK_ROW.captures(line)?;
    Some(Disk {
        number: number_from(&caps)?,
        status: caps
            .name("status")
            .and_then(|m| MediaStatus::from_token(m.as_str()))
            .unwrap_or_default(),
        size: size_from(&caps, "size", "unit"),
        free: size_from(&caps, "free", "free_unit"),
        dynamic: caps.name("dyn").is_some(),
        gpt: caps.name("gpt").is_some(),
        read_only: false,
    })
}

pub fn parse_disks(text: &str) -> Vec<Disk> {
    text.lines().filter_map(parse_disk_row).collect()
}
