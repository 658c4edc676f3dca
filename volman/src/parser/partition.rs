//! `list partition` rows (for the disk selected earlier in the same script).
//!
//! ```text
//!   Partition ###  Type              Size     Offset
//!   -------------  ----------------  -------  -------
//!   Partition 1    Primary            500 MB  1024 KB
//! ```

use super::{number_from, size_from};
use crate::model::{MediaStatus, Partition};
use once_cell::sync::Lazy;
use regex::Regex;

static PARTITION_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[ *]\s*Partition\s(?P<number>\d{1,3})\s+",
        r"(?P<kind>\S.*?)\s+",
        r"(?P<size>\d+)\s(?P<unit>[KMGT]?)B\s+",
        r"(?P<offset>\d+)\s(?P<offset_unit>[KMGT]?)B\s*$",
    ))
    .expect("partition row grammar")
});

pub fn parse_partition_row(line: &str) -> Option<Partition> {
    let caps = PARTITION_ROW.captures(line)?;
    Some(Partition {
        number: number_from(&caps)?,
        kind: caps.name("kind").map(|m| m.as_str().to_string()).unwrap_or_default(),
        status: MediaStatus::Blank,
        size: size_from(&caps, "size", "unit"),
        offset: size_from(&caps, "offset", "offset_unit"),
        read_only: false,
    })
}

pub fn parse_partitions(text: &str) -> Vec<Partition> {
    text.lines().filter_map(parse_partition_row).collect()
}
