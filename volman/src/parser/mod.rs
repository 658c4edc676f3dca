//! Grammars that recover typed records from DiskPart's column-aligned text.
//!
//! DiskPart has no machine-readable mode. Every grammar here works one line at a
//! time with named capture groups and bounded whitespace runs measured against real
//! listings: columns shift with the width of the volume number and collapse when
//! optional fields are blank, so nothing assumes fixed offsets.

pub mod attributes;
pub mod confirm;
pub mod disk;
pub mod partition;
pub mod volume;

pub use attributes::{parse_read_only, ReadOnlyEntry};
pub use confirm::{Confirmation, Verdict};
pub use disk::parse_disks;
pub use partition::parse_partitions;
pub use volume::parse_volumes;

use crate::model::{Size, SizeUnit};
use regex::Captures;

/// Read `<value_group> <unit_group>B` out of a match. Missing groups yield `0 B`.
pub(crate) fn size_from(caps: &Captures<'_>, value_group: &str, unit_group: &str) -> Size {
    let value = caps
        .name(value_group)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let unit = caps
        .name(unit_group)
        .and_then(|m| SizeUnit::from_prefix(m.as_str()))
        .unwrap_or_default();
    Size::new(value, unit)
}

pub(crate) fn number_from(caps: &Captures<'_>) -> Option<u32> {
    caps.name("number")?.as_str().parse().ok()
}
