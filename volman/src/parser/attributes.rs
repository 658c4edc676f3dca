//! `attributes volume` blocks and how they map back onto a listing.
//!
//! A batch of `select volume N` / `attributes volume` pairs produces one combined
//! output:
//!
//! ```text
//! Volume 3 is the selected volume.
//!
//! Read-only              : No
//! Hidden                 : No
//! ```
//!
//! The selection echo is used as an identity marker when present. Without it the
//! only correlation is emission order.

use crate::model::Volume;
use once_cell::sync::Lazy;
use regex::Regex;

static SELECTED_VOLUME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Volume (?P<number>\d+) is the selected volume\.").expect("selection grammar")
});

static READ_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Read-only\s*:\s*(?P<flag>Yes|No)\b").expect("read-only grammar"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOnlyEntry {
    /// Volume named by the closest preceding selection echo, if any.
    pub volume: Option<u32>,
    pub read_only: bool,
}

/// Every read-only line in output order.
pub fn parse_read_only(text: &str) -> Vec<ReadOnlyEntry> {
    let mut entries = Vec::new();
    let mut selected = None;

    for line in text.lines().map(str::trim) {
        if let Some(caps) = SELECTED_VOLUME.captures(line) {
            selected = caps["number"].parse().ok();
        } else if let Some(caps) = READ_ONLY.captures(line) {
            entries.push(ReadOnlyEntry {
                volume: selected.take(),
                read_only: &caps["flag"] == "Yes",
            });
        }
    }
    entries
}

/// How a batch of flags was matched to volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correlation {
    /// Every entry carried a selection echo; flags went to the volume with that number.
    ByNumber,
    /// The Kth entry went to the Kth volume.
    Positional,
}

/// Write flags onto `volumes`; volumes without a matching entry keep their value.
///
/// Returns the correlation used and how many volumes were updated.
pub fn apply_read_only(entries: &[ReadOnlyEntry], volumes: &mut [Volume]) -> (Correlation, usize) {
    let identified = !entries.is_empty() && entries.iter().all(|e| e.volume.is_some());

    if identified {
        let mut assigned = 0;
        for entry in entries {
            if let Some(volume) = volumes.iter_mut().find(|v| Some(v.number) == entry.volume) {
                volume.read_only = entry.read_only;
                assigned += 1;
            }
        }
        return (Correlation::ByNumber, assigned);
    }

    let mut assigned = 0;
    for (volume, entry) in volumes.iter_mut().zip(entries) {
        volume.read_only = entry.read_only;
        assigned += 1;
    }
    (Correlation::Positional, assigned)
}
