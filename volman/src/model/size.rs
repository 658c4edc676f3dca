use serde::Serialize;
use std::fmt;

/// Unit postfix as printed by DiskPart (`B`, `KB`, `MB`, `GB`, `TB`).
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SizeUnit {
    /// Plain bytes (`0 B`).
    #[default]
    None,
    KB,
    MB,
    GB,
    TB,
}

impl SizeUnit {
    /// Parse the single prefix letter in front of `B`; an empty prefix is plain bytes.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "" | " " => Some(SizeUnit::None),
            "K" => Some(SizeUnit::KB),
            "M" => Some(SizeUnit::MB),
            "G" => Some(SizeUnit::GB),
            "T" => Some(SizeUnit::TB),
            _ => None,
        }
    }

    pub fn multiplier(&self) -> u64 {
        match self {
            SizeUnit::None => 1,
            SizeUnit::KB => 1 << 10,
            SizeUnit::MB => 1 << 20,
            SizeUnit::GB => 1 << 30,
            SizeUnit::TB => 1 << 40,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeUnit::None => "B",
            SizeUnit::KB => "KB",
            SizeUnit::MB => "MB",
            SizeUnit::GB => "GB",
            SizeUnit::TB => "TB",
        }
    }
}

/// A rounded magnitude with its unit, exactly as listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Size {
    pub value: u64,
    pub unit: SizeUnit,
}

impl Size {
    pub fn new(value: u64, unit: SizeUnit) -> Self {
        Self { value, unit }
    }

    /// Approximate byte count; DiskPart rounds, so this is never exact above `B`.
    pub fn approx_bytes(&self) -> u64 {
        self.value.saturating_mul(self.unit.multiplier())
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.as_str())
    }
}
