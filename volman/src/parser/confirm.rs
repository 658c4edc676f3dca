//! Confirmation grammar for mutating actions.
//!
//! Each action knows one success sentence and optionally one rejection sentence.
//! Nothing else in the output is inspected: unexpected text, including localized
//! output, counts as unconfirmed.

/// Outcome of checking captured output against a [`Confirmation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Confirmed,
    /// The tool printed the known rejection sentence.
    Rejected,
    Unconfirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    /// Must appear for success. `None` means silence is success.
    pub success: Option<&'static str>,
    /// Takes precedence over `success` when both appear.
    pub rejection: Option<&'static str>,
}

pub const DISMOUNTED: Confirmation = Confirmation {
    success: Some("successfully dismounted and offlined the volume"),
    rejection: None,
};

pub const LETTER_ASSIGNED: Confirmation = Confirmation {
    success: Some("successfully assigned the drive letter or mount point"),
    rejection: None,
};

pub const READ_ONLY_SET: Confirmation = Confirmation {
    success: Some("Volume attributes set successfully"),
    rejection: None,
};

pub const READ_ONLY_CLEARED: Confirmation = Confirmation {
    success: Some("Volume attributes cleared successfully"),
    rejection: None,
};

/// `label.exe` prints nothing useful on success; only write protection is reported.
pub const LABEL_CHANGED: Confirmation = Confirmation {
    success: None,
    rejection: Some("The media is write protected"),
};

impl Confirmation {
    pub fn evaluate(&self, output: &str) -> Verdict {
        if self.rejection.is_some_and(|r| output.contains(r)) {
            return Verdict::Rejected;
        }
        match self.success {
            Some(expected) if !output.contains(expected) => Verdict::Unconfirmed,
            _ => Verdict::Confirmed,
        }
    }
}
