use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type HalResult<T> = Result<T, HalError>;
pub type VolmanResult<T> = Result<T, VolmanError>;

#[derive(Error, Debug)]
pub enum HalError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Command timed out: {program} after {timeout_secs}s")]
    CommandTimeout { program: String, timeout_secs: u64 },

    #[error("Failed to write script artifact: {0}")]
    ScriptWrite(#[source] io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum VolmanError {
    #[error(transparent)]
    Hal(#[from] HalError),

    #[error("Failed to read settings from {path}: {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid settings file: {0}")]
    SettingsParse(#[from] toml::de::Error),

    #[error("Volume {0} is not present in the current listing")]
    UnknownVolume(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_program_and_duration() {
        let err = HalError::CommandTimeout {
            program: "cmd".to_string(),
            timeout_secs: 30,
        };
        assert_eq!(err.to_string(), "Command timed out: cmd after 30s");
    }

    #[test]
    fn hal_errors_convert_transparently() {
        let err: VolmanError = HalError::CommandNotFound("diskpart".to_string()).into();
        assert_eq!(err.to_string(), "Command not found: diskpart");
    }
}
