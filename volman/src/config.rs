//! Settings store.
//!
//! A small TOML file; every key is optional. Settings choose which executables are
//! launched, how long they may run and how chatty logging is. They never change how
//! output is parsed.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use volman_error::{VolmanError, VolmanResult};

pub const SETTINGS_FILE: &str = "volman.toml";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WEBSITE: &str = env!("CARGO_PKG_HOMEPAGE");

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub tools: ToolSettings,
    pub process: ProcessSettings,
    pub logging: LoggingSettings,
}

/// Executables and flags. The defaults wrap everything in `cmd /C`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolSettings {
    pub shell: String,
    pub shell_flag: String,
    /// Batch-scripted partitioning tool.
    pub script_tool: String,
    /// Flag that introduces the script path.
    pub script_flag: String,
    /// Single-shot labeling tool, invoked as `<label_tool> <letter> <label>`.
    pub label_tool: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            shell: "cmd".to_string(),
            shell_flag: "/C".to_string(),
            script_tool: "diskpart".to_string(),
            script_flag: "/s".to_string(),
            label_tool: "label".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessSettings {
    pub timeout_secs: u64,
    /// Directory for script artifacts; the platform temp directory when unset.
    pub temp_dir: Option<PathBuf>,
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            temp_dir: None,
        }
    }
}

impl ProcessSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Info-level logging of every command.
    pub basic: bool,
    /// Debug-level logging: scripts, argument lines and raw captured output.
    pub advanced: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            basic: true,
            advanced: false,
            file: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> VolmanResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> VolmanResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| VolmanError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Explicit path if given (must exist), else `volman.toml` in `dir` if present,
    /// else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> VolmanResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(SETTINGS_FILE);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }
}
