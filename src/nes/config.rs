// Core configuration, persisted as TOML

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default configuration file name
const CONFIG_FILE: &str = "nes_core.toml";

/// Driver configuration
///
/// Loaded from `nes_core.toml` next to the working directory when present;
/// otherwise every field takes its default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NesConfig {
    /// Emit a `log` diagnostic whenever an undocumented opcode executes
    pub log_illegal_opcodes: bool,

    /// Emit a nestest-format trace line (at `log::trace!` level) before
    /// every CPU instruction
    pub trace_cpu: bool,
}

impl Default for NesConfig {
    fn default() -> Self {
        NesConfig {
            log_illegal_opcodes: true,
            trace_cpu: false,
        }
    }
}

impl NesConfig {
    /// Load the configuration from the default path, falling back to
    /// defaults when the file is missing or malformed.
    pub fn load_or_default() -> Self {
        Self::load_from(Self::default_path()).unwrap_or_default()
    }

    /// Load the configuration from a specific path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        match toml::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("ignoring malformed config file: {}", e);
                None
            }
        }
    }

    /// Save the configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }

    /// Default configuration path (current directory).
    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }
}
