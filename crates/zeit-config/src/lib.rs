//! Configuration for the Zeiterfassung client.
//!
//! Resolution order (later overrides earlier):
//! 1. Built-in defaults
//! 2. `~/.config/zeit/config.toml` (override the directory with
//!    `ZEIT_CONFIG_DIR`)
//! 3. Environment variables (`ZEIT_SERVER_URL`, `ZEIT_TIMEOUT_SECS`)
//!
//! ```toml
//! server_url = "https://zeiterfassung.bbqgmbh.de"
//! timeout_secs = 30
//! ```

pub mod error;
pub mod paths;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::{ConfigError, Result};
pub use paths::{data_dir, xdg_config_dir, xdg_config_path};

const SERVER_URL_ENV: &str = "ZEIT_SERVER_URL";
const TIMEOUT_ENV: &str = "ZEIT_TIMEOUT_SECS";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZeitConfig {
    /// Base URL of the Zeiterfassung backend.
    pub server_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ZeitConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ZeitConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load the user config file, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match xdg_config_path() {
            Some(path) if path.is_file() => Self::load_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load config from a specific file path (no discovery).
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(SERVER_URL_ENV)
            && !url.is_empty()
        {
            self.server_url = url;
        }
        if let Ok(raw) = std::env::var(TIMEOUT_ENV)
            && let Ok(secs) = raw.parse()
        {
            self.timeout_secs = secs;
        }
    }
}
