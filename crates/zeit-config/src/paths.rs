//! Well-known directories for config and state.

use std::path::PathBuf;

/// Environment variable to override the config directory.
///
/// Useful for testing and for running several instances side by side.
const CONFIG_DIR_ENV: &str = "ZEIT_CONFIG_DIR";

/// Environment variable to override the data directory.
const DATA_DIR_ENV: &str = "ZEIT_DATA_DIR";

/// Default config filename within the config directory.
pub(crate) const USER_CONFIG_FILE: &str = "config.toml";

/// Application name for platform directory resolution.
const APP_NAME: &str = "zeit";

/// The config directory.
///
/// Checks `ZEIT_CONFIG_DIR` first, then falls back to the platform default
/// (`~/.config/zeit` on Linux).
pub fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Full path of the user config file.
pub fn xdg_config_path() -> Option<PathBuf> {
    xdg_config_dir().map(|d| d.join(USER_CONFIG_FILE))
}

/// The data directory, where the session token lives.
///
/// Checks `ZEIT_DATA_DIR` first, then falls back to the platform default
/// (`~/.local/share/zeit` on Linux).
pub fn data_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::data_dir().map(|d| d.join(APP_NAME))
}
