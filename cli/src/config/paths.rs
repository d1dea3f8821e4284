//! Default on-disk locations under `~/.config/gpx/`.
use std::path::PathBuf;

use crate::error::StoreError;

/// File name of the profile store.
pub const CONFIG_FILE: &str = "config.json";

/// File name of the active-profile state.
pub const STATE_FILE: &str = "state.json";

/// The current user's home directory.
///
/// # Errors
///
/// Returns [`StoreError::HomeDir`] if it cannot be determined.
pub fn home_dir() -> Result<PathBuf, StoreError> {
    dirs::home_dir().ok_or(StoreError::HomeDir)
}

/// `~/.config/gpx`.
///
/// # Errors
///
/// Returns [`StoreError::HomeDir`] if the home directory is unknown.
pub fn config_dir() -> Result<PathBuf, StoreError> {
    Ok(home_dir()?.join(".config").join("gpx"))
}

/// `~/.config/gpx/config.json`.
///
/// # Errors
///
/// Returns [`StoreError::HomeDir`] if the home directory is unknown.
pub fn default_config_path() -> Result<PathBuf, StoreError> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// `~/.config/gpx/state.json`.
///
/// # Errors
///
/// Returns [`StoreError::HomeDir`] if the home directory is unknown.
pub fn default_state_path() -> Result<PathBuf, StoreError> {
    Ok(config_dir()?.join(STATE_FILE))
}
