//! Platform directory resolution.

use std::path::PathBuf;

use crate::PlatformError;

pub const APP_NAME: &str = "sara";

/// Returns the platform-specific configuration directory for Sara.
///
/// - macOS: `~/Library/Application Support/sara`
/// - Linux: `$XDG_CONFIG_HOME/sara` (defaults to `~/.config/sara`)
/// - Windows: `%APPDATA%\sara`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory for Sara.
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the path to the main configuration file.
pub fn config_file() -> Result<PathBuf, PlatformError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Returns the path of the line-editor history file.
pub fn input_history_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("input_history.txt"))
}
