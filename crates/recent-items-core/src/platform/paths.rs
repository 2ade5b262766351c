//! Platform-specific path utilities.
//!
//! This module provides functions to get platform-specific paths for:
//! - The per-user Recent shortcut folder
//! - The settings file

use crate::config::AppConfig;
use crate::error::{RecentError, Result};
use std::path::PathBuf;

/// Get the per-user Recent shortcut folder.
///
/// # Platform Behavior
/// - **Windows**: `%APPDATA%\Microsoft\Windows\Recent`
/// - **Other**: `Unsupported`
pub fn recent_dir() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let data_dir = dirs::data_dir().ok_or_else(|| RecentError::Config {
            message: "Could not determine app data directory".to_string(),
        })?;
        Ok(data_dir.join("Microsoft").join("Windows").join("Recent"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        Err(RecentError::Unsupported(
            "The Recent shortcut folder only exists on Windows".to_string(),
        ))
    }
}

/// Get the settings file path.
///
/// # Platform Behavior
/// - **Linux**: `~/.config/recent-items/settings.json`
/// - **Windows**: `%APPDATA%\recent-items\settings.json`
/// - **macOS**: `~/Library/Application Support/recent-items/settings.json`
pub fn settings_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| RecentError::Config {
        message: "Could not determine platform config directory".to_string(),
    })?;
    Ok(config_dir
        .join(AppConfig::APP_CONFIG_DIR_NAME)
        .join(AppConfig::SETTINGS_FILENAME))
}
