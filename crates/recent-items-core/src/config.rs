//! Centralized configuration for Recent Items.
//!
//! Constants are grouped by concern in unit structs; user-editable settings
//! live in [`Settings`], a JSON document next to the other per-user config.

use crate::error::{RecentError, Result};
use crate::jumplist::ListType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_CONFIG_DIR_NAME: &'static str = "recent-items";
    pub const SETTINGS_FILENAME: &'static str = "settings.json";
}

/// Jump List and Recent folder configuration.
pub struct JumpListConfig;

impl JumpListConfig {
    pub const DEFAULT_MAX_ENTRIES: u32 = 20;
    pub const RECENT_LINK_EXTENSION: &'static str = "lnk";
    pub const RECENT_DOCS_KEY: &'static str =
        r"Software\Microsoft\Windows\CurrentVersion\Explorer\RecentDocs";
}

/// User settings. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Catalog the shortcuts in the Recent folder.
    pub scan_recent_directory: bool,
    /// Catalog the Explorer RecentDocs list.
    pub scan_recent_docs: bool,
    /// Catalog the Jump Lists of `jump_list_app_ids`.
    pub scan_jump_lists: bool,
    pub jump_list_app_ids: Vec<String>,
    pub jump_list_types: Vec<ListType>,
    /// Per list, per app id.
    pub max_jump_list_entries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_recent_directory: true,
            scan_recent_docs: false,
            scan_jump_lists: true,
            jump_list_app_ids: Vec::new(),
            jump_list_types: ListType::ALL.to_vec(),
            max_jump_list_entries: JumpListConfig::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| RecentError::Io {
            message: format!("Failed to read {}", path.display()),
            path: Some(path.to_path_buf()),
            source: Some(e),
        })?;

        let json_error = |e: serde_json::Error| RecentError::Json {
            message: format!("Failed to parse {}: {}", path.display(), e),
            source: Some(e),
        };
        // A struct also deserializes from a JSON array, field by position.
        let value: serde_json::Value = serde_json::from_str(&contents).map_err(json_error)?;
        if !value.is_object() {
            return Err(RecentError::Config {
                message: format!("{} must contain a JSON object", path.display()),
            });
        }
        let settings: Settings = serde_json::from_value(value).map_err(json_error)?;
        settings.validate()?;

        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Re-read `path` and replace `self`.
    ///
    /// Returns whether anything changed, so the caller knows to rebuild its
    /// catalog. On error `self` is left untouched.
    pub fn reload(&mut self, path: &Path) -> Result<bool> {
        let fresh = Self::load(path)?;
        let changed = fresh != *self;
        if changed {
            info!("Settings changed");
            *self = fresh;
        }
        Ok(changed)
    }

    fn validate(&self) -> Result<()> {
        if self.jump_list_app_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(RecentError::Config {
                message: "jump_list_app_ids must not contain empty ids".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.scan_recent_directory);
        assert!(!settings.scan_recent_docs);
        assert!(settings.scan_jump_lists);
        assert!(settings.jump_list_app_ids.is_empty());
        assert_eq!(
            settings.jump_list_types,
            vec![ListType::Pinned, ListType::Recent, ListType::Frequent]
        );
        assert_eq!(settings.max_jump_list_entries, 20);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(&temp.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(
            &path,
            r#"{"scan_recent_directory": false, "jump_list_app_ids": ["Editor"], "jump_list_types": ["recent"]}"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert!(!settings.scan_recent_directory);
        assert!(settings.scan_jump_lists);
        assert_eq!(settings.jump_list_app_ids, vec!["Editor"]);
        assert_eq!(settings.jump_list_types, vec![ListType::Recent]);
        assert_eq!(settings.max_jump_list_entries, 20);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(RecentError::Json { .. })));
    }

    #[test]
    fn test_empty_app_id_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{"jump_list_app_ids": ["Editor", " "]}"#).unwrap();
        assert!(matches!(Settings::load(&path), Err(RecentError::Config { .. })));
    }

    #[test]
    fn test_reload_reports_changes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        let mut settings = Settings::default();

        assert!(!settings.reload(&path).unwrap());

        fs::write(&path, r#"{"scan_recent_directory": false}"#).unwrap();
        assert!(settings.reload(&path).unwrap());
        assert!(!settings.scan_recent_directory);

        assert!(!settings.reload(&path).unwrap());
    }

    #[test]
    fn test_non_object_settings_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");

        for contents in ["[false, true]", "[]", "true", "\"settings\""] {
            fs::write(&path, contents).unwrap();
            assert!(
                matches!(Settings::load(&path), Err(RecentError::Config { .. })),
                "{contents} should be rejected"
            );
        }
    }

    #[test]
    fn test_failed_reload_keeps_settings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        let mut settings = Settings {
            scan_recent_docs: true,
            ..Settings::default()
        };

        fs::write(&path, "[]").unwrap();
        assert!(settings.reload(&path).is_err());
        assert!(settings.scan_recent_docs);
    }
}
