//! Persisted settings for the geomark binary.
//! Stored as JSON in the platform-specific config directory via `directories::ProjectDirs`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::mapper::{DrawOptions, MapperConfig, DEFAULT_MARKER_COLOR, DEFAULT_MARKER_RADIUS};
use crate::render::{DEFAULT_BACKGROUND_GRAY, DEFAULT_DISPLAY_SIZE};

/// Settings persistence errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Application settings that can be saved and loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Directory holding the reference image and calibration file
    pub directory: String,
    /// Preview canvas width
    pub display_width: u32,
    /// Preview canvas height
    pub display_height: u32,
    /// Preview padding gray level
    pub background_gray: u8,
    /// Marker color (RGB)
    pub marker_color: [u8; 3],
    /// Marker radius in pixels
    pub marker_radius: u32,
    /// Open a preview after drawing
    pub show: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            directory: "map".to_string(),
            display_width: DEFAULT_DISPLAY_SIZE.0,
            display_height: DEFAULT_DISPLAY_SIZE.1,
            background_gray: DEFAULT_BACKGROUND_GRAY,
            marker_color: DEFAULT_MARKER_COLOR,
            marker_radius: DEFAULT_MARKER_RADIUS,
            show: true,
        }
    }
}

impl AppSettings {
    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "geomark", "geomark")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path.
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.json"))
    }

    /// Load settings from the config file, falling back to defaults.
    pub fn load() -> Self {
        Self::settings_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`; a missing or unparsable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        let mut loaded: Self = match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring unparsable settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        // Zero-sized canvases cannot hold a preview
        let defaults = Self::default();
        if loaded.display_width == 0 || loaded.display_height == 0 {
            loaded.display_width = defaults.display_width;
            loaded.display_height = defaults.display_height;
        }
        if loaded.directory.is_empty() {
            loaded.directory = defaults.directory;
        }

        loaded
    }

    /// Save settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn to_mapper_config(&self) -> MapperConfig {
        MapperConfig::default()
            .with_display_size(self.display_width, self.display_height)
            .with_background_gray(self.background_gray)
    }

    pub fn to_draw_options(&self) -> DrawOptions {
        DrawOptions::default()
            .with_color(self.marker_color)
            .with_radius(self.marker_radius)
            .with_show(self.show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file() -> PathBuf {
        std::env::temp_dir()
            .join(format!("geomark-settings-{}", uuid::Uuid::new_v4()))
            .join("settings.json")
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = scratch_file();
        let settings = AppSettings {
            directory: "/data/maps/site-a".to_string(),
            marker_color: [255, 0, 0],
            marker_radius: 9,
            show: false,
            ..AppSettings::default()
        };

        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path), settings);

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        assert_eq!(AppSettings::load_from(&scratch_file()), AppSettings::default());
    }

    #[test]
    fn test_partial_file_backfills_fields() {
        let path = scratch_file();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"marker_radius": 12, "display_width": 0}"#).unwrap();

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded.marker_radius, 12);
        assert_eq!(loaded.display_width, 1920);
        assert_eq!(loaded.directory, "map");

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let path = scratch_file();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(AppSettings::load_from(&path), AppSettings::default());

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_conversions() {
        let settings = AppSettings {
            display_width: 800,
            display_height: 600,
            background_gray: 64,
            marker_color: [1, 2, 3],
            marker_radius: 7,
            show: false,
            ..AppSettings::default()
        };

        let config = settings.to_mapper_config();
        assert_eq!(config.display_size, (800, 600));
        assert_eq!(config.background_gray, 64);

        let options = settings.to_draw_options();
        assert_eq!(options.color, [1, 2, 3]);
        assert_eq!(options.radius, 7);
        assert!(!options.show);
    }
}
