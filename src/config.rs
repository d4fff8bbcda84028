//! Configuration persistence for inkpea settings

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self::RED
    }
}

impl ShapeColor {
    pub const RED: Self = Self {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            255,
        ]
    }
}

/// Where exported photos land when no explicit path is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Pictures,
    Documents,
}

/// Editor configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Width of the editing surface; the preview height follows the photo's aspect ratio
    pub display_width: f32,
    /// Initial ink color for strokes and caption
    pub stroke_color: ShapeColor,
    /// Directory holding `sticker_<n>.png` assets
    pub sticker_dir: Option<PathBuf>,
    /// Font file for the caption; system fonts are tried when unset
    pub font_path: Option<PathBuf>,
    /// Destination folder for exports
    pub save_location: SaveLocation,
    /// Upper bound on stroke points kept per session
    pub max_stroke_points: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            display_width: 390.0,
            stroke_color: ShapeColor::RED,
            sticker_dir: None,
            font_path: None,
            save_location: SaveLocation::Pictures,
            max_stroke_points: 20_000,
        }
    }
}

impl EditorConfig {
    fn file_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("cannot resolve config directory")?;
        Ok(dir.join("inkpea").join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::file_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:#}", err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save configuration to disk
    pub fn save(&self) {
        if let Err(err) = Self::file_path().and_then(|path| self.save_to(&path)) {
            log::error!("Failed to save config: {:#}", err);
        }
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_color_to_rgba() {
        assert_eq!(ShapeColor::RED.to_rgba_u8(), [255, 0, 0, 255]);
        let odd = ShapeColor {
            r: 2.0,
            g: -1.0,
            b: 0.5,
        };
        assert_eq!(odd.to_rgba_u8(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "display_width": 428.0 }"#).unwrap();
        assert_eq!(config.display_width, 428.0);
        assert_eq!(config.max_stroke_points, 20_000);
        assert_eq!(config.save_location, SaveLocation::Pictures);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = EditorConfig {
            display_width: 512.0,
            stroke_color: ShapeColor::WHITE,
            sticker_dir: Some(PathBuf::from("/tmp/stickers")),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(EditorConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EditorConfig::load_from(&dir.path().join("absent.json")).is_err());
    }
}
