// SPDX-License-Identifier: MPL-2.0
//! This module handles the lightbox configuration, including loading and saving
//! it to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[gallery]` - Preload radius and page spacing
//! - `[markup]` - Default tool, stroke width, color and the numeric stroke widths
//! - `[media]` - Extensions treated as animated (never editable)
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `LIGHTBOX_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use lightbox_core::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Keep three pages on each side decoded
//! config.gallery.preload = Some(3);
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::{DrawSettings, DrawTool, Rgba, StrokeWidth, StrokeWidthValues};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Lightbox";

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "LIGHTBOX_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Paging and preload settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Pages kept decoded on each side of the current page. 0 keeps all pages.
    #[serde(default = "default_preload", skip_serializing_if = "Option::is_none")]
    pub preload: Option<usize>,

    /// Horizontal gap between pages, in points.
    #[serde(default = "default_page_spacing", skip_serializing_if = "Option::is_none")]
    pub page_spacing: Option<f32>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            preload: default_preload(),
            page_spacing: default_page_spacing(),
        }
    }
}

/// Annotation defaults inherited by new page surfaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkupConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_tool: Option<DrawTool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_stroke_width: Option<StrokeWidth>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_color: Option<Rgba>,

    #[serde(default = "default_thin_width", skip_serializing_if = "Option::is_none")]
    pub thin_width: Option<f32>,

    #[serde(default = "default_medium_width", skip_serializing_if = "Option::is_none")]
    pub medium_width: Option<f32>,

    #[serde(default = "default_large_width", skip_serializing_if = "Option::is_none")]
    pub large_width: Option<f32>,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            default_tool: Some(DrawTool::default()),
            default_stroke_width: Some(StrokeWidth::default()),
            default_color: Some(Rgba::default()),
            thin_width: default_thin_width(),
            medium_width: default_medium_width(),
            large_width: default_large_width(),
        }
    }
}

/// Media classification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaConfig {
    /// URL path extensions that mark an image as animated.
    #[serde(default = "default_animated_extensions")]
    pub animated_extensions: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            animated_extensions: default_animated_extensions(),
        }
    }
}

impl MediaConfig {
    /// Returns true if `extension` is listed as animated (case-insensitive).
    #[must_use]
    pub fn is_animated_extension(&self, extension: &str) -> bool {
        self.animated_extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Lightbox configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub markup: MarkupConfig,

    #[serde(default)]
    pub media: MediaConfig,
}

impl Config {
    /// Effective preload radius.
    #[must_use]
    pub fn preload_radius(&self) -> usize {
        self.gallery.preload.unwrap_or(DEFAULT_PRELOAD_RADIUS)
    }

    /// Effective page spacing, clamped to `0..=MAX_PAGE_SPACING`.
    #[must_use]
    pub fn page_spacing(&self) -> f32 {
        self.gallery
            .page_spacing
            .unwrap_or(DEFAULT_PAGE_SPACING)
            .clamp(0.0, MAX_PAGE_SPACING)
    }

    /// Numeric widths for the named stroke widths, clamped to the accepted range.
    #[must_use]
    pub fn stroke_widths(&self) -> StrokeWidthValues {
        let clamp = |value: Option<f32>, fallback: f32| {
            value
                .unwrap_or(fallback)
                .clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
        };
        StrokeWidthValues {
            thin: clamp(self.markup.thin_width, DEFAULT_THIN_STROKE_WIDTH),
            medium: clamp(self.markup.medium_width, DEFAULT_MEDIUM_STROKE_WIDTH),
            large: clamp(self.markup.large_width, DEFAULT_LARGE_STROKE_WIDTH),
        }
    }

    /// Initial process-wide draw settings.
    #[must_use]
    pub fn draw_settings(&self) -> DrawSettings {
        DrawSettings {
            tool: self.markup.default_tool.unwrap_or_default(),
            stroke_width: self.markup.default_stroke_width.unwrap_or_default(),
            color: self.markup.default_color.unwrap_or_default(),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_preload() -> Option<usize> {
    Some(DEFAULT_PRELOAD_RADIUS)
}

fn default_page_spacing() -> Option<f32> {
    Some(DEFAULT_PAGE_SPACING)
}

fn default_thin_width() -> Option<f32> {
    Some(DEFAULT_THIN_STROKE_WIDTH)
}

fn default_medium_width() -> Option<f32> {
    Some(DEFAULT_MEDIUM_STROKE_WIDTH)
}

fn default_large_width() -> Option<f32> {
    Some(DEFAULT_LARGE_STROKE_WIDTH)
}

fn default_animated_extensions() -> Vec<String> {
    DEFAULT_ANIMATED_EXTENSIONS
        .iter()
        .map(|ext| (*ext).to_string())
        .collect()
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory, preferring the override, then the environment.
fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a readable warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    let warning =
                        format!("Could not read {}: {err}; using defaults", path.display());
                    log::warn!("{warning}");
                    return (Config::default(), Some(warning));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the config cannot be
/// serialized or the file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let mut config = Config::default();
        config.gallery.preload = Some(2);
        config.markup.default_tool = Some(DrawTool::Eraser);
        config.markup.default_color = Some(Rgba::BLUE);
        config.media.animated_extensions = vec!["gif".into(), "apng".into()];

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_errors_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_falls_back_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[gallery\npreload = ")
            .expect("failed to write broken config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        let warning = warning.expect("broken config should warn");
        assert!(warning.contains(CONFIG_FILE));
        assert!(warning.ends_with("using defaults"));
    }

    #[test]
    fn load_with_override_missing_file_is_default_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().join("absent")));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[gallery]\npreload = 1\n").expect("write");

        let loaded = load_from_path(&config_path).expect("load");
        assert_eq!(loaded.preload_radius(), 1);
        assert_eq!(loaded.page_spacing(), DEFAULT_PAGE_SPACING);
        assert_eq!(loaded.stroke_widths().medium, DEFAULT_MEDIUM_STROKE_WIDTH);
        assert!(loaded.media.is_animated_extension("GIF"));
    }

    #[test]
    fn stroke_widths_are_clamped() {
        let mut config = Config::default();
        config.markup.thin_width = Some(0.0);
        config.markup.large_width = Some(1000.0);

        let widths = config.stroke_widths();
        assert_eq!(widths.thin, MIN_STROKE_WIDTH);
        assert_eq!(widths.large, MAX_STROKE_WIDTH);
    }

    #[test]
    fn save_with_override_creates_file_in_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let dir = temp_dir.path().join("deep").join("path");
        save_with_override(&Config::default(), Some(dir.clone())).expect("save");
        assert!(dir.join(CONFIG_FILE).exists());
    }

    #[test]
    fn default_draw_settings_come_from_markup_section() {
        let mut config = Config::default();
        config.markup.default_stroke_width = Some(StrokeWidth::Large);
        let settings = config.draw_settings();
        assert_eq!(settings.tool, DrawTool::Pen);
        assert_eq!(settings.stroke_width, StrokeWidth::Large);
        assert_eq!(settings.color, Rgba::RED);
    }
}
