// SPDX-License-Identifier: MPL-2.0
//! Markup (annotation) settings.
//!
//! These value types describe how strokes are drawn on a page surface. They are
//! serializable so that the configuration file can carry the defaults.

use serde::{Deserialize, Serialize};

// =============================================================================
// DrawTool
// =============================================================================

/// Tool used for new strokes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DrawTool {
    #[default]
    Pen,
    Eraser,
}

// =============================================================================
// StrokeWidth
// =============================================================================

/// Named stroke width; mapped to a numeric width by [`StrokeWidthValues`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeWidth {
    Thin,
    #[default]
    Medium,
    Large,
}

/// Numeric widths (in image pixels) for each [`StrokeWidth`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeWidthValues {
    pub thin: f32,
    pub medium: f32,
    pub large: f32,
}

impl StrokeWidthValues {
    /// Returns the numeric width for a named stroke width.
    #[must_use]
    pub fn value(&self, width: StrokeWidth) -> f32 {
        match width {
            StrokeWidth::Thin => self.thin,
            StrokeWidth::Medium => self.medium,
            StrokeWidth::Large => self.large,
        }
    }
}

// =============================================================================
// Rgba
// =============================================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const RED: Rgba = Rgba::opaque(255, 0, 0);
    pub const BLUE: Rgba = Rgba::opaque(0, 0, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::RED
    }
}

// =============================================================================
// DrawSettings
// =============================================================================

/// Tool, width and color applied to a surface.
///
/// One instance holds the process-wide defaults; every page surface keeps its
/// own copy once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawSettings {
    pub tool: DrawTool,
    pub stroke_width: StrokeWidth,
    pub color: Rgba,
}

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_width_values_map_each_name() {
        let values = StrokeWidthValues {
            thin: 1.0,
            medium: 4.0,
            large: 9.0,
        };
        assert_eq!(values.value(StrokeWidth::Thin), 1.0);
        assert_eq!(values.value(StrokeWidth::Medium), 4.0);
        assert_eq!(values.value(StrokeWidth::Large), 9.0);
    }

    #[test]
    fn default_settings_are_medium_red_pen() {
        let settings = DrawSettings::default();
        assert_eq!(settings.tool, DrawTool::Pen);
        assert_eq!(settings.stroke_width, StrokeWidth::Medium);
        assert_eq!(settings.color, Rgba::RED);
    }

    #[test]
    fn tool_serializes_kebab_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            tool: DrawTool,
            width: StrokeWidth,
        }

        let text = toml::to_string(&Wrapper {
            tool: DrawTool::Eraser,
            width: StrokeWidth::Large,
        })
        .expect("serialize");
        assert!(text.contains("tool = \"eraser\""));
        assert!(text.contains("width = \"large\""));

        let parsed: Wrapper = toml::from_str("tool = \"pen\"\nwidth = \"thin\"").expect("parse");
        assert_eq!(parsed.tool, DrawTool::Pen);
        assert_eq!(parsed.width, StrokeWidth::Thin);
    }
}
