// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Gallery**: Preload radius and page spacing
//! - **Markup**: Stroke widths for the named widths
//! - **Scrolling**: Flick projection used when a drag ends
//! - **Media**: Extensions treated as animated

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Default preload radius. Zero keeps every page materialized.
pub const DEFAULT_PRELOAD_RADIUS: usize = 0;

/// Default horizontal gap between pages, in points.
pub const DEFAULT_PAGE_SPACING: f32 = 20.0;

/// Maximum accepted page spacing.
pub const MAX_PAGE_SPACING: f32 = 200.0;

// ==========================================================================
// Markup Defaults
// ==========================================================================

/// Width used for the "thin" stroke.
pub const DEFAULT_THIN_STROKE_WIDTH: f32 = 2.0;

/// Width used for the "medium" stroke.
pub const DEFAULT_MEDIUM_STROKE_WIDTH: f32 = 5.0;

/// Width used for the "large" stroke.
pub const DEFAULT_LARGE_STROKE_WIDTH: f32 = 10.0;

/// Smallest stroke width a config file may set.
pub const MIN_STROKE_WIDTH: f32 = 0.5;

/// Largest stroke width a config file may set.
pub const MAX_STROKE_WIDTH: f32 = 100.0;

// ==========================================================================
// Scrolling Defaults
// ==========================================================================

/// Magnitude of the flick speed applied when a drag ends with non-zero velocity.
pub const FLICK_SPEED: f64 = 2.0;

/// Distance (in points) one unit of flick speed projects the offset.
pub const FLICK_PROJECTION: f64 = 60.0;

// ==========================================================================
// Media Defaults
// ==========================================================================

/// URL path extensions treated as animated without inspecting frames.
pub const DEFAULT_ANIMATED_EXTENSIONS: &[&str] = &["gif"];

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_PAGE_SPACING >= 0.0);
    assert!(DEFAULT_PAGE_SPACING <= MAX_PAGE_SPACING);

    assert!(MIN_STROKE_WIDTH > 0.0);
    assert!(DEFAULT_THIN_STROKE_WIDTH >= MIN_STROKE_WIDTH);
    assert!(DEFAULT_THIN_STROKE_WIDTH < DEFAULT_MEDIUM_STROKE_WIDTH);
    assert!(DEFAULT_MEDIUM_STROKE_WIDTH < DEFAULT_LARGE_STROKE_WIDTH);
    assert!(DEFAULT_LARGE_STROKE_WIDTH <= MAX_STROKE_WIDTH);

    assert!(FLICK_SPEED > 0.0);
    assert!(FLICK_PROJECTION > 0.0);
};
