// SPDX-License-Identifier: MPL-2.0
//! Annotation engine port definitions.
//!
//! The engine is an opaque dependency: the lightbox only creates surfaces,
//! pushes settings to them, forwards finished strokes, walks their undo/redo
//! history and asks them to flatten strokes onto a base bitmap.
//!
//! # Lifecycle
//!
//! 1. [`AnnotationEngine::create_surface`] the first time a page enters edit mode
//! 2. Settings are pushed with the `set_*` methods
//! 3. Strokes are added while editing; each stroke is one undoable operation
//! 4. [`AnnotationSurface::render`] flattens the strokes on commit
//! 5. The surface lives as long as its page

use crate::domain::{Bitmap, DrawTool, Point, Rgba};

/// Factory for per-page annotation surfaces.
pub trait AnnotationEngine: Send {
    /// Creates an empty surface matching a `width` x `height` base image.
    fn create_surface(&mut self, width: u32, height: u32) -> Box<dyn AnnotationSurface>;
}

/// A per-page drawing canvas with its own operation history.
pub trait AnnotationSurface: Send {
    fn set_tool(&mut self, tool: DrawTool);

    fn set_stroke_width(&mut self, width: f32);

    fn set_stroke_color(&mut self, color: Rgba);

    fn set_fill_color(&mut self, color: Rgba);

    /// Records a finished stroke with the current settings.
    ///
    /// Adding a stroke clears the redo history.
    fn add_stroke(&mut self, points: &[Point]);

    /// Number of operations that can be undone.
    fn undo_count(&self) -> usize;

    fn can_undo(&self) -> bool {
        self.undo_count() > 0
    }

    fn can_redo(&self) -> bool;

    /// Undoes the most recent operation. No-op when nothing can be undone.
    fn undo(&mut self);

    /// Redoes the most recently undone operation. No-op when nothing can be redone.
    fn redo(&mut self);

    fn clear_redo(&mut self);

    /// Flattens the visible strokes onto `base`, returning `None` if rendering fails.
    fn render(&self, base: &Bitmap) -> Option<Bitmap>;
}
