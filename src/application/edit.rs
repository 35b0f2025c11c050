// SPDX-License-Identifier: MPL-2.0
//! Per-page markup state.
//!
//! Each page gets its own annotation surface the first time it enters edit
//! mode, and keeps it (with its undo history) for as long as the page exists.
//! Draw settings are process-wide defaults: a new surface starts from them,
//! and changing a setting while editing updates both the defaults and the
//! active surface.

use super::port::{AnnotationEngine, AnnotationSurface};
use crate::domain::{Bitmap, DrawSettings, DrawTool, Point, Rgba, StrokeWidth, StrokeWidthValues};

struct PageSurface {
    surface: Box<dyn AnnotationSurface>,
    settings: DrawSettings,
}

/// Edit mode, draw settings and per-page annotation surfaces.
pub struct PageEditState {
    defaults: DrawSettings,
    widths: StrokeWidthValues,
    surfaces: Vec<Option<PageSurface>>,
    active: Option<usize>,
}

impl PageEditState {
    #[must_use]
    pub fn new(defaults: DrawSettings, widths: StrokeWidthValues, page_count: usize) -> Self {
        let mut surfaces = Vec::with_capacity(page_count);
        surfaces.resize_with(page_count, || None);
        Self {
            defaults,
            widths,
            surfaces,
            active: None,
        }
    }

    /// Drops every surface and leaves edit mode.
    pub fn reset(&mut self, page_count: usize) {
        self.surfaces.clear();
        self.surfaces.resize_with(page_count, || None);
        self.active = None;
    }

    /// Drops the surface of a deleted page, keeping the others aligned.
    pub fn remove_page(&mut self, index: usize) {
        if index < self.surfaces.len() {
            self.surfaces.remove(index);
        }
        self.active = match self.active {
            Some(active) if active == index => None,
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
    }

    /// Enters edit mode on `index`.
    ///
    /// Fails silently (returning `false`) when the page is not eligible or its
    /// image has not loaded. Already-active calls succeed without side effects.
    pub fn enter(
        &mut self,
        index: usize,
        eligible: bool,
        image: Option<&Bitmap>,
        engine: &mut dyn AnnotationEngine,
    ) -> bool {
        if self.active == Some(index) {
            return true;
        }
        let Some(image) = image else {
            return false;
        };
        if !eligible || index >= self.surfaces.len() {
            return false;
        }

        if self.surfaces[index].is_none() {
            let mut surface = engine.create_surface(image.width(), image.height());
            apply_settings(&mut *surface, &self.defaults, &self.widths);
            self.surfaces[index] = Some(PageSurface {
                surface,
                settings: self.defaults,
            });
            log::debug!("Created annotation surface for page {index}");
        }

        self.active = Some(index);
        true
    }

    /// Leaves edit mode without touching the surface. Returns the page that was active.
    pub fn exit(&mut self) -> Option<usize> {
        self.active.take()
    }

    /// Flattens the active surface over `base` if it has strokes to commit.
    ///
    /// On success the surface's history is emptied so the committed strokes
    /// are not drawn twice. Returns `None` when there is nothing to commit or
    /// rendering failed; the history is kept in the latter case.
    pub fn commit(&mut self, base: &Bitmap) -> Option<Bitmap> {
        let page = self.active_page_mut()?;
        if page.surface.undo_count() == 0 {
            return None;
        }

        let Some(rendered) = page.surface.render(base) else {
            log::warn!("Annotation render failed; keeping strokes");
            return None;
        };
        for _ in 0..page.surface.undo_count() {
            page.surface.undo();
        }
        page.surface.clear_redo();
        Some(rendered)
    }

    pub fn set_tool(&mut self, tool: DrawTool) {
        self.defaults.tool = tool;
        if let Some(page) = self.active_page_mut() {
            page.settings.tool = tool;
            page.surface.set_tool(tool);
        }
    }

    pub fn set_stroke_width(&mut self, width: StrokeWidth) {
        self.defaults.stroke_width = width;
        let value = self.widths.value(width);
        if let Some(page) = self.active_page_mut() {
            page.settings.stroke_width = width;
            page.surface.set_stroke_width(value);
        }
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.defaults.color = color;
        if let Some(page) = self.active_page_mut() {
            page.settings.color = color;
            page.surface.set_stroke_color(color);
            page.surface.set_fill_color(color);
        }
    }

    /// Undoes the last stroke on the active surface.
    pub fn undo(&mut self) {
        if let Some(page) = self.active_page_mut() {
            page.surface.undo();
        }
    }

    pub fn redo(&mut self) {
        if let Some(page) = self.active_page_mut() {
            page.surface.redo();
        }
    }

    /// Forwards a finished stroke to the active surface. Ignored when not editing.
    pub fn add_stroke(&mut self, points: &[Point]) -> bool {
        match self.active_page_mut() {
            Some(page) => {
                page.surface.add_stroke(points);
                true
            }
            None => false,
        }
    }

    /// Undoes every stroke on the page's surface and drops the redo history.
    pub fn clear(&mut self, index: usize) {
        if let Some(Some(page)) = self.surfaces.get_mut(index) {
            for _ in 0..page.surface.undo_count() {
                page.surface.undo();
            }
            page.surface.clear_redo();
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.active_page().is_some_and(|page| page.surface.can_undo())
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.active_page().is_some_and(|page| page.surface.can_redo())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Page currently in edit mode.
    #[must_use]
    pub fn active_page_index(&self) -> Option<usize> {
        self.active
    }

    /// Settings new surfaces start from.
    #[must_use]
    pub fn defaults(&self) -> DrawSettings {
        self.defaults
    }

    #[must_use]
    pub fn stroke_widths(&self) -> StrokeWidthValues {
        self.widths
    }

    #[must_use]
    pub fn has_surface(&self, index: usize) -> bool {
        self.surfaces.get(index).is_some_and(Option::is_some)
    }

    /// Settings of the page's surface, if it has one.
    #[must_use]
    pub fn surface_settings(&self, index: usize) -> Option<DrawSettings> {
        self.surfaces
            .get(index)
            .and_then(Option::as_ref)
            .map(|page| page.settings)
    }

    /// Undo depth of the page's surface.
    #[must_use]
    pub fn undo_count(&self, index: usize) -> usize {
        self.surfaces
            .get(index)
            .and_then(Option::as_ref)
            .map_or(0, |page| page.surface.undo_count())
    }

    fn active_page(&self) -> Option<&PageSurface> {
        self.surfaces.get(self.active?)?.as_ref()
    }

    fn active_page_mut(&mut self) -> Option<&mut PageSurface> {
        self.surfaces.get_mut(self.active?)?.as_mut()
    }
}

impl std::fmt::Debug for PageEditState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageEditState")
            .field("defaults", &self.defaults)
            .field("widths", &self.widths)
            .field("surfaces", &self.surfaces.iter().filter(|s| s.is_some()).count())
            .field("active", &self.active)
            .finish()
    }
}

fn apply_settings(
    surface: &mut dyn AnnotationSurface,
    settings: &DrawSettings,
    widths: &StrokeWidthValues,
) {
    surface.set_tool(settings.tool);
    surface.set_stroke_width(widths.value(settings.stroke_width));
    surface.set_stroke_color(settings.color);
    surface.set_fill_color(settings.color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SkiaAnnotationEngine;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Surface whose history never shrinks, counting the undo calls it receives.
    struct StuckSurface {
        undos: Arc<AtomicUsize>,
    }

    impl AnnotationSurface for StuckSurface {
        fn set_tool(&mut self, _tool: DrawTool) {}
        fn set_stroke_width(&mut self, _width: f32) {}
        fn set_stroke_color(&mut self, _color: Rgba) {}
        fn set_fill_color(&mut self, _color: Rgba) {}
        fn add_stroke(&mut self, _points: &[Point]) {}
        fn undo_count(&self) -> usize {
            3
        }
        fn can_redo(&self) -> bool {
            false
        }
        fn undo(&mut self) {
            self.undos.fetch_add(1, Ordering::SeqCst);
        }
        fn redo(&mut self) {}
        fn clear_redo(&mut self) {}
        fn render(&self, base: &Bitmap) -> Option<Bitmap> {
            Some(base.clone())
        }
    }

    struct StuckEngine {
        undos: Arc<AtomicUsize>,
    }

    impl AnnotationEngine for StuckEngine {
        fn create_surface(&mut self, _width: u32, _height: u32) -> Box<dyn AnnotationSurface> {
            Box::new(StuckSurface {
                undos: Arc::clone(&self.undos),
            })
        }
    }

    fn widths() -> StrokeWidthValues {
        StrokeWidthValues {
            thin: 2.0,
            medium: 5.0,
            large: 10.0,
        }
    }

    fn state(pages: usize) -> PageEditState {
        PageEditState::new(DrawSettings::default(), widths(), pages)
    }

    fn image() -> Bitmap {
        Bitmap::from_rgba(4, 4, vec![255; 64])
    }

    fn line() -> [Point; 2] {
        [Point::new(0.0, 2.0), Point::new(4.0, 2.0)]
    }

    #[test]
    fn enter_requires_eligibility_and_image() {
        let mut engine = SkiaAnnotationEngine::new();
        let mut edit = state(2);

        assert!(!edit.enter(0, false, Some(&image()), &mut engine));
        assert!(!edit.enter(0, true, None, &mut engine));
        assert!(!edit.is_active());
        assert!(!edit.has_surface(0));

        assert!(edit.enter(0, true, Some(&image()), &mut engine));
        assert!(edit.is_active());
        assert!(edit.has_surface(0));
        assert!(edit.enter(0, true, Some(&image()), &mut engine));
    }

    #[test]
    fn new_surface_starts_from_defaults() {
        let mut engine = SkiaAnnotationEngine::new();
        let mut edit = state(2);
        edit.set_color(Rgba::BLUE);
        edit.set_stroke_width(StrokeWidth::Large);

        edit.enter(1, true, Some(&image()), &mut engine);
        let settings = edit.surface_settings(1).expect("surface");
        assert_eq!(settings.color, Rgba::BLUE);
        assert_eq!(settings.stroke_width, StrokeWidth::Large);
    }

    #[test]
    fn settings_while_active_update_defaults_and_surface() {
        let mut engine = SkiaAnnotationEngine::new();
        let mut edit = state(2);
        edit.enter(0, true, Some(&image()), &mut engine);
        edit.set_tool(DrawTool::Eraser);
        edit.exit();

        assert_eq!(edit.defaults().tool, DrawTool::Eraser);
        assert_eq!(
            edit.surface_settings(0).map(|s| s.tool),
            Some(DrawTool::Eraser)
        );

        // Existing surfaces keep their own settings once inactive.
        edit.set_tool(DrawTool::Pen);
        assert_eq!(
            edit.surface_settings(0).map(|s| s.tool),
            Some(DrawTool::Eraser)
        );
    }

    #[test]
    fn undo_redo_only_while_active() {
        let mut engine = SkiaAnnotationEngine::new();
        let mut edit = state(1);
        assert!(!edit.add_stroke(&line()));

        edit.enter(0, true, Some(&image()), &mut engine);
        assert!(edit.add_stroke(&line()));
        assert!(edit.can_undo());
        edit.undo();
        assert!(!edit.can_undo());
        assert!(edit.can_redo());
        edit.redo();
        assert!(edit.can_undo());

        edit.exit();
        assert!(!edit.can_undo());
        edit.undo();
        assert_eq!(edit.undo_count(0), 1);
    }

    #[test]
    fn commit_renders_and_empties_history() {
        let mut engine = SkiaAnnotationEngine::new();
        let mut edit = state(1);
        edit.enter(0, true, Some(&image()), &mut engine);
        assert!(edit.commit(&image()).is_none());

        edit.add_stroke(&line());
        let rendered = edit.commit(&image()).expect("rendered");
        assert_eq!((rendered.width(), rendered.height()), (4, 4));
        assert_ne!(rendered, image());
        assert!(!edit.can_undo());
        assert!(!edit.can_redo());
    }

    #[test]
    fn clear_undoes_everything() {
        let mut engine = SkiaAnnotationEngine::new();
        let mut edit = state(1);
        edit.enter(0, true, Some(&image()), &mut engine);
        edit.add_stroke(&line());
        edit.add_stroke(&line());
        edit.clear(0);
        assert_eq!(edit.undo_count(0), 0);
        assert!(!edit.can_redo());
    }

    #[test]
    fn remove_page_keeps_surfaces_aligned() {
        let mut engine = SkiaAnnotationEngine::new();
        let mut edit = state(3);
        edit.enter(2, true, Some(&image()), &mut engine);
        edit.remove_page(0);
        assert_eq!(edit.active_page_index(), Some(1));
        assert!(edit.has_surface(1));

        edit.remove_page(1);
        assert!(!edit.is_active());
        assert!(!edit.has_surface(1));
    }

    #[test]
    fn history_walk_is_bounded_by_initial_count() {
        let undos = Arc::new(AtomicUsize::new(0));
        let mut engine = StuckEngine {
            undos: Arc::clone(&undos),
        };
        let mut edit = state(1);
        edit.enter(0, true, Some(&image()), &mut engine);

        assert!(edit.commit(&image()).is_some());
        assert_eq!(undos.load(Ordering::SeqCst), 3);

        edit.clear(0);
        assert_eq!(undos.load(Ordering::SeqCst), 6);
    }
}
