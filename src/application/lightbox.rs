// SPDX-License-Identifier: MPL-2.0
//! The lightbox coordinator.
//!
//! [`Lightbox`] is the single owner of all gallery and markup state. A host UI
//! calls into it for every user event and reads back the derived state.
//! Background work (fetches, eligibility probes) is queued as [`Work`] and
//! driven by a [`TaskRunner`]; completions are applied with
//! [`Lightbox::apply`], so every mutation happens on the owner's task.
//!
//! # Edit mode
//!
//! Only the current page can be edited, and only once it is known to be a
//! single still frame. Leaving the page while editing discards edit mode
//! without rendering. Leaving edit mode explicitly with `commit == true`
//! flattens the strokes onto the page and replaces its entry.

use super::chrome::{ChromeSnapshot, ChromeState};
use super::edit::PageEditState;
use super::gallery::{DeleteOutcome, GalleryModel};
use super::port::{AnnotationEngine, GalleryObserver, NoopObserver};
use super::scroll::{resolve_target_page, PageLayout, PageTarget};
use super::tasks::{Completion, EligibilityProbe, TaskRunner, Work};
use crate::config::Config;
use crate::domain::{Bitmap, DrawTool, ImageEntry, Point, Rgba, StrokeWidth};
use crate::error::Result;
use crate::infrastructure::SkiaAnnotationEngine;

/// How a call to [`Lightbox::exit_edit_mode`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditExit {
    /// A rendered bitmap replaced the current entry.
    pub committed: bool,
    /// The continuation asked to keep editing and edit mode was re-entered.
    pub continued: bool,
}

/// How a call to [`Lightbox::close`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The observer was told to dismiss the gallery.
    Dismissed,
    /// Edit mode was active, so closing committed the markup instead.
    LeftEditMode(EditExit),
}

/// Builder for [`Lightbox`].
pub struct LightboxBuilder {
    config: Config,
    engine: Option<Box<dyn AnnotationEngine>>,
    observer: Option<Box<dyn GalleryObserver>>,
}

impl LightboxBuilder {
    /// Uses `engine` for annotation surfaces instead of the tiny-skia engine.
    #[must_use]
    pub fn engine(mut self, engine: Box<dyn AnnotationEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    #[must_use]
    pub fn observer(mut self, observer: Box<dyn GalleryObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Builds a lightbox showing `start_index` (clamped into range).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGallery`](crate::error::Error::EmptyGallery) if
    /// `entries` is empty.
    pub fn build(self, entries: Vec<ImageEntry>, start_index: usize) -> Result<Lightbox> {
        let gallery = GalleryModel::new(entries, start_index, self.config.preload_radius())?;
        let editor = PageEditState::new(
            self.config.draw_settings(),
            self.config.stroke_widths(),
            gallery.len(),
        );

        let mut lightbox = Lightbox {
            gallery,
            editor,
            chrome: ChromeState::default(),
            engine: self
                .engine
                .unwrap_or_else(|| Box::new(SkiaAnnotationEngine::new())),
            observer: self.observer.unwrap_or_else(|| Box::new(NoopObserver)),
            probes: Vec::new(),
            config: self.config,
        };
        lightbox.page_settled();
        Ok(lightbox)
    }
}

/// Headless lightbox: gallery paging, preloading and per-page markup.
pub struct Lightbox {
    config: Config,
    gallery: GalleryModel,
    editor: PageEditState,
    chrome: ChromeState,
    engine: Box<dyn AnnotationEngine>,
    observer: Box<dyn GalleryObserver>,
    probes: Vec<EligibilityProbe>,
}

impl Lightbox {
    #[must_use]
    pub fn builder(config: Config) -> LightboxBuilder {
        LightboxBuilder {
            config,
            engine: None,
            observer: None,
        }
    }

    // =========================================================================
    // Paging
    // =========================================================================

    /// Replaces every entry. Edit mode ends and all surfaces are dropped.
    ///
    /// An empty list closes the gallery.
    pub fn set_pages(&mut self, entries: Vec<ImageEntry>) {
        self.leave_edit_mode_silently();
        self.probes.clear();
        let count = entries.len();
        self.editor.reset(count);
        if !self.gallery.set_pages(entries) {
            log::debug!("Gallery emptied; closing");
            self.observer.should_close();
        }
    }

    /// Moves to `index`. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        let moved = self.gallery.go_to(index);
        if moved {
            self.page_settled();
        }
        moved
    }

    pub fn next(&mut self) -> bool {
        let moved = self.gallery.next();
        if moved {
            self.page_settled();
        }
        moved
    }

    pub fn previous(&mut self) -> bool {
        let moved = self.gallery.previous();
        if moved {
            self.page_settled();
        }
        moved
    }

    /// Resolves a drag that ended with `velocity_x` at `offset_x` and settles
    /// on the resulting page.
    ///
    /// The returned target is clamped to the gallery: its offset is the
    /// origin of the page actually settled on.
    #[allow(clippy::cast_possible_wrap)]
    pub fn drag_ended(&mut self, velocity_x: f64, offset_x: f64, layout: &PageLayout) -> PageTarget {
        let target = resolve_target_page(velocity_x, offset_x, layout.page_extent());
        if self.gallery.is_closed() {
            return target;
        }

        let index = self.gallery.settle(target.index);
        self.page_settled();
        PageTarget {
            offset_x: layout.offset_for(index),
            index: index as i64,
        }
    }

    /// Layout for a viewport of `viewport_width` with the configured spacing.
    #[must_use]
    pub fn layout(&self, viewport_width: f64) -> PageLayout {
        PageLayout::new(viewport_width, f64::from(self.config.page_spacing()))
    }

    /// Deletes the page at `index`.
    ///
    /// The observer hears `will_delete` first. Deleting the last remaining
    /// page empties the gallery and asks the observer to close it.
    pub fn delete(&mut self, index: usize) -> DeleteOutcome {
        if self.gallery.is_closed() || index >= self.gallery.len() {
            return DeleteOutcome::Ignored;
        }

        self.observer.will_delete(index);
        self.leave_edit_mode_silently();

        let outcome = self.gallery.delete(index);
        match outcome {
            DeleteOutcome::Closed => {
                self.editor.reset(0);
                self.probes.clear();
                self.observer.should_close();
            }
            DeleteOutcome::Removed { .. } => {
                self.editor.remove_page(index);
                self.page_settled();
            }
            DeleteOutcome::Ignored => {}
        }
        outcome
    }

    pub fn delete_current(&mut self) -> DeleteOutcome {
        self.delete(self.gallery.current_index())
    }

    pub fn set_caption(&mut self, index: usize, caption: impl Into<String>) -> bool {
        self.gallery.set_caption(index, caption)
    }

    // =========================================================================
    // Edit mode
    // =========================================================================

    /// Enters edit mode on the current page.
    ///
    /// Returns `false` without side effects if the page is not eligible or
    /// has not loaded yet.
    pub fn enter_edit_mode(&mut self) -> bool {
        if self.gallery.is_closed() {
            return false;
        }
        let index = self.gallery.current_index();
        if self.editor.active_page_index() == Some(index) {
            return true;
        }

        let entered = self.editor.enter(
            index,
            self.gallery.is_eligible(index),
            self.gallery.image(index),
            &mut *self.engine,
        );
        if entered {
            log::debug!("Entered edit mode on page {index}");
            self.observer.did_toggle_edit(index, true);
        }
        entered
    }

    /// Leaves edit mode without committing. Returns `false` if it was not active.
    pub fn cancel_edit_mode(&mut self) -> bool {
        self.leave_edit_mode_silently()
    }

    /// Edit button: enters edit mode, or leaves it without committing.
    pub fn toggle_edit_mode(&mut self) -> bool {
        if self.editor.is_active() {
            self.cancel_edit_mode();
            false
        } else {
            self.enter_edit_mode()
        }
    }

    /// Leaves edit mode, committing the markup when `commit` is true.
    ///
    /// The render runs on the next turn of the owning task. A commit with an
    /// empty history renders nothing. `continue_editing` is always called
    /// with the rendered bitmap (if any) and the page index; returning `true`
    /// re-enters edit mode on the same page.
    ///
    /// Returns `None` when edit mode was not active.
    pub async fn exit_edit_mode<F>(&mut self, commit: bool, continue_editing: F) -> Option<EditExit>
    where
        F: FnOnce(Option<&Bitmap>, usize) -> bool,
    {
        let index = self.editor.active_page_index()?;
        tokio::task::yield_now().await;

        let rendered = if commit {
            self.gallery
                .image(index)
                .cloned()
                .and_then(|base| self.editor.commit(&base))
        } else {
            None
        };
        if let Some(bitmap) = &rendered {
            self.gallery.replace_current(bitmap.clone());
            log::debug!("Committed markup on page {index}");
        }
        self.editor.exit();

        let continued = continue_editing(rendered.as_ref(), index)
            && self.editor.enter(
                index,
                self.gallery.is_eligible(index),
                self.gallery.image(index),
                &mut *self.engine,
            );
        if !continued {
            log::debug!("Left edit mode on page {index}");
            self.observer.did_toggle_edit(index, false);
        }

        Some(EditExit {
            committed: rendered.is_some(),
            continued,
        })
    }

    /// Close button: commits markup while editing, otherwise asks the
    /// observer to dismiss the gallery.
    pub async fn close<F>(&mut self, continue_editing: F) -> CloseOutcome
    where
        F: FnOnce(Option<&Bitmap>, usize) -> bool,
    {
        if let Some(exit) = self.exit_edit_mode(true, continue_editing).await {
            return CloseOutcome::LeftEditMode(exit);
        }
        self.observer.should_close();
        CloseOutcome::Dismissed
    }

    pub fn set_tool(&mut self, tool: DrawTool) {
        self.editor.set_tool(tool);
    }

    pub fn set_stroke_width(&mut self, width: StrokeWidth) {
        self.editor.set_stroke_width(width);
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.editor.set_color(color);
    }

    pub fn undo(&mut self) {
        self.editor.undo();
    }

    pub fn redo(&mut self) {
        self.editor.redo();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    /// Adds a finished stroke to the current page. Ignored unless editing.
    pub fn draw_stroke(&mut self, points: &[Point]) -> bool {
        self.editor.add_stroke(points)
    }

    /// Removes every stroke from the current page's surface.
    pub fn clear_all_markup(&mut self) {
        self.editor.clear(self.gallery.current_index());
    }

    // =========================================================================
    // Chrome
    // =========================================================================

    /// Single tap on the current page.
    ///
    /// Ignored while editing. An unzoomed page reports a touch and flips the
    /// controls; the tap itself is always reported.
    pub fn tap(&mut self) -> bool {
        if self.is_closed() || self.editor.is_active() {
            return false;
        }
        let index = self.gallery.current_index();
        if !self.chrome.is_zoomed() {
            self.observer.did_touch(index);
            self.chrome.toggle(false);
        }
        self.observer.did_tap(index);
        true
    }

    /// Double tap on the current page: toggles between fitted and zoomed.
    /// Ignored while editing.
    pub fn double_tap(&mut self) -> bool {
        if self.is_closed() || self.editor.is_active() {
            return false;
        }
        let zoomed = !self.chrome.is_zoomed();
        self.chrome.set_zoomed(zoomed);
        log::trace!("Double tap on page {}; zoomed: {zoomed}", self.current_index());
        self.observer.did_double_tap(self.gallery.current_index());
        true
    }

    /// Pinch or programmatic zoom.
    pub fn set_zoomed(&mut self, zoomed: bool) {
        self.chrome.set_zoomed(zoomed);
    }

    /// Play button on the current page. Only pages linked to a video respond.
    pub fn play_video(&mut self) -> bool {
        if self.is_closed() {
            return false;
        }
        let index = self.gallery.current_index();
        let Some(url) = self
            .gallery
            .current_entry()
            .and_then(|entry| entry.video_url.clone())
        else {
            return false;
        };
        log::debug!("Video requested for page {index}");
        self.observer.did_request_video(index, &url);
        true
    }

    /// Visibility and labels for the current page.
    #[must_use]
    pub fn chrome(&self) -> ChromeSnapshot {
        let editing = self.editor.is_active();
        let controls = self.chrome.controls_visible();
        let index = self.gallery.current_index();
        let entry = self.gallery.current_entry();

        ChromeSnapshot {
            controls_visible: controls,
            edit_button_visible: controls && self.gallery.is_eligible(index),
            play_button_visible: controls && entry.is_some_and(|e| e.video_url.is_some()),
            footer_visible: controls && !editing,
            edit_panel_visible: editing,
            undo_enabled: self.editor.can_undo(),
            redo_enabled: self.editor.can_redo(),
            scroll_enabled: !editing,
            page_label: if self.gallery.is_empty() {
                String::new()
            } else {
                format!("{}/{}", index + 1, self.gallery.len())
            },
            caption: entry.map(|e| e.caption.clone()).unwrap_or_default(),
        }
    }

    // =========================================================================
    // Background work
    // =========================================================================

    /// Drains the work queued since the last call.
    pub fn take_work(&mut self) -> Vec<Work> {
        let mut work: Vec<Work> = self
            .gallery
            .take_fetch_requests()
            .into_iter()
            .map(Work::Fetch)
            .collect();
        work.extend(self.probes.drain(..).map(Work::Probe));
        work
    }

    /// Applies a completion. Returns `false` if it was stale.
    ///
    /// Eligibility results never change whether edit mode is active.
    pub fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Fetched(done) => match self.gallery.complete_fetch(done) {
                Some(probe) => {
                    self.probes.push(probe);
                    true
                }
                None => false,
            },
            Completion::Eligibility(report) => self.gallery.apply_eligibility(report).is_some(),
        }
    }

    /// Dispatches queued work and applies completions until nothing is in flight.
    pub async fn settle(&mut self, runner: &mut TaskRunner) {
        loop {
            runner.dispatch(self.take_work());
            match runner.next().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => break,
            }
        }
    }

    /// Dispatches queued work and applies whatever has already completed.
    pub fn pump(&mut self, runner: &mut TaskRunner) -> usize {
        runner.dispatch(self.take_work());
        let mut applied = 0;
        while let Some(completion) = runner.try_next() {
            if self.apply(completion) {
                applied += 1;
            }
        }
        applied
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn gallery(&self) -> &GalleryModel {
        &self.gallery
    }

    #[must_use]
    pub fn editor(&self) -> &PageEditState {
        &self.editor
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.gallery.current_index()
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editor.is_active()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.gallery.is_closed()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Runs after every settled page change.
    fn page_settled(&mut self) {
        let index = self.gallery.current_index();
        if self
            .editor
            .active_page_index()
            .is_some_and(|active| active != index)
        {
            self.leave_edit_mode_silently();
        }
        self.chrome.page_changed();
        log::debug!("Moved to page {}/{}", index + 1, self.gallery.len());
        self.observer.did_move_to_page(index);
    }

    fn leave_edit_mode_silently(&mut self) -> bool {
        match self.editor.exit() {
            Some(index) => {
                log::debug!("Discarded edit mode on page {index}");
                self.observer.did_toggle_edit(index, false);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for Lightbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lightbox")
            .field("gallery", &self.gallery)
            .field("editor", &self.editor)
            .field("chrome", &self.chrome)
            .finish_non_exhaustive()
    }
}
