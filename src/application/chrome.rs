// SPDX-License-Identifier: MPL-2.0
//! Visibility of the lightbox chrome (header, footer and buttons).

/// Chrome state that is not derived from the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeState {
    controls_visible: bool,
    zoomed: bool,
}

impl Default for ChromeState {
    fn default() -> Self {
        Self {
            controls_visible: true,
            zoomed: false,
        }
    }
}

impl ChromeState {
    /// Flips control visibility after a tap. Taps are ignored while zoomed or editing.
    pub fn toggle(&mut self, editing: bool) -> bool {
        if self.zoomed || editing {
            return false;
        }
        self.controls_visible = !self.controls_visible;
        true
    }

    /// Zooming in hides the controls; zooming back out shows them.
    pub fn set_zoomed(&mut self, zoomed: bool) {
        self.zoomed = zoomed;
        self.controls_visible = !zoomed;
    }

    /// A newly settled page starts unzoomed. Leaving a zoomed page shows the controls again.
    pub fn page_changed(&mut self) {
        if self.zoomed {
            self.set_zoomed(false);
        }
    }

    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }
}

/// Everything a host needs to draw the chrome for the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeSnapshot {
    pub controls_visible: bool,
    /// Edit button: shown with the controls on an editable page.
    pub edit_button_visible: bool,
    /// Play button: shown with the controls on a page linked to a video.
    pub play_button_visible: bool,
    /// Caption footer: hidden while editing.
    pub footer_visible: bool,
    /// Markup panel with undo/redo, shown only while editing.
    pub edit_panel_visible: bool,
    pub undo_enabled: bool,
    pub redo_enabled: bool,
    /// Paging is disabled while editing.
    pub scroll_enabled: bool,
    /// "n/total", 1-based.
    pub page_label: String,
    pub caption: String,
}
