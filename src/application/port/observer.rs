// SPDX-License-Identifier: MPL-2.0
//! Gallery notification port.

/// Receives gallery notifications.
///
/// Every method has an empty default so hosts only implement what they need.
/// Notifications are delivered synchronously from the call that caused them.
pub trait GalleryObserver: Send {
    /// A page change settled on `index`.
    fn did_move_to_page(&mut self, _index: usize) {}

    /// The page at `index` is about to be deleted. Deletion always proceeds.
    fn will_delete(&mut self, _index: usize) {}

    /// The gallery has nothing left to show, or the user asked to close it.
    fn should_close(&mut self) {}

    /// Edit mode was entered (`active == true`) or left on the page at `index`.
    fn did_toggle_edit(&mut self, _index: usize, _active: bool) {}

    /// An unzoomed page was touched. Sent before [`GalleryObserver::did_tap`].
    fn did_touch(&mut self, _index: usize) {}

    /// The page at `index` was tapped outside edit mode.
    fn did_tap(&mut self, _index: usize) {}

    /// The page at `index` was double-tapped outside edit mode.
    fn did_double_tap(&mut self, _index: usize) {}

    /// The play button was pressed on a page linked to `url`. Playback is up to the host.
    fn did_request_video(&mut self, _index: usize, _url: &str) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl GalleryObserver for NoopObserver {}
