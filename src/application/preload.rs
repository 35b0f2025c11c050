// SPDX-License-Identifier: MPL-2.0
//! Preload window computation.
//!
//! The window is the contiguous index range around the current page whose
//! entries must hold real (non-stub) content. Everything outside it is stubbed
//! to bound memory.

use std::ops::Range;

/// Returns the indices to materialize for `current` in a gallery of `count` pages.
///
/// A `radius` of zero materializes every page. Otherwise the window is
/// `max(0, current - radius)..min(count, current + radius)`; the upper bound is
/// exclusive, so a radius of `r` keeps `r` pages before the current one and
/// `r - 1` after it.
///
/// # Example
///
/// ```
/// use lightbox_core::application::preload_window;
///
/// assert_eq!(preload_window(5, 10, 0), 0..10);
/// assert_eq!(preload_window(5, 10, 2), 3..7);
/// assert_eq!(preload_window(0, 10, 2), 0..2);
/// ```
#[must_use]
pub fn preload_window(current: usize, count: usize, radius: usize) -> Range<usize> {
    if radius == 0 {
        return 0..count;
    }

    let start = current.saturating_sub(radius);
    let end = count.min(current.saturating_add(radius));
    start..end.max(start)
}
