// SPDX-License-Identifier: MPL-2.0
//! Drag-end paging and page layout arithmetic.
//!
//! Pages sit side by side with a fixed gap. When a drag ends, the offset is
//! projected a fixed distance in the direction of the flick and snapped to a
//! page boundary, which yields the page to settle on.

use crate::config::{FLICK_PROJECTION, FLICK_SPEED};

/// Where a drag should come to rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTarget {
    /// Snapped horizontal content offset.
    pub offset_x: f64,
    /// Page index at that offset. May fall outside the gallery when the
    /// drag overshoots; callers clamp.
    pub index: i64,
}

/// Resolves a drag-end sample into a snapped offset and target page.
///
/// - Flick speed is `-2`, `+2` or `0` depending on the sign of `velocity_x`
/// - The offset is projected by `speed * 60`
/// - Positive speed rounds up to the next page boundary, negative rounds
///   down, zero rounds to the nearest
///
/// A non-positive `page_extent` leaves the offset untouched on page 0.
///
/// # Example
///
/// ```
/// use lightbox_core::application::resolve_target_page;
///
/// let target = resolve_target_page(5.0, 0.0, 375.0);
/// assert_eq!(target.offset_x, 375.0);
/// assert_eq!(target.index, 1);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn resolve_target_page(velocity_x: f64, offset_x: f64, page_extent: f64) -> PageTarget {
    if page_extent.is_nan() || page_extent <= 0.0 {
        return PageTarget { offset_x, index: 0 };
    }

    let speed = if velocity_x < 0.0 {
        -FLICK_SPEED
    } else if velocity_x > 0.0 {
        FLICK_SPEED
    } else {
        0.0
    };

    let projected = offset_x + speed * FLICK_PROJECTION;
    let pages = projected / page_extent;
    let snapped_pages = if speed > 0.0 {
        pages.ceil()
    } else if speed < 0.0 {
        pages.floor()
    } else {
        pages.round()
    };

    PageTarget {
        offset_x: snapped_pages * page_extent,
        index: snapped_pages as i64,
    }
}

/// Horizontal geometry of the paging strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub viewport_width: f64,
    pub spacing: f64,
}

impl PageLayout {
    #[must_use]
    pub fn new(viewport_width: f64, spacing: f64) -> Self {
        Self {
            viewport_width,
            spacing,
        }
    }

    /// Distance between the origins of two neighboring pages.
    #[must_use]
    pub fn page_extent(&self) -> f64 {
        self.viewport_width + self.spacing
    }

    /// Content offset that shows page `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn offset_for(&self, index: usize) -> f64 {
        index as f64 * self.page_extent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_flick_rounds_up() {
        let target = resolve_target_page(5.0, 0.0, 375.0);
        assert_eq!(target, PageTarget { offset_x: 375.0, index: 1 });
    }

    #[test]
    fn negative_flick_rounds_down() {
        // 750 - 120 = 630, which floors to the page at 375.
        let target = resolve_target_page(-5.0, 750.0, 375.0);
        assert_eq!(target, PageTarget { offset_x: 375.0, index: 1 });
    }

    #[test]
    fn negative_flick_from_past_a_boundary_stays_on_that_boundary() {
        let target = resolve_target_page(-5.0, 870.0, 375.0);
        assert_eq!(target, PageTarget { offset_x: 750.0, index: 2 });
    }

    #[test]
    fn zero_velocity_rounds_to_nearest() {
        assert_eq!(
            resolve_target_page(0.0, 375.0, 375.0),
            PageTarget { offset_x: 375.0, index: 1 }
        );
        assert_eq!(resolve_target_page(0.0, 560.0, 375.0).index, 1);
        assert_eq!(resolve_target_page(0.0, 570.0, 375.0).index, 2);
    }

    #[test]
    fn velocity_magnitude_does_not_matter() {
        assert_eq!(
            resolve_target_page(0.01, 0.0, 375.0),
            resolve_target_page(900.0, 0.0, 375.0)
        );
    }

    #[test]
    fn backwards_flick_on_first_page_can_go_negative() {
        let target = resolve_target_page(-1.0, 0.0, 395.0);
        assert_eq!(target.index, -1);
    }

    #[test]
    fn degenerate_extent_keeps_offset() {
        let target = resolve_target_page(3.0, 42.0, 0.0);
        assert_eq!(target, PageTarget { offset_x: 42.0, index: 0 });
    }

    #[test]
    fn layout_includes_spacing_between_pages() {
        let layout = PageLayout::new(375.0, 20.0);
        assert_eq!(layout.page_extent(), 395.0);
        assert_eq!(layout.offset_for(0), 0.0);
        assert_eq!(layout.offset_for(2), 790.0);
    }
}
