// SPDX-License-Identifier: MPL-2.0
//! Ordered page collection with a movable preload window.
//!
//! [`GalleryModel`] keeps two parallel sequences: the caller's entries (the
//! source of truth) and the page slots actually shown. Slots inside the
//! preload window hold the real content; slots outside hold a stub so their
//! bitmaps can be dropped. Materializing a slot bumps its generation and
//! queues a [`FetchRequest`]; completions whose ticket no longer matches the
//! slot are ignored.

use super::preload::preload_window;
use super::tasks::{EligibilityProbe, EligibilityReport, FetchCompletion, FetchRequest, FetchTicket};
use crate::domain::{Bitmap, ImageContent, ImageEntry};
use crate::error::{Error, Result};
use std::ops::Range;

/// What a deletion did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Index was out of range or the gallery is already closed.
    Ignored,
    /// The page was removed and the gallery settled on `current`.
    Removed { current: usize },
    /// The last page was removed; the gallery is now empty.
    Closed,
}

#[derive(Debug, Clone)]
struct Page {
    content: ImageContent,
    image: Option<Bitmap>,
    generation: u64,
    eligible: bool,
}

impl Page {
    fn stub(generation: u64) -> Self {
        Self {
            content: ImageContent::Stub,
            image: None,
            generation,
            eligible: false,
        }
    }
}

/// Gallery pages, the current index and the preload window.
#[derive(Debug)]
pub struct GalleryModel {
    entries: Vec<ImageEntry>,
    pages: Vec<Page>,
    current: usize,
    seen_last_page: bool,
    preload_radius: usize,
    next_generation: u64,
    pending: Vec<FetchRequest>,
    closed: bool,
}

impl GalleryModel {
    /// Creates a gallery settled on `start_index` (clamped into range).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGallery`] if `entries` is empty.
    pub fn new(entries: Vec<ImageEntry>, start_index: usize, preload_radius: usize) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyGallery);
        }

        let mut model = Self {
            entries: Vec::new(),
            pages: Vec::new(),
            current: start_index,
            seen_last_page: false,
            preload_radius,
            next_generation: 0,
            pending: Vec::new(),
            closed: false,
        };
        model.set_pages(entries);
        model.mark_seen();
        Ok(model)
    }

    /// Replaces every entry, resetting all slots to stubs before
    /// re-materializing the window around the clamped current index.
    ///
    /// Returns `false` if `entries` is empty, which closes the gallery.
    pub fn set_pages(&mut self, entries: Vec<ImageEntry>) -> bool {
        self.pending.clear();
        if entries.is_empty() {
            self.entries.clear();
            self.pages.clear();
            self.current = 0;
            self.closed = true;
            return false;
        }

        let mut pages = Vec::with_capacity(entries.len());
        for _ in 0..entries.len() {
            pages.push(Page::stub(self.bump_generation()));
        }
        self.pages = pages;
        self.entries = entries;
        self.closed = false;
        self.current = self.current.min(self.len() - 1);
        self.materialize_window();
        self.mark_seen();
        true
    }

    /// Moves to `index`. Out-of-range indices are ignored.
    ///
    /// Returns `true` if the gallery settled on `index`, including when it
    /// was already current.
    pub fn go_to(&mut self, index: usize) -> bool {
        if self.closed || index >= self.len() {
            return false;
        }
        self.settle_on(index);
        true
    }

    /// Moves to the next page, if any.
    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    /// Moves to the previous page, if any.
    pub fn previous(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    /// Settles on a raw page index (e.g. from a scroll), clamping it into range.
    pub fn settle(&mut self, raw_index: i64) -> usize {
        if self.closed {
            return 0;
        }
        let last = self.len() - 1;
        let index = usize::try_from(raw_index.max(0)).map_or(last, |i| i.min(last));
        self.settle_on(index);
        index
    }

    /// Removes the page at `index`.
    ///
    /// Deleting the current page moves to the following page, or to the
    /// previous one when the last page is deleted. Deleting a page before the
    /// current one keeps the same entry current.
    pub fn delete(&mut self, index: usize) -> DeleteOutcome {
        if self.closed || index >= self.len() {
            return DeleteOutcome::Ignored;
        }

        if self.len() == 1 {
            self.entries.clear();
            self.pages.clear();
            self.pending.clear();
            self.current = 0;
            self.closed = true;
            return DeleteOutcome::Closed;
        }

        let last = self.len() - 1;
        let current = if index == self.current {
            if index == last { index - 1 } else { index }
        } else if index < self.current {
            self.current - 1
        } else {
            self.current
        };

        self.entries.remove(index);
        self.pages.remove(index);
        self.current = current.min(self.len() - 1);
        self.materialize_window();
        self.mark_seen();

        log::debug!("Deleted page {index}, now on {}/{}", self.current + 1, self.len());
        DeleteOutcome::Removed {
            current: self.current,
        }
    }

    /// Applies a fetch result.
    ///
    /// Returns the eligibility probe to run when the image landed. Stale
    /// completions and failed fetches return `None`.
    pub fn complete_fetch(&mut self, completion: FetchCompletion) -> Option<EligibilityProbe> {
        let Some(index) = self.locate(completion.ticket) else {
            log::debug!("Dropping stale fetch for page {}", completion.ticket.index);
            return None;
        };
        let image = completion.image?;

        let page = &mut self.pages[index];
        page.image = Some(image.clone());
        page.eligible = false;

        let mut entry = self.entries[index].clone();
        entry.content = page.content.clone();
        Some(EligibilityProbe {
            ticket: FetchTicket {
                index,
                generation: page.generation,
            },
            entry,
            image,
        })
    }

    /// Applies an eligibility result. Returns the page index it applied to.
    pub fn apply_eligibility(&mut self, report: EligibilityReport) -> Option<usize> {
        let index = self.locate(report.ticket)?;
        let page = &mut self.pages[index];
        if page.image.is_none() {
            return None;
        }
        page.eligible = report.eligible;
        Some(index)
    }

    /// Replaces the current entry and slot with a freshly rendered bitmap.
    ///
    /// The caption and video link are kept. A flattened render is a single
    /// still frame, so the page stays editable.
    pub fn replace_current(&mut self, bitmap: Bitmap) {
        if self.closed {
            return;
        }
        let generation = self.bump_generation();
        let index = self.current;
        self.entries[index].content = ImageContent::Bitmap(bitmap.clone());

        let page = &mut self.pages[index];
        page.content = ImageContent::Bitmap(bitmap.clone());
        page.image = Some(bitmap);
        page.generation = generation;
        page.eligible = true;
    }

    /// Updates the caption of the entry at `index`.
    pub fn set_caption(&mut self, index: usize, caption: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.caption = caption.into();
                true
            }
            None => false,
        }
    }

    /// Drains the fetch requests queued by previous transitions.
    ///
    /// Requests for slots that have since been stubbed or replaced are
    /// dropped; the rest carry the slot's current index.
    pub fn take_fetch_requests(&mut self) -> Vec<FetchRequest> {
        let requests = std::mem::take(&mut self.pending);
        requests
            .into_iter()
            .filter_map(|mut request| {
                request.ticket.index = self.locate(request.ticket)?;
                Some(request)
            })
            .collect()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once every page has been deleted or an empty set was applied.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// True once the last page has been current at least once.
    #[must_use]
    pub fn seen_last_page(&self) -> bool {
        self.seen_last_page
    }

    #[must_use]
    pub fn preload_radius(&self) -> usize {
        self.preload_radius
    }

    /// Indices that currently must hold real content.
    #[must_use]
    pub fn preload_window(&self) -> Range<usize> {
        preload_window(self.current, self.len(), self.preload_radius)
    }

    #[must_use]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn current_entry(&self) -> Option<&ImageEntry> {
        self.entries.get(self.current)
    }

    /// Content held by the page slot (a stub outside the window).
    #[must_use]
    pub fn content(&self, index: usize) -> Option<&ImageContent> {
        self.pages.get(index).map(|page| &page.content)
    }

    /// Decoded image for the page, once its fetch has completed.
    #[must_use]
    pub fn image(&self, index: usize) -> Option<&Bitmap> {
        self.pages.get(index).and_then(|page| page.image.as_ref())
    }

    #[must_use]
    pub fn is_materialized(&self, index: usize) -> bool {
        self.pages.get(index).is_some_and(|page| !page.content.is_stub())
    }

    /// Whether the page may enter edit mode, as last reported.
    #[must_use]
    pub fn is_eligible(&self, index: usize) -> bool {
        self.pages.get(index).is_some_and(|page| page.eligible)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn settle_on(&mut self, index: usize) {
        self.current = index;
        self.materialize_window();
        self.mark_seen();
    }

    fn mark_seen(&mut self) {
        if !self.closed && self.current + 1 == self.len() {
            self.seen_last_page = true;
        }
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Finds the live slot a ticket was issued for.
    ///
    /// Generations are unique across the gallery, so a ticket still resolves
    /// after deletions shift its slot to a lower index.
    fn locate(&self, ticket: FetchTicket) -> Option<usize> {
        let index = match self.pages.get(ticket.index) {
            Some(page) if page.generation == ticket.generation => ticket.index,
            _ => self
                .pages
                .iter()
                .position(|page| page.generation == ticket.generation)?,
        };
        (!self.pages[index].content.is_stub()).then_some(index)
    }

    /// Brings every slot to its target state for the current window.
    ///
    /// Slots already in their target state are left alone, so repeated calls
    /// queue no duplicate fetches. The current slot is never stubbed.
    fn materialize_window(&mut self) {
        let window = self.preload_window();
        let mut loaded = 0usize;
        let mut released = 0usize;

        for index in 0..self.pages.len() {
            let wanted = window.contains(&index) || index == self.current;
            let is_stub = self.pages[index].content.is_stub();

            if wanted && is_stub {
                let content = self.entries[index].content.clone();
                if content.is_stub() {
                    continue;
                }
                let generation = self.bump_generation();
                self.pages[index] = Page {
                    content: content.clone(),
                    image: None,
                    generation,
                    eligible: false,
                };
                self.pending.push(FetchRequest {
                    ticket: FetchTicket { index, generation },
                    content,
                });
                loaded += 1;
            } else if !wanted && !is_stub {
                let generation = self.bump_generation();
                self.pages[index] = Page::stub(generation);
                released += 1;
            }
        }

        if loaded + released > 0 {
            log::debug!(
                "Preload window {window:?}: {loaded} page(s) queued, {released} released"
            );
        }
    }
}
