// SPDX-License-Identifier: MPL-2.0
//! Background work and its completions.
//!
//! The lightbox never blocks on I/O or decoding. State transitions queue
//! [`Work`] items; a [`TaskRunner`] spawns them on Tokio and hands back
//! [`Completion`]s which the owner applies on its own task. Every completion
//! carries the [`FetchTicket`] it was issued with, so results for a page that
//! has since been stubbed, re-fetched or deleted are recognized and dropped.

use super::eligibility::compute_eligibility;
use super::port::ImageFetcher;
use crate::config::{Config, MediaConfig};
use crate::domain::{Bitmap, ImageContent, ImageEntry};
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Identifies one materialization of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub index: usize,
    pub generation: u64,
}

/// Request to turn a page's content into a bitmap.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub content: ImageContent,
}

/// Result of a [`FetchRequest`]. `image` is `None` when the fetch failed.
#[derive(Debug, Clone)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub image: Option<Bitmap>,
}

/// Request to decide whether a freshly loaded page may enter edit mode.
#[derive(Debug, Clone)]
pub struct EligibilityProbe {
    pub ticket: FetchTicket,
    /// The page's entry with its materialized content.
    pub entry: ImageEntry,
    pub image: Bitmap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityReport {
    pub ticket: FetchTicket,
    pub eligible: bool,
}

/// Background work queued by a state transition.
#[derive(Debug, Clone)]
pub enum Work {
    Fetch(FetchRequest),
    Probe(EligibilityProbe),
}

/// Outcome of a [`Work`] item, to be applied by the owner.
#[derive(Debug, Clone)]
pub enum Completion {
    Fetched(FetchCompletion),
    Eligibility(EligibilityReport),
}

impl Completion {
    #[must_use]
    pub fn ticket(&self) -> FetchTicket {
        match self {
            Completion::Fetched(done) => done.ticket,
            Completion::Eligibility(report) => report.ticket,
        }
    }
}

/// Runs [`Work`] on the Tokio runtime and collects completions in order of arrival.
///
/// [`TaskRunner::dispatch`] must be called from within a Tokio runtime.
/// Every dispatched item completes exactly once: a fetch that panics
/// completes without an image and an eligibility check that panics reports
/// the page as not editable.
pub struct TaskRunner {
    fetcher: Arc<dyn ImageFetcher>,
    media: Arc<MediaConfig>,
    sender: mpsc::UnboundedSender<Completion>,
    receiver: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl TaskRunner {
    /// Creates a runner using the default animated extensions.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self::with_config(fetcher, &Config::default())
    }

    /// Creates a runner whose eligibility checks follow `config`.
    #[must_use]
    pub fn with_config(fetcher: Arc<dyn ImageFetcher>, config: &Config) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            fetcher,
            media: Arc::new(config.media.clone()),
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Spawns every work item.
    pub fn dispatch(&mut self, work: Vec<Work>) {
        for item in work {
            self.in_flight += 1;
            let sender = self.sender.clone();
            match item {
                Work::Fetch(request) => {
                    log::trace!("Fetching page {}", request.ticket.index);
                    let fetcher = Arc::clone(&self.fetcher);
                    let ticket = request.ticket;
                    tokio::spawn(async move {
                        let fetch = async move { fetcher.fetch(&request.content).await };
                        let image = match AssertUnwindSafe(fetch).catch_unwind().await {
                            Ok(image) => image,
                            Err(_) => {
                                log::warn!("Fetch for page {} panicked", ticket.index);
                                None
                            }
                        };
                        if image.is_none() {
                            log::debug!("Fetch for page {} produced no image", ticket.index);
                        }
                        let _ = sender.send(Completion::Fetched(FetchCompletion { ticket, image }));
                    });
                }
                Work::Probe(probe) => {
                    let media = Arc::clone(&self.media);
                    let ticket = probe.ticket;
                    tokio::spawn(async move {
                        let check = async move {
                            compute_eligibility(&probe.entry, Some(&probe.image), &media).await
                        };
                        let eligible = match AssertUnwindSafe(check).catch_unwind().await {
                            Ok(eligible) => eligible,
                            Err(_) => {
                                log::warn!("Eligibility check for page {} panicked", ticket.index);
                                false
                            }
                        };
                        let _ = sender.send(Completion::Eligibility(EligibilityReport {
                            ticket,
                            eligible,
                        }));
                    });
                }
            }
        }
    }

    /// Waits for the next completion. Returns `None` once nothing is in flight.
    pub async fn next(&mut self) -> Option<Completion> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.receiver.recv().await?;
        self.in_flight -= 1;
        Some(completion)
    }

    /// Returns a completion if one has already arrived.
    pub fn try_next(&mut self) -> Option<Completion> {
        let completion = self.receiver.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(completion)
    }

    /// Number of dispatched items whose completion has not been collected.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }
}

impl std::fmt::Debug for TaskRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRunner")
            .field("media", &self.media)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}
