// SPDX-License-Identifier: MPL-2.0
//! Image fetching port definitions.
//!
//! A fetch turns the content of a gallery slot into a decoded [`Bitmap`]. It has
//! a single completion and cannot be cancelled; a failed fetch completes with
//! `None` and the page keeps showing its loading state.

use crate::domain::{Bitmap, ImageContent};
use futures_util::future::BoxFuture;

/// Port for materializing gallery content.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the returned future is polled on a
/// Tokio worker.
pub trait ImageFetcher: Send + Sync {
    /// Starts fetching `content`. Stubs resolve to `None`.
    fn fetch(&self, content: &ImageContent) -> BoxFuture<'static, Option<Bitmap>>;
}

/// Port for downloading the encoded bytes behind a remote URL.
///
/// The lightbox never talks to the network itself: hosts inject the loader
/// they already use for the rest of their app.
pub trait RemoteLoader: Send + Sync {
    /// Downloads `url`, resolving to `None` on any failure.
    fn load(&self, url: &str) -> BoxFuture<'static, Option<Vec<u8>>>;
}
