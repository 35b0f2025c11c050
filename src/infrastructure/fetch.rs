// SPDX-License-Identifier: MPL-2.0
//! Default image fetcher.
//!
//! - In-memory bitmaps resolve immediately
//! - Lazy closures run on a blocking worker
//! - Remote URLs are downloaded by the injected [`RemoteLoader`] and decoded on
//!   a blocking worker
//! - Stubs resolve to `None`

use crate::application::port::{ImageFetcher, RemoteLoader};
use crate::domain::{Bitmap, ImageContent};
use crate::media;
use futures_util::future::{self, BoxFuture, FutureExt};
use std::sync::Arc;

/// Fetcher for every [`ImageContent`] variant.
#[derive(Clone, Default)]
pub struct SourceFetcher {
    remote: Option<Arc<dyn RemoteLoader>>,
}

impl SourceFetcher {
    /// Creates a fetcher without network access. Remote URLs resolve to `None`.
    #[must_use]
    pub fn new() -> Self {
        Self { remote: None }
    }

    /// Creates a fetcher that downloads remote URLs with `loader`.
    #[must_use]
    pub fn with_remote_loader(loader: Arc<dyn RemoteLoader>) -> Self {
        Self {
            remote: Some(loader),
        }
    }
}

impl std::fmt::Debug for SourceFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFetcher")
            .field("remote", &self.remote.is_some())
            .finish()
    }
}

impl ImageFetcher for SourceFetcher {
    fn fetch(&self, content: &ImageContent) -> BoxFuture<'static, Option<Bitmap>> {
        match content {
            ImageContent::Bitmap(bitmap) => future::ready(Some(bitmap.clone())).boxed(),
            ImageContent::Lazy(closure) => {
                let closure = Arc::clone(closure);
                async move {
                    tokio::task::spawn_blocking(move || closure())
                        .await
                        .map_err(|e| log::warn!("Lazy image task failed: {e}"))
                        .ok()
                }
                .boxed()
            }
            ImageContent::Url(url) => {
                let Some(loader) = self.remote.clone() else {
                    log::warn!("Cannot fetch {url}: no remote loader configured");
                    return future::ready(None).boxed();
                };
                let url = url.clone();
                async move {
                    let bytes = loader.load(&url).await?;
                    let decoded = tokio::task::spawn_blocking(move || media::decode_bitmap(bytes))
                        .await
                        .map_err(|e| log::warn!("Decode task for {url} failed: {e}"))
                        .ok()?;
                    decoded
                        .map_err(|e| log::warn!("Failed to decode {url}: {e}"))
                        .ok()
                }
                .boxed()
            }
            ImageContent::Stub => future::ready(None).boxed(),
        }
    }
}
