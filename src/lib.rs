// SPDX-License-Identifier: MPL-2.0
//! `lightbox_core` is the headless state engine behind a full-screen image
//! lightbox.
//!
//! It decides which pages hold decoded bitmaps, keeps the current page and the
//! per-page markup sessions consistent while the user swipes, deletes pages and
//! toggles edit mode, and resolves drag gestures into target pages. Rendering,
//! gestures and presentation belong to the host UI, which feeds events in and
//! reads derived state back out.
//!
//! # Example
//!
//! ```no_run
//! use lightbox_core::application::{Lightbox, TaskRunner};
//! use lightbox_core::config::Config;
//! use lightbox_core::domain::{Bitmap, ImageEntry};
//! use lightbox_core::infrastructure::{SkiaAnnotationEngine, SourceFetcher};
//! use std::sync::Arc;
//!
//! # async fn run() -> lightbox_core::error::Result<()> {
//! let entries = vec![
//!     ImageEntry::from_bitmap(Bitmap::from_rgba(2, 2, vec![0; 16])),
//!     ImageEntry::from_url("https://example.com/photo.jpg"),
//! ];
//! let mut lightbox = Lightbox::builder(Config::default())
//!     .engine(Box::new(SkiaAnnotationEngine::new()))
//!     .build(entries, 0)?;
//! let mut runner = TaskRunner::new(Arc::new(SourceFetcher::new()));
//! lightbox.settle(&mut runner).await;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
