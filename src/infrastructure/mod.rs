// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`fetch`]: [`SourceFetcher`], resolving bitmaps, lazy closures and remote
//!   URLs (implements [`ImageFetcher`])
//! - [`skia`]: [`SkiaAnnotationEngine`], vector strokes rasterized with
//!   tiny-skia (implements [`AnnotationEngine`])
//!
//! [`ImageFetcher`]: crate::application::port::ImageFetcher
//! [`AnnotationEngine`]: crate::application::port::AnnotationEngine

pub mod fetch;
pub mod skia;

pub use fetch::SourceFetcher;
pub use skia::{SkiaAnnotationEngine, SkiaSurface};
