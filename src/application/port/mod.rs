// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces to the collaborators the lightbox
//! core does not implement itself. Infrastructure adapters implement them, and
//! tests substitute recording doubles.
//!
//! # Available Ports
//!
//! - [`annotation`]: Markup surfaces with an undo/redo operation stack
//! - [`fetch`]: Turning an image slot into a decoded bitmap
//! - [`observer`]: Page-change, pre-delete, close and edit-toggle notifications
//!
//! # Design Notes
//!
//! - All traits use domain types only
//! - Fetching returns a boxed future; completions are applied on the owning task
//! - Observers are informational and cannot veto anything

pub mod annotation;
pub mod fetch;
pub mod observer;

pub use annotation::{AnnotationEngine, AnnotationSurface};
pub use fetch::{ImageFetcher, RemoteLoader};
pub use observer::{GalleryObserver, NoopObserver};
