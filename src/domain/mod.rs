// SPDX-License-Identifier: MPL-2.0
//! Domain layer - gallery and markup value types.
//!
//! This module contains pure data types shared by the application layer and
//! the infrastructure adapters. Nothing here performs I/O or spawns work.
//!
//! # Modules
//!
//! - [`image`]: Gallery slot types ([`Bitmap`], [`ImageContent`], [`ImageEntry`])
//! - [`markup`]: Annotation settings ([`DrawTool`], [`StrokeWidth`], [`Rgba`],
//!   [`DrawSettings`])

pub mod image;
pub mod markup;

pub use image::{Bitmap, ImageClosure, ImageContent, ImageEntry};
pub use markup::{DrawSettings, DrawTool, Point, Rgba, StrokeWidth, StrokeWidthValues};
