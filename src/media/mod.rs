// SPDX-License-Identifier: MPL-2.0
//! Media decoding.
//!
//! Turns encoded bytes (PNG, JPEG, GIF, WebP, BMP) into a [`Bitmap`] and
//! inspects how many frames an encoded image carries. Both are blocking and
//! are meant to run on a `spawn_blocking` worker.
//!
//! [`Bitmap`]: crate::domain::Bitmap

mod decode;

pub use decode::{count_frames, decode_bitmap, is_webp_animated_by_marker};
