// SPDX-License-Identifier: MPL-2.0
use crate::domain::Bitmap;
use crate::error::{Error, Result};
use image_rs::codecs::gif::GifDecoder;
use image_rs::codecs::png::PngDecoder;
use image_rs::{AnimationDecoder, ImageFormat};
use std::io::Cursor;

/// Decodes encoded image bytes into an RGBA bitmap.
///
/// Animated formats decode to their first frame. The encoded bytes are kept on
/// the bitmap so that frames can be counted later.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the format is unknown or the data is corrupted.
pub fn decode_bitmap(bytes: Vec<u8>) -> Result<Bitmap> {
    let decoded = image_rs::load_from_memory(&bytes)?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Bitmap::from_rgba(width, height, rgba.into_raw()).with_encoded(bytes))
}

/// Counts the frames in an encoded image.
///
/// - GIF: every frame is decoded and counted
/// - WebP: 2 when an `ANMF` chunk marker is present, 1 otherwise
/// - PNG: APNG frames are counted, plain PNG is 1
/// - Anything else decodable is a single frame
///
/// # Errors
///
/// Returns [`Error::Decode`] if the format cannot be recognized or the
/// container header is invalid.
pub fn count_frames(bytes: &[u8]) -> Result<usize> {
    let format = image_rs::guess_format(bytes)?;

    match format {
        ImageFormat::Gif => {
            let decoder = GifDecoder::new(Cursor::new(bytes))?;
            Ok(decoder.into_frames().take_while(|frame| frame.is_ok()).count())
        }
        ImageFormat::WebP => {
            if is_webp_animated_by_marker(bytes) {
                Ok(2)
            } else {
                Ok(1)
            }
        }
        ImageFormat::Png => {
            let decoder = PngDecoder::new(Cursor::new(bytes))?;
            if decoder.is_apng()? {
                let frames = decoder.apng()?.into_frames();
                Ok(frames.take_while(|frame| frame.is_ok()).count())
            } else {
                Ok(1)
            }
        }
        ImageFormat::Jpeg | ImageFormat::Bmp => Ok(1),
        other => Err(Error::Decode(format!("unsupported format {other:?}"))),
    }
}

/// Detects if WebP data is animated by checking for the ANMF chunk marker.
///
/// Animated WebP files contain "ANMF" (Animation Frame) chunks early in their
/// structure, so only the first kilobyte is scanned.
#[must_use]
pub fn is_webp_animated_by_marker(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    head.windows(4).any(|window| window == b"ANMF")
}
