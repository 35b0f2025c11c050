// SPDX-License-Identifier: MPL-2.0
//! Markup eligibility.
//!
//! A page may enter edit mode only when it shows a single still frame: videos
//! and animations are excluded, and so is anything that has not finished
//! loading.

use crate::config::MediaConfig;
use crate::domain::{Bitmap, ImageEntry};
use crate::media;

/// Decides whether `entry` may be annotated.
///
/// The checks run in order and the first failing one wins:
///
/// 1. Entries with a video link are not editable
/// 2. Remote URLs whose extension `media` lists as animated are not editable
/// 3. Entries without a decoded image are not editable
/// 4. The decoded image's encoded bytes are inspected on a blocking worker;
///    only single-frame images are editable
///
/// An image with no encoded bytes is a single in-memory frame. A frame probe
/// that fails marks the entry as not editable.
pub async fn compute_eligibility(
    entry: &ImageEntry,
    decoded: Option<&Bitmap>,
    media: &MediaConfig,
) -> bool {
    if entry.video_url.is_some() {
        return false;
    }

    if let Some(extension) = entry.content.url_extension() {
        if media.is_animated_extension(&extension) {
            return false;
        }
    }

    let Some(decoded) = decoded else {
        return false;
    };

    let Some(encoded) = decoded.encoded_bytes() else {
        return true;
    };

    match tokio::task::spawn_blocking(move || media::count_frames(&encoded)).await {
        Ok(Ok(frames)) => frames == 1,
        Ok(Err(e)) => {
            log::debug!("Frame probe failed: {e}");
            false
        }
        Err(e) => {
            log::warn!("Frame probe task failed: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::codecs::gif::GifEncoder;
    use image_rs::{Delay, Frame, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn gif() -> MediaConfig {
        MediaConfig {
            animated_extensions: vec!["gif".to_string()],
        }
    }

    fn nothing_animated() -> MediaConfig {
        MediaConfig {
            animated_extensions: Vec::new(),
        }
    }

    fn still() -> Bitmap {
        Bitmap::from_rgba(2, 2, vec![255; 16])
    }

    fn encoded_png() -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    fn encoded_gif(frames: u8) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut bytes);
            for i in 0..frames {
                let image = RgbaImage::from_pixel(2, 2, Rgba([i * 50, 0, 0, 255]));
                encoder
                    .encode_frame(Frame::from_parts(
                        image,
                        0,
                        0,
                        Delay::from_numer_denom_ms(100, 1),
                    ))
                    .expect("encode frame");
            }
        }
        bytes
    }

    #[tokio::test]
    async fn in_memory_still_is_eligible() {
        let entry = ImageEntry::from_bitmap(still());
        assert!(compute_eligibility(&entry, Some(&still()), &gif()).await);
    }

    #[tokio::test]
    async fn video_entries_are_not_eligible() {
        let entry = ImageEntry::from_bitmap(still()).with_video_url("https://x.test/a.mp4");
        assert!(!compute_eligibility(&entry, Some(&still()), &gif()).await);
    }

    #[tokio::test]
    async fn animated_extension_is_not_eligible() {
        let entry = ImageEntry::from_url("https://x.test/funny.GIF?size=large");
        assert!(!compute_eligibility(&entry, Some(&still()), &gif()).await);

        let entry = ImageEntry::from_url("https://x.test/funny.gif");
        assert!(compute_eligibility(&entry, Some(&still()), &nothing_animated()).await);
    }

    #[tokio::test]
    async fn missing_image_is_not_eligible() {
        let entry = ImageEntry::from_url("https://x.test/photo.jpg");
        assert!(!compute_eligibility(&entry, None, &gif()).await);
    }

    #[tokio::test]
    async fn encoded_frames_are_inspected() {
        let entry = ImageEntry::from_url("https://x.test/photo");

        let png = still().with_encoded(encoded_png());
        assert!(compute_eligibility(&entry, Some(&png), &gif()).await);

        let single = still().with_encoded(encoded_gif(1));
        assert!(compute_eligibility(&entry, Some(&single), &gif()).await);

        let animated = still().with_encoded(encoded_gif(3));
        assert!(!compute_eligibility(&entry, Some(&animated), &gif()).await);
    }

    #[tokio::test]
    async fn unreadable_bytes_are_not_eligible() {
        let entry = ImageEntry::from_bitmap(still());
        let broken = still().with_encoded(b"garbage".to_vec());
        assert!(!compute_eligibility(&entry, Some(&broken), &gif()).await);
    }
}
