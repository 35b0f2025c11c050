// SPDX-License-Identifier: MPL-2.0
//! Core image types for the gallery.
//!
//! A gallery is an ordered list of [`ImageEntry`] slots. Each slot holds exactly
//! one [`ImageContent`] variant: a decoded bitmap, a remote URL, a lazily
//! computed bitmap, or a stub that holds nothing.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Decoded RGBA pixels, plus the encoded bytes they came from when known.
///
/// The encoded bytes are kept so that frame inspection (animated GIF, WebP,
/// APNG) can run later without refetching.
///
/// # Example
///
/// ```
/// use lightbox_core::domain::Bitmap;
///
/// let pixels = vec![255u8; 4 * 3 * 4]; // 4x3 RGBA
/// let bitmap = Bitmap::from_rgba(4, 3, pixels);
///
/// assert_eq!(bitmap.width(), 4);
/// assert_eq!(bitmap.height(), 3);
/// assert!(bitmap.encoded_bytes().is_none());
/// ```
#[derive(Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba_bytes: Arc<Vec<u8>>,
    encoded: Option<Arc<Vec<u8>>>,
}

impl Bitmap {
    /// Creates a bitmap from dimensions and owned RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 4`.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, rgba_bytes: Vec<u8>) -> Self {
        let expected_len = (width as usize) * (height as usize) * 4;
        assert_eq!(
            rgba_bytes.len(),
            expected_len,
            "RGBA data length mismatch: expected {expected_len}, got {}",
            rgba_bytes.len()
        );

        Self {
            width,
            height,
            rgba_bytes: Arc::new(rgba_bytes),
            encoded: None,
        }
    }

    /// Attaches the encoded source bytes this bitmap was decoded from.
    #[must_use]
    pub fn with_encoded(mut self, encoded: Vec<u8>) -> Self {
        self.encoded = Some(Arc::new(encoded));
        self
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns a reference to the RGBA pixel data.
    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Returns the encoded bytes, if the bitmap was decoded from a file or download.
    #[must_use]
    pub fn encoded_bytes(&self) -> Option<Arc<Vec<u8>>> {
        self.encoded.as_ref().map(Arc::clone)
    }

    /// Returns true when both bitmaps share the same pixel buffer.
    #[must_use]
    pub fn shares_pixels_with(&self, other: &Bitmap) -> bool {
        Arc::ptr_eq(&self.rgba_bytes, &other.rgba_bytes)
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.rgba_bytes == other.rgba_bytes
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("encoded_len", &self.encoded.as_ref().map(|e| e.len()))
            .finish()
    }
}

/// Closure producing a bitmap on demand. Runs on a blocking worker.
pub type ImageClosure = Arc<dyn Fn() -> Bitmap + Send + Sync>;

/// What a gallery slot currently holds.
#[derive(Clone)]
pub enum ImageContent {
    /// An in-memory bitmap supplied by the caller or produced by a markup commit.
    Bitmap(Bitmap),
    /// A remote image fetched through the injected remote loader.
    Url(String),
    /// A bitmap computed on demand.
    Lazy(ImageClosure),
    /// Placeholder for a page outside the preload window.
    Stub,
}

impl ImageContent {
    #[must_use]
    pub fn is_stub(&self) -> bool {
        matches!(self, ImageContent::Stub)
    }

    /// Returns the remote URL, if this content is fetched from the network.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            ImageContent::Url(url) => Some(url),
            _ => None,
        }
    }

    /// Returns the lowercase file extension of the URL path, ignoring query and fragment.
    #[must_use]
    pub fn url_extension(&self) -> Option<String> {
        let url = self.url()?;
        let without_fragment = url.split('#').next().unwrap_or(url);
        let path = without_fragment.split('?').next().unwrap_or(without_fragment);
        let last_segment = path.rsplit('/').next().unwrap_or(path);
        Path::new(last_segment)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
    }
}

impl fmt::Debug for ImageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageContent::Bitmap(bitmap) => f.debug_tuple("Bitmap").field(bitmap).finish(),
            ImageContent::Url(url) => f.debug_tuple("Url").field(url).finish(),
            ImageContent::Lazy(_) => f.write_str("Lazy(..)"),
            ImageContent::Stub => f.write_str("Stub"),
        }
    }
}

/// One gallery slot: content plus caption and optional video link.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub content: ImageContent,
    pub caption: String,
    /// Presence shows the play affordance and disables markup.
    pub video_url: Option<String>,
}

impl ImageEntry {
    #[must_use]
    pub fn from_bitmap(bitmap: Bitmap) -> Self {
        Self::new(ImageContent::Bitmap(bitmap))
    }

    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(ImageContent::Url(url.into()))
    }

    #[must_use]
    pub fn from_closure<F>(closure: F) -> Self
    where
        F: Fn() -> Bitmap + Send + Sync + 'static,
    {
        Self::new(ImageContent::Lazy(Arc::new(closure)))
    }

    /// The placeholder used for pages outside the preload window.
    #[must_use]
    pub fn stub() -> Self {
        Self::new(ImageContent::Stub)
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    #[must_use]
    pub fn with_video_url(mut self, video_url: impl Into<String>) -> Self {
        self.video_url = Some(video_url.into());
        self
    }

    #[must_use]
    pub fn is_stub(&self) -> bool {
        self.content.is_stub()
    }

    fn new(content: ImageContent) -> Self {
        Self {
            content,
            caption: String::new(),
            video_url: None,
        }
    }
}
