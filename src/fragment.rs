//! Shared, immutable image fragments
//!
//! A fragment is one rectangular slice of an uploaded source image,
//! PNG-encoded so it is a standalone retrievable resource. Fragments are
//! produced in a batch by the tiler and never mutated afterwards; any
//! number of cells may reference the same fragment, so the bytes live
//! behind an `Arc` and cloning never copies pixel data.

use std::fmt;
use std::sync::Arc;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, ImageError, RgbaImage};

/// An immutable, reference-counted PNG-encoded image region.
#[derive(Clone)]
pub struct Fragment {
    png: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl Fragment {
    /// Encode an RGBA image into a standalone PNG fragment.
    pub fn from_image(image: &RgbaImage) -> Result<Self, ImageError> {
        let mut png = Vec::new();
        let encoder = PngEncoder::new(&mut png);
        encoder.write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)?;
        Ok(Self {
            png: png.into(),
            width: image.width(),
            height: image.height(),
        })
    }

    /// Decode the fragment back into pixel form (used for composition).
    pub fn to_image(&self) -> Result<RgbaImage, ImageError> {
        let decoded = image::load_from_memory_with_format(&self.png, image::ImageFormat::Png)?;
        Ok(decoded.to_rgba8())
    }

    /// The encoded PNG bytes.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `self` and `other` reference the same underlying allocation.
    ///
    /// Clones of one tiler output share bytes; this distinguishes sharing
    /// from mere byte equality.
    pub fn shares_bytes_with(&self, other: &Fragment) -> bool {
        Arc::ptr_eq(&self.png, &other.png)
    }
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        self.shares_bytes_with(other)
            || (self.width == other.width && self.height == other.height && self.png == other.png)
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_len", &self.png.len())
            .finish()
    }
}
