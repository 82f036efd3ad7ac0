//! Image decoding and slicing into per-cell fragments
//!
//! The tiler turns uploaded image bytes into the ordered fragment sequence
//! the grid consumes. The source is first stretched to a square canvas by
//! direct remap (never letterboxed), then partitioned into equal cells,
//! row-major. Given the same decoded input and parameters the output is
//! byte-for-byte reproducible, so restoring the original tiling of an
//! earlier upload regenerates identical fragments.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use thiserror::Error;

use crate::fragment::Fragment;

/// Error type for decode and tiling failures.
#[derive(Debug, Error)]
pub enum TilerError {
    /// The uploaded bytes are not a decodable image.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// A fragment could not be PNG-encoded.
    #[error("failed to encode fragment: {0}")]
    Encode(#[source] image::ImageError),

    /// Zero dimensions, or a canvas that does not divide evenly into cells.
    #[error("invalid tiling dimensions: {rows}x{cols} cells over a {canvas_size}px canvas")]
    InvalidDimensions { rows: u32, cols: u32, canvas_size: u32 },
}

/// Decode uploaded image bytes into RGBA pixel form.
///
/// Format detection is left to the `image` crate. On failure the caller's
/// grid stays untouched; a decode error is terminal for that upload attempt.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, TilerError> {
    let decoded = image::load_from_memory(bytes).map_err(TilerError::Decode)?;
    Ok(decoded.to_rgba8())
}

/// Slice a decoded image into `rows * cols` fragments, row-major.
///
/// The source is uniformly scaled to `canvas_size` x `canvas_size` first,
/// stretching non-square sources rather than letterboxing them, then cut
/// into cells of `canvas_size / cols` x `canvas_size / rows` pixels. Each
/// cell is materialized and encoded independently.
///
/// Fails with `InvalidDimensions` when `rows`, `cols` or `canvas_size` is
/// zero, or when `canvas_size` is not divisible by either cell count. Any
/// encode failure aborts the whole call; no partial sequence is returned.
pub fn tile(
    source: &RgbaImage,
    rows: u32,
    cols: u32,
    canvas_size: u32,
) -> Result<Vec<Fragment>, TilerError> {
    if rows == 0
        || cols == 0
        || canvas_size == 0
        || canvas_size % rows != 0
        || canvas_size % cols != 0
    {
        return Err(TilerError::InvalidDimensions { rows, cols, canvas_size });
    }

    let scaled = imageops::resize(source, canvas_size, canvas_size, FilterType::Triangle);
    let cell_width = canvas_size / cols;
    let cell_height = canvas_size / rows;

    let mut fragments = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let cell = imageops::crop_imm(
                &scaled,
                col * cell_width,
                row * cell_height,
                cell_width,
                cell_height,
            )
            .to_image();
            fragments.push(Fragment::from_image(&cell).map_err(TilerError::Encode)?);
        }
    }

    Ok(fragments)
}
