//! PNG output and fragment export

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

use crate::fragment::Fragment;

/// Error type for output operations.
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Image encoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Write a tiler fragment batch to `dir` as `r{row}_c{col}.png` files.
///
/// Fragments are already PNG-encoded, so this writes the stored bytes
/// directly. Returns the written paths in row-major order.
pub fn export_fragments(
    fragments: &[Fragment],
    rows: u32,
    cols: u32,
    dir: &Path,
) -> Result<Vec<PathBuf>, OutputError> {
    fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(fragments.len());
    for (index, fragment) in fragments.iter().enumerate() {
        let row = index as u32 / cols.max(1);
        let col = index as u32 % cols.max(1);
        debug_assert!(row < rows.max(1));

        let path = dir.join(format!("r{}_c{}.png", row, col));
        fs::write(&path, fragment.png_bytes())?;
        paths.push(path);
    }

    Ok(paths)
}
