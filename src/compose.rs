//! Composition of a grid snapshot back into a single image
//!
//! The inverse of the tiler: lay every cell's fragment out on one canvas,
//! applying the cell's rotation and transparency. Used by the CLI to save
//! the final board and by end-to-end tests to observe grid state as pixels.

use image::{imageops, Rgba, RgbaImage};
use thiserror::Error;

use crate::models::{Grid, Rotation};

/// Transparent color used for empty and toggled-transparent cells
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Error type for composition failures.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// A cell's fragment bytes failed to decode.
    #[error("failed to decode fragment: {0}")]
    Fragment(#[from] image::ImageError),
}

/// Render a grid snapshot into one RGBA image.
///
/// Cell size is the maximum fragment dimension across the grid (uniform
/// for tiler output); fragment-less and transparent cells render as fully
/// transparent pixels. A rotated rectangular fragment is clipped to its
/// cell bounds.
pub fn compose_grid(grid: &Grid) -> Result<RgbaImage, ComposeError> {
    let fragments = grid.cells().iter().filter_map(|cell| cell.fragment.as_ref());
    let cell_width = fragments.clone().map(|f| f.width()).max().unwrap_or(1);
    let cell_height = fragments.map(|f| f.height()).max().unwrap_or(1);

    let mut sheet = RgbaImage::from_pixel(
        grid.cols() * cell_width,
        grid.rows() * cell_height,
        TRANSPARENT,
    );

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let Some(cell) = grid.cell(row, col) else {
                continue;
            };
            if cell.transparent {
                continue;
            }
            let Some(fragment) = &cell.fragment else {
                continue;
            };

            let decoded = fragment.to_image()?;
            let rotated = match cell.rotation {
                Rotation::R0 => decoded,
                Rotation::R90 => imageops::rotate90(&decoded),
                Rotation::R180 => imageops::rotate180(&decoded),
                Rotation::R270 => imageops::rotate270(&decoded),
            };

            let dest_x = col * cell_width;
            let dest_y = row * cell_height;
            let copy_width = rotated.width().min(cell_width);
            let copy_height = rotated.height().min(cell_height);
            for y in 0..copy_height {
                for x in 0..copy_width {
                    sheet.put_pixel(dest_x + x, dest_y + y, *rotated.get_pixel(x, y));
                }
            }
        }
    }

    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Fragment;
    use crate::models::Action;
    use crate::tiler::tile;
    use crate::transition::transition;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);

    fn uploaded_grid(rows: u32, cols: u32, canvas: u32, color: Rgba<u8>) -> Grid {
        let source = RgbaImage::from_pixel(canvas, canvas, color);
        let fragments = tile(&source, rows, cols, canvas).unwrap();
        transition(&Grid::blank(rows, cols), &Action::UploadImage { fragments })
    }

    #[test]
    fn test_blank_grid_composes_transparent() {
        let sheet = compose_grid(&Grid::blank(10, 10)).unwrap();
        assert_eq!(sheet.dimensions(), (10, 10));
        assert!(sheet.pixels().all(|p| *p == TRANSPARENT));
    }

    #[test]
    fn test_solid_grid_composes_back_to_canvas() {
        let grid = uploaded_grid(2, 2, 100, RED);
        let sheet = compose_grid(&grid).unwrap();
        assert_eq!(sheet.dimensions(), (100, 100));
        assert!(sheet.pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_transparent_cell_renders_transparent() {
        let grid = uploaded_grid(2, 2, 100, RED);
        let grid = transition(&grid, &Action::ToggleTransparency { row: 0, col: 1 });
        let sheet = compose_grid(&grid).unwrap();

        // The toggled cell's block is transparent, the rest still red
        assert_eq!(*sheet.get_pixel(75, 25), TRANSPARENT);
        assert_eq!(*sheet.get_pixel(25, 25), RED);
        assert_eq!(*sheet.get_pixel(25, 75), RED);
        assert_eq!(*sheet.get_pixel(75, 75), RED);
    }

    #[test]
    fn test_rotation_moves_pixels() {
        // Mark the top-left pixel of a 4x4 fragment, rotate the cell
        // clockwise, and expect the mark in the top-right corner.
        let mut marked = RgbaImage::from_pixel(4, 4, RED);
        marked.put_pixel(0, 0, GREEN);

        let mut grid = Grid::blank(1, 1);
        if let Some(cell) = grid.cell_mut(0, 0) {
            cell.fragment = Some(Fragment::from_image(&marked).unwrap());
        }

        let rotated = transition(&grid, &Action::RotateClockwise { row: 0, col: 0 });
        let sheet = compose_grid(&rotated).unwrap();
        assert_eq!(*sheet.get_pixel(3, 0), GREEN);
        assert_eq!(*sheet.get_pixel(0, 0), RED);
    }

    #[test]
    fn test_missing_fragment_cell_renders_transparent() {
        let mut grid = uploaded_grid(2, 2, 100, RED);
        if let Some(cell) = grid.cell_mut(1, 1) {
            cell.fragment = None;
        }
        let sheet = compose_grid(&grid).unwrap();
        assert_eq!(*sheet.get_pixel(75, 75), TRANSPARENT);
        assert_eq!(*sheet.get_pixel(25, 25), RED);
    }
}
