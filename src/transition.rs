//! The pure transition function over grid snapshots

use crate::models::{Action, Grid};

/// Apply `action` to `grid`, producing the next snapshot.
///
/// Pure and total: the inputs are never mutated, and every action has a
/// defined result. Actions that cannot apply cleanly (out-of-range
/// coordinates, a fragment batch of the wrong length, a self-swap) return
/// the input grid unchanged rather than failing the session.
pub fn transition(grid: &Grid, action: &Action) -> Grid {
    match action {
        Action::RotateClockwise { row, col } => {
            let mut next = grid.clone();
            if let Some(cell) = next.cell_mut(*row, *col) {
                cell.rotation = cell.rotation.clockwise();
            }
            next
        }
        Action::RotateCounterclockwise { row, col } => {
            let mut next = grid.clone();
            if let Some(cell) = next.cell_mut(*row, *col) {
                cell.rotation = cell.rotation.counterclockwise();
            }
            next
        }
        Action::ToggleTransparency { row, col } => {
            let mut next = grid.clone();
            if let Some(cell) = next.cell_mut(*row, *col) {
                cell.transparent = !cell.transparent;
            }
            next
        }
        Action::UploadImage { fragments } => {
            // Re-skin only: rotation and transparency survive an upload.
            if fragments.len() != (grid.rows() * grid.cols()) as usize {
                return grid.clone();
            }
            let mut next = grid.clone();
            for row in 0..next.rows() {
                for col in 0..next.cols() {
                    let index = (row * next.cols() + col) as usize;
                    if let Some(cell) = next.cell_mut(row, col) {
                        cell.fragment = Some(fragments[index].clone());
                    }
                }
            }
            next
        }
        Action::Swap { row_a, col_a, row_b, col_b } => {
            let (Some(a), Some(b)) = (grid.index(*row_a, *col_a), grid.index(*row_b, *col_b))
            else {
                return grid.clone();
            };
            if a == b {
                return grid.clone();
            }
            let mut next = grid.clone();
            next.swap_cells(a, b);
            next
        }
        Action::Reset { target } => target.clone(),
    }
}
