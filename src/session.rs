//! Session facade over the tiler, transition function and history
//!
//! A `Session` owns the single current grid and the undo/redo stacks, and
//! is the in-process API a rendering layer drives: translate a gesture
//! into an [`Action`], `dispatch` it, re-render from `current_grid`. All
//! methods are synchronous and take `&mut self`, so a decode-then-upload
//! runs as one unit and no action can interleave with it.

use crate::history::History;
use crate::models::{Action, Grid, GridConfig};
use crate::tiler::{self, TilerError};
use crate::transition::transition;

/// One interactive puzzle session: current grid, history, configuration.
#[derive(Debug, Clone)]
pub struct Session {
    config: GridConfig,
    current: Grid,
    history: History,
}

impl Session {
    /// Start a session with a blank grid and empty history.
    pub fn new(config: GridConfig) -> Self {
        Self {
            current: Grid::blank(config.rows, config.cols),
            config,
            history: History::new(),
        }
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// The snapshot a renderer should display.
    pub fn current_grid(&self) -> &Grid {
        &self.current
    }

    /// Checkpoint the current snapshot, then apply `action`.
    ///
    /// Every dispatched action is checkpointed, so an immediate `undo`
    /// always yields the exact pre-action grid.
    pub fn dispatch(&mut self, action: Action) -> &Grid {
        self.history.checkpoint(self.current.clone());
        self.current = transition(&self.current, &action);
        &self.current
    }

    /// Decode, tile and upload image bytes as a single unit.
    ///
    /// On any decode or tiling error the grid and history are left exactly
    /// as they were; the error is terminal for this upload attempt only.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<&Grid, TilerError> {
        let decoded = tiler::decode_image(bytes)?;
        let fragments = tiler::tile(
            &decoded,
            self.config.rows,
            self.config.cols,
            self.config.canvas_size,
        )?;
        Ok(self.dispatch(Action::UploadImage { fragments }))
    }

    /// Clear the puzzle back to a blank grid (undoable like any action).
    pub fn reset(&mut self) -> &Grid {
        let target = Grid::blank(self.config.rows, self.config.cols);
        self.dispatch(Action::Reset { target })
    }

    /// Step back one snapshot; a no-op when there is nothing to undo.
    pub fn undo(&mut self) -> &Grid {
        if let Some(previous) = self.history.undo(self.current.clone()) {
            self.current = previous;
        }
        &self.current
    }

    /// Step forward one snapshot; a no-op when there is nothing to redo.
    pub fn redo(&mut self) -> &Grid {
        if let Some(next) = self.history.redo(self.current.clone()) {
            self.current = next;
        }
        &self.current
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Fragment;
    use crate::models::Rotation;
    use image::{Rgba, RgbaImage};

    fn solid_png(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
        Fragment::from_image(&RgbaImage::from_pixel(width, height, color))
            .unwrap()
            .png_bytes()
            .to_vec()
    }

    #[test]
    fn test_new_session_starts_blank() {
        let session = Session::default();
        let grid = session.current_grid();
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cols(), 10);
        assert!(grid.cells().iter().all(|c| c.fragment.is_none()));
        assert!(!session.can_undo());
        assert!(!session.can_redo());
    }

    #[test]
    fn test_dispatch_checkpoints_before_applying() {
        let mut session = Session::default();
        let before = session.current_grid().clone();

        session.dispatch(Action::RotateClockwise { row: 3, col: 4 });
        let after = session.current_grid().clone();
        assert_ne!(after, before);

        assert_eq!(*session.undo(), before);
        assert_eq!(*session.redo(), after);
    }

    #[test]
    fn test_undo_redo_underflow_keeps_current() {
        let mut session = Session::default();
        let grid = session.current_grid().clone();
        assert_eq!(*session.undo(), grid);
        assert_eq!(*session.redo(), grid);
    }

    #[test]
    fn test_load_image_populates_every_cell() {
        let mut session = Session::default();
        let bytes = solid_png(500, 500, Rgba([255, 0, 0, 255]));

        session.load_image(&bytes).unwrap();
        let grid = session.current_grid();
        for cell in grid.cells() {
            assert!(cell.fragment.is_some());
            assert_eq!(cell.rotation, Rotation::R0);
            assert!(!cell.transparent);
        }
    }

    #[test]
    fn test_load_image_is_undoable() {
        let mut session = Session::default();
        let blank = session.current_grid().clone();
        let bytes = solid_png(100, 100, Rgba([0, 255, 0, 255]));

        session.load_image(&bytes).unwrap();
        assert_eq!(*session.undo(), blank);
    }

    #[test]
    fn test_failed_load_leaves_grid_and_history_untouched() {
        let mut session = Session::default();
        session.dispatch(Action::RotateClockwise { row: 0, col: 0 });
        let before = session.current_grid().clone();

        assert!(session.load_image(b"not an image").is_err());
        assert_eq!(*session.current_grid(), before);

        // Exactly one undo step exists (the rotation), not a stray upload
        session.undo();
        assert!(!session.can_undo());
    }

    #[test]
    fn test_second_upload_reskins_but_preserves_rotation() {
        let mut session = Session::default();
        session.load_image(&solid_png(100, 100, Rgba([255, 0, 0, 255]))).unwrap();
        session.dispatch(Action::RotateClockwise { row: 1, col: 1 });

        session.load_image(&solid_png(100, 100, Rgba([0, 0, 255, 255]))).unwrap();
        let cell = session.current_grid().cell(1, 1).unwrap();
        assert_eq!(cell.rotation, Rotation::R90);

        let pixel = *cell.fragment.as_ref().unwrap().to_image().unwrap().get_pixel(10, 10);
        assert_eq!(pixel, Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_reset_clears_to_blank_and_is_undoable() {
        let mut session = Session::default();
        session.load_image(&solid_png(100, 100, Rgba([255, 0, 0, 255]))).unwrap();
        let uploaded = session.current_grid().clone();

        session.reset();
        assert_eq!(*session.current_grid(), Grid::blank(10, 10));

        assert_eq!(*session.undo(), uploaded);
    }

    #[test]
    fn test_new_action_after_undo_clears_redo() {
        let mut session = Session::default();
        session.dispatch(Action::RotateClockwise { row: 0, col: 0 });
        session.undo();
        assert!(session.can_redo());

        session.dispatch(Action::ToggleTransparency { row: 2, col: 2 });
        assert!(!session.can_redo());
    }
}
