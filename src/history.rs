//! Linear undo/redo history over grid snapshots
//!
//! Back-stack / forward-stack model: checkpointing pushes the pre-action
//! snapshot onto the back stack and invalidates any redo path, so a new
//! action after an undo diverges cleanly. Underflow on either stack is a
//! routine no-op, never an error. Depth is unbounded; snapshots are small
//! and share fragment bytes, so a session's history stays cheap.

use crate::models::Grid;

/// Undo/redo stacks of past grid snapshots.
#[derive(Debug, Clone, Default)]
pub struct History {
    back: Vec<Grid>,
    forward: Vec<Grid>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-action snapshot. Clears any available redo path.
    pub fn checkpoint(&mut self, snapshot: Grid) {
        self.back.push(snapshot);
        self.forward.clear();
    }

    /// Step back one snapshot.
    ///
    /// Pops the most recent back-stack entry, stashing `current` (the grid
    /// being displayed) on the forward stack so `redo` can restore it.
    /// Returns `None` when there is nothing to undo; `current` is dropped
    /// untouched in that case.
    pub fn undo(&mut self, current: Grid) -> Option<Grid> {
        let previous = self.back.pop()?;
        self.forward.push(current);
        Some(previous)
    }

    /// Step forward one snapshot, the inverse of `undo`.
    pub fn redo(&mut self, current: Grid) -> Option<Grid> {
        let next = self.forward.pop()?;
        self.back.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.forward.is_empty()
    }

    pub fn clear(&mut self) {
        self.back.clear();
        self.forward.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Action;
    use crate::transition::transition;

    #[test]
    fn test_empty_history_undo_redo_underflow() {
        let mut history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo(Grid::blank(2, 2)).is_none());
        assert!(history.redo(Grid::blank(2, 2)).is_none());
    }

    #[test]
    fn test_checkpoint_apply_undo_redo_roundtrip() {
        let mut history = History::new();
        let before = Grid::blank(10, 10);
        let action = Action::RotateClockwise { row: 3, col: 4 };

        history.checkpoint(before.clone());
        let after = transition(&before, &action);

        let undone = history.undo(after.clone()).unwrap();
        assert_eq!(undone, before);

        let redone = history.redo(undone).unwrap();
        assert_eq!(redone, after);
    }

    #[test]
    fn test_checkpoint_clears_forward_stack() {
        let mut history = History::new();
        let g0 = Grid::blank(2, 2);
        let g1 = transition(&g0, &Action::RotateClockwise { row: 0, col: 0 });

        history.checkpoint(g0.clone());
        let undone = history.undo(g1).unwrap();
        assert!(history.can_redo());

        // A divergent action invalidates the redo path
        history.checkpoint(undone);
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn test_undo_on_empty_does_not_stash_current() {
        let mut history = History::new();
        assert!(history.undo(Grid::blank(2, 2)).is_none());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_multi_step_undo_walks_back_in_order() {
        let mut history = History::new();
        let g0 = Grid::blank(3, 3);
        let g1 = transition(&g0, &Action::RotateClockwise { row: 0, col: 0 });
        let g2 = transition(&g1, &Action::RotateClockwise { row: 1, col: 1 });

        history.checkpoint(g0.clone());
        history.checkpoint(g1.clone());

        assert_eq!(history.undo(g2.clone()).unwrap(), g1);
        assert_eq!(history.undo(g1.clone()).unwrap(), g0);
        assert!(history.undo(g0.clone()).is_none());

        assert_eq!(history.redo(g0).unwrap(), g1);
        assert_eq!(history.redo(g1).unwrap(), g2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_clear_empties_both_stacks() {
        let mut history = History::new();
        let g0 = Grid::blank(2, 2);
        history.checkpoint(g0.clone());
        history.undo(g0).unwrap();

        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
