//! Data models for the puzzle core (cells, grids, actions)

use serde::{Deserialize, Serialize};

use crate::fragment::Fragment;

/// A quarter-turn rotation applied to one cell.
///
/// Closed under clockwise and counterclockwise turns, so a cell's rotation
/// is always one of 0, 90, 180 or 270 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// One quarter turn clockwise.
    pub fn clockwise(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    /// One quarter turn counterclockwise.
    pub fn counterclockwise(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R270,
            Rotation::R90 => Rotation::R0,
            Rotation::R180 => Rotation::R90,
            Rotation::R270 => Rotation::R180,
        }
    }

    /// The rotation as degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            other => Err(format!(
                "invalid rotation degrees: {} (must be 0, 90, 180, or 270)",
                other
            )),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> u16 {
        rotation.degrees()
    }
}

/// The state of one grid position.
///
/// A cell is a value: every mutation goes through the transition function,
/// which produces a new cell rather than editing in place. `fragment` is
/// `None` until an image has been uploaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub rotation: Rotation,
    pub transparent: bool,
    pub fragment: Option<Fragment>,
}

/// A fixed-size rectangular grid of cells, row-major.
///
/// Dimensions never change after construction; every position always holds
/// a valid cell. Cloning a grid is cheap because fragments are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid of `rows * cols` default cells (no rotation, opaque, no fragment).
    pub fn blank(rows: u32, cols: u32) -> Self {
        let cells = vec![Cell::default(); (rows * cols) as usize];
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// The cell at `(row, col)`, or `None` when the coordinate is out of range.
    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        let index = self.index(row, col)?;
        self.cells.get(index)
    }

    pub(crate) fn cell_mut(&mut self, row: u32, col: u32) -> Option<&mut Cell> {
        let index = self.index(row, col)?;
        self.cells.get_mut(index)
    }

    /// All cells in row-major order (`index = row * cols + col`).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn index(&self, row: u32, col: u32) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some((row * self.cols + col) as usize)
        } else {
            None
        }
    }

    pub(crate) fn swap_cells(&mut self, a: usize, b: usize) {
        self.cells.swap(a, b);
    }
}

/// A discrete user action against a grid snapshot.
///
/// Each variant is self-contained: it carries everything the transition
/// function needs, and none inspects cells other than the ones it names.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RotateClockwise { row: u32, col: u32 },
    RotateCounterclockwise { row: u32, col: u32 },
    ToggleTransparency { row: u32, col: u32 },
    /// Re-skin every cell with `fragments[row * cols + col]`, preserving
    /// rotation and transparency. Distinct from `Reset`: uploading a new
    /// image does not reset manipulation state.
    UploadImage { fragments: Vec<Fragment> },
    Swap { row_a: u32, col_a: u32, row_b: u32, col_b: u32 },
    /// Replace the whole grid with the supplied snapshot verbatim.
    Reset { target: Grid },
}

/// Grid dimensions and the square canvas side the tiler scales sources to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default = "default_cols")]
    pub cols: u32,
    #[serde(default = "default_canvas_size")]
    pub canvas_size: u32,
}

fn default_rows() -> u32 {
    10
}

fn default_cols() -> u32 {
    10
}

fn default_canvas_size() -> u32 {
    500
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 10, cols: 10, canvas_size: 500 }
    }
}

/// A warning message from script parsing or execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Warning {
    pub message: String,
    pub line: usize,
}
