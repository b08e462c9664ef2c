//! Positions and cells.

use crate::direction::Direction;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A grid position in cell coordinates.
///
/// `(0, 0)` is the top-left corner; `x` grows rightward and `y` grows
/// downward. Positions are ordered in row-major (raster) order so that
/// ordered collections iterate the same way the run-length encoder
/// scans the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl Position {
    /// Create a position.
    pub fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// The position at `index` in a row-major scan of a grid `width`
    /// cells wide.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero; a zero-width grid has no raster
    /// positions.
    pub fn from_raster_index(index: u64, width: u32) -> Position {
        assert!(width > 0, "raster scan over a zero-width grid");
        Position {
            x: (index % u64::from(width)) as i32,
            y: (index / u64::from(width)) as i32,
        }
    }

    /// The row-major index of this position in a grid `width` cells
    /// wide. Only meaningful for non-negative coordinates.
    pub fn raster_index(self, width: u32) -> u64 {
        debug_assert!(self.x >= 0 && self.y >= 0);
        self.y as u64 * u64::from(width) + self.x as u64
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Position) -> Ordering {
        // Row first, then column: raster order.
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Position) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One grid occupant: a numeric type id, a position, and a facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Numeric cell type id. Meaning is up to the consuming game or
    /// editor; the codecs only move it.
    pub cell_type: u32,
    /// Where the cell sits.
    pub position: Position,
    /// Which way the cell faces.
    pub direction: Direction,
}

impl Cell {
    /// Create a cell.
    pub fn new(cell_type: u32, position: Position, direction: Direction) -> Cell {
        Cell {
            cell_type,
            position,
            direction,
        }
    }
}
