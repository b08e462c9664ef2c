//! The cell grid.

use crate::error::{GridError, Result};
use crate::types::{Cell, Position};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// A rectangular grid of cells plus drag-spot markers.
///
/// At most one cell occupies a position and every stored position lies
/// inside the bounds; both are enforced at insertion. Drag spots mark
/// positions the player may drag cells across and are independent of
/// cell occupancy: a position can hold a cell, be a drag spot, both, or
/// neither.
///
/// Storage is sparse and iteration is in raster order, which keeps
/// every encoding of the same grid byte-stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellGrid {
    width: i32,
    height: i32,
    // Struct keys do not survive serde_json; cells serialize as a list.
    #[serde(with = "cells_as_list")]
    cells: BTreeMap<Position, Cell>,
    drag_spots: BTreeSet<Position>,
}

impl CellGrid {
    /// Create an empty grid.
    ///
    /// Dimensions must be non-negative. A zero-area grid is legal and
    /// holds nothing.
    pub fn new(width: i32, height: i32) -> Result<CellGrid> {
        if width < 0 || height < 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(CellGrid {
            width,
            height,
            cells: BTreeMap::new(),
            drag_spots: BTreeSet::new(),
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// `width * height`.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether `position` lies inside the grid.
    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    /// Place a cell on its position.
    ///
    /// Fails if the position is out of bounds or already occupied.
    pub fn insert(&mut self, cell: Cell) -> Result<()> {
        if !self.in_bounds(cell.position) {
            return Err(GridError::OutOfBounds {
                position: cell.position,
                width: self.width,
                height: self.height,
            });
        }
        match self.cells.entry(cell.position) {
            Entry::Occupied(_) => Err(GridError::DuplicateCell(cell.position)),
            Entry::Vacant(slot) => {
                slot.insert(cell);
                Ok(())
            }
        }
    }

    /// The cell at `position`, if any.
    pub fn get(&self, position: Position) -> Option<&Cell> {
        self.cells.get(&position)
    }

    /// Remove and return the cell at `position`.
    pub fn remove(&mut self, position: Position) -> Option<Cell> {
        self.cells.remove(&position)
    }

    /// Mark `position` as a drag spot. Marking twice is a no-op.
    pub fn add_drag_spot(&mut self, position: Position) -> Result<()> {
        if !self.in_bounds(position) {
            return Err(GridError::OutOfBounds {
                position,
                width: self.width,
                height: self.height,
            });
        }
        self.drag_spots.insert(position);
        Ok(())
    }

    /// Whether `position` is a drag spot.
    pub fn is_drag_spot(&self, position: Position) -> bool {
        self.drag_spots.contains(&position)
    }

    /// Number of cells on the grid.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of drag spots on the grid.
    pub fn drag_spot_count(&self) -> usize {
        self.drag_spots.len()
    }

    /// Whether the grid holds no cells and no drag spots.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.drag_spots.is_empty()
    }

    /// Cells in raster order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Drag spots in raster order.
    pub fn drag_spots(&self) -> impl Iterator<Item = Position> + '_ {
        self.drag_spots.iter().copied()
    }
}

/// Each cell carries its own position, so the map round-trips through
/// a plain list.
mod cells_as_list {
    use super::{Cell, Position};
    use serde::de::{Deserialize, Deserializer};
    use serde::ser::{SerializeSeq, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S>(
        cells: &BTreeMap<Position, Cell>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(cells.len()))?;
        for cell in cells.values() {
            seq.serialize_element(cell)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<Position, Cell>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cells = Vec::<Cell>::deserialize(deserializer)?;
        Ok(cells.into_iter().map(|cell| (cell.position, cell)).collect())
    }
}
