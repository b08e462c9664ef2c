//! A complete level.

use crate::error::Result;
use crate::grid::CellGrid;
use crate::properties::LevelProperties;
use serde::{Deserialize, Serialize};

/// A level: metadata plus the populated grid.
///
/// Grid dimensions are authoritative. `new` mirrors them into the
/// properties, and encoders read dimensions from the grid, so the two
/// cannot drift apart on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    properties: LevelProperties,
    grid: CellGrid,
}

impl Level {
    /// Build a level from properties and a grid.
    pub fn new(mut properties: LevelProperties, grid: CellGrid) -> Level {
        properties.width = grid.width();
        properties.height = grid.height();
        Level { properties, grid }
    }

    /// An empty level with default metadata.
    pub fn empty(width: i32, height: i32) -> Result<Level> {
        let grid = CellGrid::new(width, height)?;
        Ok(Level::new(LevelProperties::new(width, height), grid))
    }

    /// Level metadata.
    pub fn properties(&self) -> &LevelProperties {
        &self.properties
    }

    /// Mutable metadata. Dimension edits made here are ignored by
    /// encoders, which read dimensions from the grid.
    pub fn properties_mut(&mut self) -> &mut LevelProperties {
        &mut self.properties
    }

    /// The grid.
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Mutable grid access.
    pub fn grid_mut(&mut self) -> &mut CellGrid {
        &mut self.grid
    }

    /// Grid width in cells.
    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    /// Grid height in cells.
    pub fn height(&self) -> i32 {
        self.grid.height()
    }
}
