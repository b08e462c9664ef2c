//! Flat decode output.

use crate::error::Result;
use crate::grid::CellGrid;
use crate::level::Level;
use crate::properties::LevelProperties;
use crate::types::{Cell, Position};
use serde::{Deserialize, Serialize};

/// What a decoder produces: metadata fields plus flat cell and drag
/// spot lists, before any grid invariants are enforced.
///
/// Decoders emit exactly what the token says. Converting to a [`Level`]
/// via [`DecodeResult::to_level`] is where duplicate cells and
/// out-of-bounds positions get rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeResult {
    /// Level name.
    pub name: String,
    /// Level description.
    pub description: String,
    /// Mod dependency identifier, empty for none.
    pub depend_mod: String,
    /// Grid width in cells.
    pub width: i32,
    /// Grid height in cells.
    pub height: i32,
    /// Vault flag.
    pub vault: bool,
    /// Decoded cells in token order.
    pub cells: Vec<Cell>,
    /// Decoded drag spots in token order.
    pub drag_spots: Vec<Position>,
}

impl DecodeResult {
    /// Number of decoded cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Rebuild a [`Level`] from the decoded data.
    ///
    /// Fails if the token carried duplicate cells, positions outside
    /// the declared dimensions, or negative dimensions.
    pub fn to_level(&self) -> Result<Level> {
        let mut grid = CellGrid::new(self.width, self.height)?;
        for cell in &self.cells {
            grid.insert(*cell)?;
        }
        for &spot in &self.drag_spots {
            grid.add_drag_spot(spot)?;
        }
        let mut properties = LevelProperties::new(self.width, self.height);
        properties.name = self.name.clone();
        properties.description = self.description.clone();
        properties.depend_mod = self.depend_mod.clone();
        properties.vault = self.vault;
        Ok(Level::new(properties, grid))
    }

    /// Crop to the cell bounding box plus `margin` cells on every side.
    ///
    /// Positions are rebased to the new origin and the crop rectangle
    /// is clamped to the original bounds. Drag spots that fall outside
    /// the crop are dropped so every surviving position stays in
    /// bounds. A result with no cells, or with negative dimensions, is
    /// returned unchanged.
    pub fn crop_to_content(&self, margin: i32) -> DecodeResult {
        if self.cells.is_empty() || self.width < 0 || self.height < 0 {
            return self.clone();
        }
        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        for cell in &self.cells {
            min_x = min_x.min(cell.position.x);
            min_y = min_y.min(cell.position.y);
            max_x = max_x.max(cell.position.x);
            max_y = max_y.max(cell.position.y);
        }
        // Exclusive upper corner, clamped to the original rectangle.
        let min_x = min_x.saturating_sub(margin).clamp(0, self.width);
        let min_y = min_y.saturating_sub(margin).clamp(0, self.height);
        let max_x = max_x
            .saturating_add(margin)
            .saturating_add(1)
            .clamp(min_x, self.width);
        let max_y = max_y
            .saturating_add(margin)
            .saturating_add(1)
            .clamp(min_y, self.height);

        let inside = |position: Position| {
            position.x >= min_x && position.x < max_x && position.y >= min_y && position.y < max_y
        };
        let rebase = |position: Position| Position::new(position.x - min_x, position.y - min_y);

        DecodeResult {
            name: self.name.clone(),
            description: self.description.clone(),
            depend_mod: self.depend_mod.clone(),
            width: max_x - min_x,
            height: max_y - min_y,
            vault: self.vault,
            cells: self
                .cells
                .iter()
                .filter(|cell| inside(cell.position))
                .map(|cell| Cell::new(cell.cell_type, rebase(cell.position), cell.direction))
                .collect(),
            drag_spots: self
                .drag_spots
                .iter()
                .copied()
                .filter(|&spot| inside(spot))
                .map(rebase)
                .collect(),
        }
    }
}
