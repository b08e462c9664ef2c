//! Error types for the level data model.

use crate::types::Position;
use thiserror::Error;

/// Result alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors from building or mutating a [`CellGrid`](crate::grid::CellGrid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A grid was requested with a negative dimension.
    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// A position lies outside the grid bounds.
    #[error("Position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },

    /// Two cells were placed on the same position.
    #[error("A cell already occupies {0}")]
    DuplicateCell(Position),
}
