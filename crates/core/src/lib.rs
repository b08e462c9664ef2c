//! Core data model for cell-grid puzzle levels.
//!
//! This crate defines the types every level format decodes into and
//! encodes from:
//! - [`Direction`]: four-way cell facing with frozen wire ordinals
//! - [`Position`], [`Cell`]: grid coordinates and occupants
//! - [`CellGrid`]: bounds-checked sparse grid plus drag spots
//! - [`LevelProperties`], [`Level`]: metadata and the complete level
//! - [`DecodeResult`]: flat decoder output, convertible to a [`Level`]
//! - [`MAX_GRID_AREA`], [`MAX_STRING_LEN`]: decode-side resource limits

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod direction;
pub mod error;
pub mod grid;
pub mod level;
pub mod limits;
pub mod properties;
pub mod result;
pub mod types;

pub use direction::Direction;
pub use error::{GridError, Result};
pub use grid::CellGrid;
pub use level::Level;
pub use limits::{MAX_GRID_AREA, MAX_STRING_LEN};
pub use properties::LevelProperties;
pub use result::DecodeResult;
pub use types::{Cell, Position};
