//! Cellmash - token codecs for cell-grid puzzle levels
//!
//! A level is a rectangular grid of typed, directional cells plus
//! metadata and a set of drag-spot positions. Levels travel between
//! players as compact binary tokens, usually base64 text. Several
//! incompatible token layouts accumulated over the years; this crate
//! decodes all of them behind one detection front door and encodes
//! through whichever format the caller picks.
//!
//! # Quick Start
//!
//! ```
//! use cellmash::{Cell, CellGrid, Direction, Format, FormatDispatcher,
//!                Level, LevelFormat, LevelProperties, Position};
//!
//! // Build a level.
//! let mut grid = CellGrid::new(10, 10).unwrap();
//! grid.insert(Cell::new(2, Position::new(4, 4), Direction::East)).unwrap();
//! grid.add_drag_spot(Position::new(0, 0)).unwrap();
//! let level = Level::new(LevelProperties::new(10, 10), grid);
//!
//! // Share it as text.
//! let token = Format::Mash.encode_level(&level).unwrap().text;
//!
//! // Decode any token without knowing its format.
//! let decoded = FormatDispatcher::default().decode_text(&token).unwrap();
//! assert_eq!(decoded.to_level().unwrap(), level);
//! ```
//!
//! # Architecture
//!
//! The data model lives in [`cellmash_core`] and the wire formats in
//! [`cellmash_codec`]; this crate re-exports the public surface of
//! both. Decoding goes through the [`FormatDispatcher`], which probes
//! format signatures in priority order and falls back across formats
//! when a matching signature hides a broken body.

pub use cellmash_codec::{
    BetaCodec, CodecError, EncodedLevel, Format, FormatDispatcher, LegacyV3Codec, LevelFormat,
    MashCodec, Result, BETA_FORMAT_TAG, MASH_MARKER,
};
pub use cellmash_core::{
    Cell, CellGrid, DecodeResult, Direction, GridError, Level, LevelProperties, Position,
    MAX_GRID_AREA, MAX_STRING_LEN,
};
