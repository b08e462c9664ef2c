//! Token codecs for cell-grid levels.
//!
//! A level travels as a self-describing binary token, usually wrapped
//! in base64 for copy-pasting. Three historical layouts exist:
//!
//! - **ByteMash** ([`MashCodec`]): the current run-length format,
//!   compact and marker-prefixed.
//! - **Beta** ([`BetaCodec`]): the grouped legacy format, verbose but
//!   still common in old tokens.
//! - **LegacyV3** ([`LegacyV3Codec`]): the oldest layout, recognized
//!   by name only; its byte layout was never recovered.
//!
//! [`FormatDispatcher`] auto-detects the format of an incoming token
//! and decodes with fallback, so callers never need to know which
//! era a token came from.
//!
//! # Quick Start
//!
//! ```
//! use cellmash_codec::{Format, FormatDispatcher, LevelFormat};
//! use cellmash_core::{Cell, CellGrid, Direction, Level, LevelProperties, Position};
//!
//! // Build a small level and encode it with the current format.
//! let mut grid = CellGrid::new(8, 8).unwrap();
//! grid.insert(Cell::new(2, Position::new(3, 3), Direction::East)).unwrap();
//! let level = Level::new(LevelProperties::new(8, 8), grid);
//! let encoded = Format::Mash.encode_level(&level).unwrap();
//!
//! // Any token, whatever its era, comes back through the dispatcher.
//! let dispatcher = FormatDispatcher::default();
//! let decoded = dispatcher.decode_text(&encoded.text).unwrap();
//! assert_eq!(decoded.to_level().unwrap(), level);
//! ```
//!
//! Tokens are untrusted input: every codec validates declared lengths
//! and counts against hard caps before allocating, and malformed
//! bodies surface as [`CodecError`] values rather than panics.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod beta;
pub mod binary;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod mash;
pub mod properties;
pub mod v3;

pub use beta::{BetaCodec, BETA_FORMAT_TAG};
pub use dispatcher::FormatDispatcher;
pub use error::{CodecError, Result};
pub use format::{EncodedLevel, Format, LevelFormat};
pub use mash::{MashCodec, MASH_MARKER};
pub use v3::LegacyV3Codec;
