//! The oldest token format, kept as a named placeholder.
//!
//! No reliable description of the V3 byte layout survives, so this
//! codec refuses everything rather than guess: the probe never
//! matches and decode or encode return
//! [`CodecError::UnsupportedFormat`]. It stays in the format list so
//! the name is reserved and callers get a stable error instead of a
//! generic unrecognized-token failure if they select it directly.

use crate::error::{CodecError, Result};
use crate::format::{EncodedLevel, LevelFormat};
use cellmash_core::{DecodeResult, Level};

const NAME: &str = "LegacyV3";

/// Placeholder codec for the unrecovered V3 layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyV3Codec;

impl LevelFormat for LegacyV3Codec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn matches_bytes(&self, _data: &[u8]) -> bool {
        false
    }

    fn matches_text(&self, _token: &str) -> bool {
        false
    }

    fn decode_bytes(&self, _data: &[u8]) -> Result<DecodeResult> {
        Err(CodecError::UnsupportedFormat(NAME))
    }

    fn decode_text(&self, _token: &str) -> Result<DecodeResult> {
        Err(CodecError::UnsupportedFormat(NAME))
    }

    fn encode_level(&self, _level: &Level) -> Result<EncodedLevel> {
        Err(CodecError::UnsupportedFormat(NAME))
    }
}
