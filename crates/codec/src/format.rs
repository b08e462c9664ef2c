//! The codec seam shared by every token format.
//!
//! Each format implements [`LevelFormat`]: a cheap signature probe
//! plus full decode and encode in both byte and text form. The
//! [`Format`] enum lists the known formats in probe order and hands
//! out a static codec for each, so callers can dispatch without
//! allocating.

use crate::error::Result;
use cellmash_core::{DecodeResult, Level};
use std::fmt;

/// A level serialized by one codec, in both transports.
///
/// The text form is what players paste into chat or share pages; the
/// byte form is what files and network payloads carry. They hold the
/// same level and each codec defines how the two relate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedLevel {
    /// The raw binary token.
    pub bytes: Vec<u8>,
    /// The printable token.
    pub text: String,
}

/// One token format: signature probe, decode, encode.
///
/// `matches_*` is a cheap prefix or header probe, not a guarantee: a
/// token may match a signature and still fail to decode, which is why
/// [`FormatDispatcher`](crate::dispatcher::FormatDispatcher) keeps
/// probing later formats after a failed decode.
///
/// # Thread Safety
///
/// Codecs are stateless unit structs; the `Send + Sync` bound lets a
/// `&'static dyn LevelFormat` be shared freely across threads.
pub trait LevelFormat: Send + Sync {
    /// Short human-readable format name, used in errors and logs.
    fn name(&self) -> &'static str;

    /// Whether the binary token carries this format's signature.
    fn matches_bytes(&self, data: &[u8]) -> bool;

    /// Whether the printable token carries this format's signature.
    fn matches_text(&self, token: &str) -> bool;

    /// Decode a binary token into its raw content.
    fn decode_bytes(&self, data: &[u8]) -> Result<DecodeResult>;

    /// Decode a printable token into its raw content.
    fn decode_text(&self, token: &str) -> Result<DecodeResult>;

    /// Encode a level in both transports.
    fn encode_level(&self, level: &Level) -> Result<EncodedLevel>;
}

/// The known formats, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// The current run-length format.
    Mash,
    /// The grouped legacy format.
    Beta,
    /// The oldest format, recognized but not decodable.
    LegacyV3,
}

impl Format {
    /// Every format, in the order the dispatcher probes them.
    pub const ALL: [Format; 3] = [Format::Mash, Format::Beta, Format::LegacyV3];

    /// The codec for this format.
    pub fn codec(self) -> &'static dyn LevelFormat {
        match self {
            Format::Mash => &crate::mash::MashCodec,
            Format::Beta => &crate::beta::BetaCodec,
            Format::LegacyV3 => &crate::v3::LegacyV3Codec,
        }
    }
}

impl LevelFormat for Format {
    fn name(&self) -> &'static str {
        self.codec().name()
    }

    fn matches_bytes(&self, data: &[u8]) -> bool {
        self.codec().matches_bytes(data)
    }

    fn matches_text(&self, token: &str) -> bool {
        self.codec().matches_text(token)
    }

    fn decode_bytes(&self, data: &[u8]) -> Result<DecodeResult> {
        self.codec().decode_bytes(data)
    }

    fn decode_text(&self, token: &str) -> Result<DecodeResult> {
        self.codec().decode_text(token)
    }

    fn encode_level(&self, level: &Level) -> Result<EncodedLevel> {
        self.codec().encode_level(level)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
