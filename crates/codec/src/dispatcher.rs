//! Format auto-detection with decode fallback.
//!
//! A token arrives as opaque bytes or text. The dispatcher walks its
//! format list in order: formats whose signature probe rejects the
//! token are skipped, and a format whose probe matches but whose
//! decode then fails is logged and skipped too. The first successful
//! decode wins. Only when every format has passed does the dispatcher
//! report [`CodecError::UnrecognizedFormat`].
//!
//! The fallback step matters because signatures are cheap prefix
//! probes: a corrupted current-format token and a legacy token can
//! look alike for the first few bytes.

use crate::error::{CodecError, Result};
use crate::format::{EncodedLevel, Format, LevelFormat};
use cellmash_core::DecodeResult;
use tracing::{debug, warn};

/// Ordered, immutable list of formats to probe.
///
/// Construct with an explicit order via [`FormatDispatcher::new`] or
/// take the standard order via `Default`.
#[derive(Debug, Clone)]
pub struct FormatDispatcher {
    formats: Vec<Format>,
}

impl FormatDispatcher {
    /// A dispatcher probing `formats` in the given order.
    pub fn new(formats: Vec<Format>) -> Self {
        FormatDispatcher { formats }
    }

    /// The probe order.
    pub fn formats(&self) -> &[Format] {
        &self.formats
    }

    /// Detect and decode a binary token.
    pub fn decode_bytes(&self, data: &[u8]) -> Result<DecodeResult> {
        self.decode_with(
            |codec| codec.matches_bytes(data),
            |codec| codec.decode_bytes(data),
        )
    }

    /// Detect and decode a printable token.
    pub fn decode_text(&self, token: &str) -> Result<DecodeResult> {
        self.decode_with(
            |codec| codec.matches_text(token),
            |codec| codec.decode_text(token),
        )
    }

    /// Decode a binary token, then re-encode it through `target`.
    ///
    /// Metadata fields the target format does not store are dropped.
    pub fn transcode_bytes(&self, data: &[u8], target: Format) -> Result<EncodedLevel> {
        let level = self.decode_bytes(data)?.to_level()?;
        target.encode_level(&level)
    }

    /// Decode a printable token, then re-encode it through `target`.
    pub fn transcode_text(&self, token: &str, target: Format) -> Result<EncodedLevel> {
        let level = self.decode_text(token)?.to_level()?;
        target.encode_level(&level)
    }

    fn decode_with<M, D>(&self, matches: M, decode: D) -> Result<DecodeResult>
    where
        M: Fn(&'static dyn LevelFormat) -> bool,
        D: Fn(&'static dyn LevelFormat) -> Result<DecodeResult>,
    {
        for format in &self.formats {
            let codec = format.codec();
            if !matches(codec) {
                continue;
            }
            match decode(codec) {
                Ok(result) => {
                    debug!(
                        format = codec.name(),
                        cells = result.cell_count(),
                        "token decoded"
                    );
                    return Ok(result);
                }
                Err(error) => {
                    warn!(
                        format = codec.name(),
                        %error,
                        "signature matched but decode failed; trying next format"
                    );
                }
            }
        }
        Err(CodecError::UnrecognizedFormat)
    }
}

impl Default for FormatDispatcher {
    fn default() -> Self {
        FormatDispatcher::new(Format::ALL.to_vec())
    }
}
