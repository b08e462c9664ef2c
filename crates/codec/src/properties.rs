//! The shared metadata block.
//!
//! Grouped formats carry a full metadata block between their header
//! strings and the cell payload:
//!
//! ```text
//! ┌────────────┬─────────────┬──────┬─────────────┬────────┬─────────┬───────────┬────────────┬─────────┐
//! │ width: i32 │ height: i32 │ name │ description │ author │ version │ time: i64 │ depend_mod │ vault?  │
//! └────────────┴─────────────┴──────┴─────────────┴────────┴─────────┴───────────┴────────────┴─────────┘
//! ```
//!
//! Strings are varint-framed, integers little-endian. `time` is the
//! encode wall clock in UTC microseconds and is never read back into
//! the model. The trailing vault byte exists only in bodies whose
//! format tag is `"B2"`; earlier tags end after `depend_mod`, so the
//! decoder needs the tag the caller already read.

use crate::beta::BETA_FORMAT_TAG;
use crate::binary::{self, WireError};
use crate::error::{CodecError, Result};
use cellmash_core::{LevelProperties, MAX_STRING_LEN};
use chrono::Utc;
use std::io::Read;

/// Decode a metadata block from a body tagged `format_tag`.
pub fn read_properties<R: Read>(
    reader: &mut R,
    format_tag: &str,
) -> std::result::Result<LevelProperties, WireError> {
    let width = binary::read_i32_le(reader)?;
    let height = binary::read_i32_le(reader)?;
    let name = binary::read_string(reader)?;
    let description = binary::read_string(reader)?;
    let author = binary::read_string(reader)?;
    let version = binary::read_string(reader)?;
    let _time = binary::read_i64_le(reader)?;
    let depend_mod = binary::read_string(reader)?;
    let vault = format_tag == BETA_FORMAT_TAG && binary::read_bool(reader)?;
    Ok(LevelProperties {
        name,
        description,
        author,
        version,
        depend_mod,
        width,
        height,
        time: 0,
        vault,
    })
}

/// Encode a metadata block for a body tagged `format_tag`.
///
/// `format` names the calling codec for error attribution. Fails when
/// a metadata string exceeds the shared length cap.
pub fn push_properties(
    out: &mut Vec<u8>,
    props: &LevelProperties,
    format_tag: &str,
    format: &'static str,
) -> Result<()> {
    for (field, value) in [
        ("name", &props.name),
        ("description", &props.description),
        ("author", &props.author),
        ("version", &props.version),
        ("depend_mod", &props.depend_mod),
    ] {
        binary::validate_string(value).map_err(|_| {
            CodecError::cannot_encode(
                format,
                format!("the {} field exceeds {} bytes", field, MAX_STRING_LEN),
            )
        })?;
    }
    out.extend_from_slice(&props.width.to_le_bytes());
    out.extend_from_slice(&props.height.to_le_bytes());
    binary::push_string(out, &props.name);
    binary::push_string(out, &props.description);
    binary::push_string(out, &props.author);
    binary::push_string(out, &props.version);
    out.extend_from_slice(&Utc::now().timestamp_micros().to_le_bytes());
    binary::push_string(out, &props.depend_mod);
    if format_tag == BETA_FORMAT_TAG {
        binary::push_bool(out, props.vault);
    }
    Ok(())
}
