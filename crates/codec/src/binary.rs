//! Shared wire primitives.
//!
//! Historical tokens were written by a runtime that frames strings as a
//! 7-bit varint byte count followed by UTF-8 bytes, stores integers
//! little-endian, and booleans as one byte. These helpers keep that
//! framing and add the bounds checks the historical decoders lacked:
//! string lengths are capped before allocation, and truncated input is
//! an error rather than a panic.
//!
//! Decoding goes through a `Read` (in practice a `Cursor` over the
//! token); encoding appends to a plain `Vec<u8>` and cannot fail once
//! the inputs are validated.

use byteorder::{LittleEndian, ReadBytesExt};
use cellmash_core::MAX_STRING_LEN;
use std::io::Read;
use thiserror::Error;

/// Low-level wire failures. Each format wraps these with its own name
/// via `CodecError::wire`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Ran out of bytes mid-field.
    #[error("unexpected end of token")]
    Truncated,

    /// A varint ran past five bytes or overflowed 32 bits.
    #[error("varint does not fit in 32 bits")]
    VarintOverflow,

    /// A declared string length exceeds the cap.
    #[error("string length {declared} exceeds the {limit} byte cap")]
    StringTooLong {
        /// Declared byte length.
        declared: u64,
        /// The cap it exceeded.
        limit: u64,
    },

    /// String bytes are not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
}

/// Read one byte.
pub fn read_u8<R: Read>(reader: &mut R) -> Result<u8, WireError> {
    ReadBytesExt::read_u8(reader).map_err(|_| WireError::Truncated)
}

/// Read a little-endian u16.
pub fn read_u16_le<R: Read>(reader: &mut R) -> Result<u16, WireError> {
    reader
        .read_u16::<LittleEndian>()
        .map_err(|_| WireError::Truncated)
}

/// Read a little-endian i16.
pub fn read_i16_le<R: Read>(reader: &mut R) -> Result<i16, WireError> {
    reader
        .read_i16::<LittleEndian>()
        .map_err(|_| WireError::Truncated)
}

/// Read a little-endian i32.
pub fn read_i32_le<R: Read>(reader: &mut R) -> Result<i32, WireError> {
    reader
        .read_i32::<LittleEndian>()
        .map_err(|_| WireError::Truncated)
}

/// Read a little-endian i64.
pub fn read_i64_le<R: Read>(reader: &mut R) -> Result<i64, WireError> {
    reader
        .read_i64::<LittleEndian>()
        .map_err(|_| WireError::Truncated)
}

/// Read a one-byte boolean. Any nonzero byte is true.
pub fn read_bool<R: Read>(reader: &mut R) -> Result<bool, WireError> {
    Ok(read_u8(reader)? != 0)
}

/// Append a one-byte boolean.
pub fn push_bool(out: &mut Vec<u8>, value: bool) {
    out.push(u8::from(value));
}

/// Read a 7-bit varint (low group first) into a u32.
///
/// At most five bytes are consumed; a fifth byte may only carry the
/// low four payload bits.
pub fn read_varint<R: Read>(reader: &mut R) -> Result<u32, WireError> {
    let mut value: u32 = 0;
    let mut shift: u32 = 0;
    loop {
        let byte = read_u8(reader)?;
        if shift == 28 && byte & 0x70 != 0 {
            return Err(WireError::VarintOverflow);
        }
        value |= u32::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
        if shift > 28 {
            return Err(WireError::VarintOverflow);
        }
    }
}

/// Append `value` as a 7-bit varint, low group first.
pub fn push_varint(out: &mut Vec<u8>, mut value: u32) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Read a varint-framed UTF-8 string, capped at
/// [`MAX_STRING_LEN`](cellmash_core::MAX_STRING_LEN).
///
/// The cap is checked before the buffer is allocated, so a hostile
/// length prefix costs nothing.
pub fn read_string<R: Read>(reader: &mut R) -> Result<String, WireError> {
    let declared = read_varint(reader)? as usize;
    if declared > MAX_STRING_LEN {
        return Err(WireError::StringTooLong {
            declared: declared as u64,
            limit: MAX_STRING_LEN as u64,
        });
    }
    let mut buf = vec![0u8; declared];
    reader.read_exact(&mut buf).map_err(|_| WireError::Truncated)?;
    String::from_utf8(buf).map_err(|_| WireError::InvalidUtf8)
}

/// Append a varint-framed UTF-8 string.
///
/// Callers run [`validate_string`] first; the cap keeps the length
/// castable and guarantees the result decodes.
pub fn push_string(out: &mut Vec<u8>, value: &str) {
    debug_assert!(value.len() <= MAX_STRING_LEN);
    push_varint(out, value.len() as u32);
    out.extend_from_slice(value.as_bytes());
}

/// Check a string against the shared length cap before encoding it.
pub fn validate_string(value: &str) -> Result<(), WireError> {
    if value.len() > MAX_STRING_LEN {
        return Err(WireError::StringTooLong {
            declared: value.len() as u64,
            limit: MAX_STRING_LEN as u64,
        });
    }
    Ok(())
}
