//! Error types for the level token codecs.

use crate::binary::WireError;
use cellmash_core::GridError;
use thiserror::Error;

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors from decoding, encoding, or dispatching level tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The token body is structurally invalid for the format that was
    /// decoding it.
    #[error("{format}: malformed token: {detail}")]
    MalformedToken {
        /// Name of the format that was decoding.
        format: &'static str,
        /// What went wrong.
        detail: String,
    },

    /// No known format matched and decoded the token.
    #[error("Unrecognized level format")]
    UnrecognizedFormat,

    /// A declared length or dimension exceeds a decode limit or the
    /// remaining token bytes.
    #[error("{format}: {field} declares {declared}, limit is {limit}")]
    OversizedField {
        /// Name of the format that was decoding.
        format: &'static str,
        /// Which field carried the declaration.
        field: &'static str,
        /// The declared value.
        declared: u64,
        /// The largest acceptable value.
        limit: u64,
    },

    /// The level holds a value the target format cannot represent.
    #[error("{format}: cannot encode: {detail}")]
    EncodingConstraintViolation {
        /// Name of the format that was encoding.
        format: &'static str,
        /// Which value did not fit.
        detail: String,
    },

    /// The format exists in the dispatch table but its byte layout is
    /// not available.
    #[error("The {0} format is not supported")]
    UnsupportedFormat(&'static str),

    /// A text token is not valid base64.
    #[error("{format}: text token is not valid base64: {detail}")]
    InvalidText {
        /// Name of the format that was decoding.
        format: &'static str,
        /// The base64 decoder's complaint.
        detail: String,
    },

    /// The decoded data violates a grid invariant.
    #[error("Decoded level is invalid: {0}")]
    InvalidLevel(#[from] GridError),
}

impl CodecError {
    /// Malformed-token error attributed to `format`.
    pub fn malformed(format: &'static str, detail: impl Into<String>) -> CodecError {
        CodecError::MalformedToken {
            format,
            detail: detail.into(),
        }
    }

    /// Encoding-constraint error attributed to `format`.
    pub fn cannot_encode(format: &'static str, detail: impl Into<String>) -> CodecError {
        CodecError::EncodingConstraintViolation {
            format,
            detail: detail.into(),
        }
    }

    /// Attribute a wire-level failure to the format that hit it.
    pub(crate) fn wire(format: &'static str, error: WireError) -> CodecError {
        match error {
            WireError::StringTooLong { declared, limit } => CodecError::OversizedField {
                format,
                field: "string length",
                declared,
                limit,
            },
            other => CodecError::MalformedToken {
                format,
                detail: other.to_string(),
            },
        }
    }
}
