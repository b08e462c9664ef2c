//! Decode-side resource limits.
//!
//! Level tokens arrive from untrusted sources (chat messages, shared
//! files), so every decoder validates declared sizes against these caps
//! before allocating. The caps are generous relative to anything an
//! editor produces; hitting one means the token is corrupt or hostile,
//! and the decode fails with an `OversizedField` error instead of
//! attempting the allocation.

/// Largest accepted `width * height` product for a decoded level.
pub const MAX_GRID_AREA: u64 = 2048 * 2048;

/// Largest accepted byte length for one length-prefixed string field.
///
/// Applies to names, descriptions, and the other metadata strings.
/// Encoders enforce the same cap so that anything encoded decodes.
pub const MAX_STRING_LEN: usize = 64 * 1024;
