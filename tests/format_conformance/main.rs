//! Format Conformance Test Suite
//!
//! End-to-end checks of the token formats through the public facade.
//!
//! - **Round trips**: each format reproduces a level exactly within
//!   its own limits, in both byte and text transport.
//! - **Boundaries**: the wire-layout switch points (run lengths, type
//!   widths, grid area caps).
//! - **Fallback**: detection order, decode fallback across formats,
//!   terminal failure.
//! - **Properties**: randomized conversion and crop invariants over
//!   generated levels.
//! - **Scenarios**: concrete byte-level walks of known tokens, plus
//!   degenerate levels.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test format_conformance
//!
//! # Only the boundary cases
//! cargo test --test format_conformance boundary
//! ```

mod boundaries;
mod fallback;
mod scenarios;
