//! The grouped legacy format ("B2").
//!
//! Cells are stored grouped by type, then by direction, with absolute
//! positions per cell. Verbose next to the run-length format, but old
//! tokens in the wild are mostly this.
//!
//! # Body Layout
//!
//! ```text
//! ┌────────────┬─────────────┬──────────┬──────────┬────────────┬───────┐
//! │ depend_mod │ mod version │ tag "B2" │ metadata │ drag spots │ cells │
//! └────────────┴─────────────┴──────────┴──────────┴────────────┴───────┘
//!
//! Drag spots:
//!   count: i32, then (x: i32, y: i32) per spot
//!
//! Cells:
//!   type count: i16
//!   per type:  type id: i16, direction group count: u8
//!   per group: direction ordinal: u8, cell count: i32,
//!              then (x: i16, y: i16) per cell
//! ```
//!
//! The mod version string is written as "N/A" and ignored on read. The
//! metadata block is the shared one from [`properties`](crate::properties),
//! vault byte included because the tag is `B2`; a body carrying an
//! older tag decodes without the vault byte. The text form is plain
//! base64 with no marker, so detection reads the first three strings
//! and checks the third against the tag.
//!
//! Encode order is type id ascending, then direction ordinal, then
//! raster position: equal levels produce equal bytes.

use crate::binary::{self, WireError};
use crate::error::{CodecError, Result};
use crate::format::{EncodedLevel, LevelFormat};
use crate::properties;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cellmash_core::{Cell, DecodeResult, Direction, Level, Position, MAX_GRID_AREA, MAX_STRING_LEN};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;

/// Format tag written as the third header string.
pub const BETA_FORMAT_TAG: &str = "B2";

const NAME: &str = "Beta";

/// Written where much older tooling stored a separate mod version.
const MOD_VERSION_PLACEHOLDER: &str = "N/A";

/// The grouped legacy codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct BetaCodec;

impl LevelFormat for BetaCodec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn matches_bytes(&self, data: &[u8]) -> bool {
        read_tag(data)
            .map(|tag| tag == BETA_FORMAT_TAG)
            .unwrap_or(false)
    }

    fn matches_text(&self, token: &str) -> bool {
        STANDARD
            .decode(token)
            .map(|bytes| self.matches_bytes(&bytes))
            .unwrap_or(false)
    }

    fn decode_bytes(&self, data: &[u8]) -> Result<DecodeResult> {
        decode(data)
    }

    fn decode_text(&self, token: &str) -> Result<DecodeResult> {
        let bytes = STANDARD.decode(token).map_err(|error| CodecError::InvalidText {
            format: NAME,
            detail: error.to_string(),
        })?;
        decode(&bytes)
    }

    fn encode_level(&self, level: &Level) -> Result<EncodedLevel> {
        encode(level)
    }
}

/// Skip the two header strings and return the format tag.
fn read_tag(data: &[u8]) -> std::result::Result<String, WireError> {
    let mut cursor = Cursor::new(data);
    binary::read_string(&mut cursor)?;
    binary::read_string(&mut cursor)?;
    binary::read_string(&mut cursor)
}

fn decode(data: &[u8]) -> Result<DecodeResult> {
    let mut cursor = Cursor::new(data);
    let wire = |error: WireError| CodecError::wire(NAME, error);

    let depend_mod = binary::read_string(&mut cursor).map_err(wire)?;
    let _mod_version = binary::read_string(&mut cursor).map_err(wire)?;
    let tag = binary::read_string(&mut cursor).map_err(wire)?;

    let props = properties::read_properties(&mut cursor, &tag).map_err(wire)?;
    if props.width < 0 || props.height < 0 {
        return Err(CodecError::malformed(
            NAME,
            format!("negative dimensions {}x{}", props.width, props.height),
        ));
    }
    let area = props.width as u64 * props.height as u64;
    if area > MAX_GRID_AREA {
        return Err(CodecError::OversizedField {
            format: NAME,
            field: "grid area",
            declared: area,
            limit: MAX_GRID_AREA,
        });
    }

    let drag_spots = read_drag_spots(&mut cursor)?;
    let cells = read_cells(&mut cursor)?;

    Ok(DecodeResult {
        name: props.name,
        description: props.description,
        // The outer header string wins, as the historical reader did.
        depend_mod,
        width: props.width,
        height: props.height,
        vault: props.vault,
        cells,
        drag_spots,
    })
}

/// Refuse a declared element count that cannot fit in the remaining
/// bytes, before allocating for it.
fn ensure_counted(
    cursor: &Cursor<&[u8]>,
    count: u64,
    element_size: u64,
    field: &'static str,
) -> Result<()> {
    let remaining = (cursor.get_ref().len() as u64).saturating_sub(cursor.position());
    match count.checked_mul(element_size) {
        Some(needed) if needed <= remaining => Ok(()),
        _ => Err(CodecError::OversizedField {
            format: NAME,
            field,
            declared: count,
            limit: remaining / element_size,
        }),
    }
}

fn read_drag_spots(cursor: &mut Cursor<&[u8]>) -> Result<Vec<Position>> {
    let wire = |error: WireError| CodecError::wire(NAME, error);
    let count = binary::read_i32_le(cursor).map_err(wire)?;
    if count < 0 {
        return Err(CodecError::malformed(NAME, "negative drag spot count"));
    }
    ensure_counted(cursor, count as u64, 8, "drag spot count")?;
    let mut spots = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let x = binary::read_i32_le(cursor).map_err(wire)?;
        let y = binary::read_i32_le(cursor).map_err(wire)?;
        spots.push(Position::new(x, y));
    }
    Ok(spots)
}

fn read_cells(cursor: &mut Cursor<&[u8]>) -> Result<Vec<Cell>> {
    let wire = |error: WireError| CodecError::wire(NAME, error);
    let type_count = binary::read_i16_le(cursor).map_err(wire)?;
    if type_count < 0 {
        return Err(CodecError::malformed(NAME, "negative cell type count"));
    }
    // A type group is at least a type id and a direction count.
    ensure_counted(cursor, type_count as u64, 3, "cell type count")?;

    let mut cells = Vec::new();
    for _ in 0..type_count {
        let type_id = binary::read_i16_le(cursor).map_err(wire)?;
        if type_id < 0 {
            return Err(CodecError::malformed(
                NAME,
                format!("negative cell type {}", type_id),
            ));
        }
        let group_count = binary::read_u8(cursor).map_err(wire)?;
        if group_count > 4 {
            return Err(CodecError::malformed(
                NAME,
                format!("{} direction groups for one type", group_count),
            ));
        }
        for _ in 0..group_count {
            let ordinal = binary::read_u8(cursor).map_err(wire)?;
            let direction = Direction::from_ordinal(ordinal).ok_or_else(|| {
                CodecError::malformed(NAME, format!("direction ordinal {} out of range", ordinal))
            })?;
            let count = binary::read_i32_le(cursor).map_err(wire)?;
            if count < 0 {
                return Err(CodecError::malformed(NAME, "negative cell count"));
            }
            ensure_counted(cursor, count as u64, 4, "cell count")?;
            cells.reserve(count as usize);
            for _ in 0..count {
                let x = binary::read_i16_le(cursor).map_err(wire)?;
                let y = binary::read_i16_le(cursor).map_err(wire)?;
                cells.push(Cell::new(
                    type_id as u32,
                    Position::new(i32::from(x), i32::from(y)),
                    direction,
                ));
            }
        }
    }
    Ok(cells)
}

fn encode(level: &Level) -> Result<EncodedLevel> {
    let grid = level.grid();
    let props = level.properties();

    if grid.area() > MAX_GRID_AREA {
        return Err(CodecError::cannot_encode(
            NAME,
            format!("grid area {} exceeds {}", grid.area(), MAX_GRID_AREA),
        ));
    }

    let mut groups: BTreeMap<u32, Vec<&Cell>> = BTreeMap::new();
    for cell in grid.cells() {
        if cell.cell_type > i16::MAX as u32 {
            return Err(CodecError::cannot_encode(
                NAME,
                format!("cell type {} does not fit in 16 bits", cell.cell_type),
            ));
        }
        if cell.position.x > i32::from(i16::MAX) || cell.position.y > i32::from(i16::MAX) {
            return Err(CodecError::cannot_encode(
                NAME,
                format!("position {} does not fit in 16 bits", cell.position),
            ));
        }
        groups.entry(cell.cell_type).or_default().push(cell);
    }
    if groups.len() > i16::MAX as usize {
        return Err(CodecError::cannot_encode(
            NAME,
            "more than 32767 distinct cell types",
        ));
    }
    binary::validate_string(&props.depend_mod).map_err(|_| {
        CodecError::cannot_encode(
            NAME,
            format!("the depend_mod field exceeds {} bytes", MAX_STRING_LEN),
        )
    })?;

    let mut bytes = Vec::new();
    binary::push_string(&mut bytes, &props.depend_mod);
    binary::push_string(&mut bytes, MOD_VERSION_PLACEHOLDER);
    binary::push_string(&mut bytes, BETA_FORMAT_TAG);

    // Historical writers never stored an author in this block.
    let mut meta = props.clone();
    meta.author = String::new();
    properties::push_properties(&mut bytes, &meta, BETA_FORMAT_TAG, NAME)?;

    bytes.extend_from_slice(&(grid.drag_spot_count() as i32).to_le_bytes());
    for spot in grid.drag_spots() {
        bytes.extend_from_slice(&spot.x.to_le_bytes());
        bytes.extend_from_slice(&spot.y.to_le_bytes());
    }

    bytes.extend_from_slice(&(groups.len() as i16).to_le_bytes());
    for (type_id, members) in &groups {
        bytes.extend_from_slice(&(*type_id as i16).to_le_bytes());
        let distinct_directions: BTreeSet<Direction> =
            members.iter().map(|cell| cell.direction).collect();
        bytes.push(distinct_directions.len() as u8);
        for direction in Direction::ALL {
            let count = members
                .iter()
                .filter(|cell| cell.direction == direction)
                .count();
            if count == 0 {
                continue;
            }
            bytes.push(direction.ordinal());
            bytes.extend_from_slice(&(count as i32).to_le_bytes());
            for cell in members.iter().filter(|cell| cell.direction == direction) {
                bytes.extend_from_slice(&(cell.position.x as i16).to_le_bytes());
                bytes.extend_from_slice(&(cell.position.y as i16).to_le_bytes());
            }
        }
    }

    let text = STANDARD.encode(&bytes);
    Ok(EncodedLevel { bytes, text })
}
