//! The run-length level format ("ByteMash").
//!
//! Cells serialize as maximal runs over a row-major scan of the grid,
//! so large uniform regions cost two or three bytes. Both wire forms
//! open with the literal marker `|ByteMash|`; the text form is the
//! marker again followed by base64 of the complete byte form.
//!
//! # Body Layout
//!
//! ```text
//! ┌─────────────┬───────┬──────┬────────────┬─────────────┬────────────┬─────────────┬──────┬──────┐
//! │ marker (10) │ flags │ name │ depend_mod │ description │ width: u16 │ height: u16 │ runs │ 0x00 │
//! └─────────────┴───────┴──────┴────────────┴─────────────┴────────────┴─────────────┴──────┴──────┘
//! ```
//!
//! # Flags Byte
//!
//! ```text
//! bit  7    vault
//! bits 6-2  metadata revision (always 0 so far)
//! bits 1-0  type precision mode: 00 narrow, 01 wide
//! ```
//!
//! # Run Header Byte
//!
//! ```text
//! bits 7-6  run kind: 10 cell, 01 blank, 00 terminator
//! bits 5-4  direction ordinal (cell runs)
//! bit  3    type id is u16 instead of u8 (cell runs)
//! bit  2    run length is u16 instead of u8
//! bit  1    run length is 1 and no length field follows
//! bit  0    every position in the run is a drag spot
//! ```
//!
//! A cell run header is followed by the type id and, unless bit 1 is
//! set, the length; a blank run carries only the optional length. The
//! type width is chosen once per level and applies to every run. Runs
//! longer than 65535 split into consecutive chunks that the decoder
//! reassembles by continuing the raster walk. A trailing blank run
//! with no drag spots is omitted entirely, so a fully blank level is
//! just metadata and the terminator.

use crate::binary::{self, WireError};
use crate::error::{CodecError, Result};
use crate::format::{EncodedLevel, LevelFormat};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cellmash_core::{
    Cell, CellGrid, DecodeResult, Direction, Level, Position, MAX_GRID_AREA, MAX_STRING_LEN,
};
use std::collections::BTreeSet;
use std::io::Cursor;

/// Marker prefixing both wire forms: raw ASCII in bytes, literal text
/// in front of the base64 token.
pub const MASH_MARKER: &str = "|ByteMash|";

const NAME: &str = "ByteMash";

// Metadata flags byte.
const FLAG_VAULT: u8 = 0b1000_0000;
const REVISION_MASK: u8 = 0b0111_1100;
const REVISION_SHIFT: u8 = 2;
const REVISION: u8 = 0;
const TYPE_MODE_WIDE: u8 = 0b0000_0001;

// Run header byte.
const RUN_KIND_MASK: u8 = 0b1100_0000;
const RUN_CELL: u8 = 0b1000_0000;
const RUN_BLANK: u8 = 0b0100_0000;
const RUN_DIRECTION_MASK: u8 = 0b0011_0000;
const RUN_DIRECTION_SHIFT: u8 = 4;
const RUN_WIDE_TYPE: u8 = 0b0000_1000;
const RUN_WIDE_LENGTH: u8 = 0b0000_0100;
const RUN_SINGLE: u8 = 0b0000_0010;
const RUN_DRAG_SPOT: u8 = 0b0000_0001;

/// End of the run stream. Unambiguous because every run header sets a
/// kind bit.
const RUN_TERMINATOR: u8 = 0x00;

/// Distinct-type count beyond which type ids are written wide even if
/// every id fits a byte.
const NARROW_TYPE_LIMIT: usize = 64;

/// Width of the per-run type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldWidth {
    /// One byte.
    Narrow,
    /// Two bytes, little-endian.
    Wide,
}

/// The run-length codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct MashCodec;

impl LevelFormat for MashCodec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn matches_bytes(&self, data: &[u8]) -> bool {
        data.starts_with(MASH_MARKER.as_bytes())
    }

    fn matches_text(&self, token: &str) -> bool {
        token.starts_with(MASH_MARKER)
    }

    fn decode_bytes(&self, data: &[u8]) -> Result<DecodeResult> {
        decode(data)
    }

    fn decode_text(&self, token: &str) -> Result<DecodeResult> {
        let encoded = token
            .strip_prefix(MASH_MARKER)
            .ok_or_else(|| CodecError::malformed(NAME, "missing |ByteMash| marker"))?;
        let bytes = STANDARD.decode(encoded).map_err(|error| CodecError::InvalidText {
            format: NAME,
            detail: error.to_string(),
        })?;
        decode(&bytes)
    }

    fn encode_level(&self, level: &Level) -> Result<EncodedLevel> {
        encode(level)
    }
}

/// One maximal run in the raster scan. `occupant` is `None` for blank
/// stretches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    occupant: Option<(u32, Direction)>,
    drag_spot: bool,
    length: u64,
}

fn encode(level: &Level) -> Result<EncodedLevel> {
    let grid = level.grid();
    let props = level.properties();

    if grid.width() > i32::from(u16::MAX) || grid.height() > i32::from(u16::MAX) {
        return Err(CodecError::cannot_encode(
            NAME,
            format!(
                "dimensions {}x{} exceed 65535",
                grid.width(),
                grid.height()
            ),
        ));
    }
    if grid.area() > MAX_GRID_AREA {
        return Err(CodecError::cannot_encode(
            NAME,
            format!("grid area {} exceeds {}", grid.area(), MAX_GRID_AREA),
        ));
    }
    let width = grid.width() as u16;
    let height = grid.height() as u16;

    let mut distinct_types = BTreeSet::new();
    let mut max_type: u32 = 0;
    for cell in grid.cells() {
        distinct_types.insert(cell.cell_type);
        max_type = max_type.max(cell.cell_type);
    }
    if max_type > u32::from(u16::MAX) {
        return Err(CodecError::cannot_encode(
            NAME,
            format!("cell type {} does not fit in 16 bits", max_type),
        ));
    }
    let type_width = if distinct_types.len() > NARROW_TYPE_LIMIT || max_type > u32::from(u8::MAX) {
        FieldWidth::Wide
    } else {
        FieldWidth::Narrow
    };

    for (field, value) in [
        ("name", &props.name),
        ("depend_mod", &props.depend_mod),
        ("description", &props.description),
    ] {
        binary::validate_string(value).map_err(|_| {
            CodecError::cannot_encode(
                NAME,
                format!("the {} field exceeds {} bytes", field, MAX_STRING_LEN),
            )
        })?;
    }

    let mut bytes = Vec::with_capacity(64 + grid.cell_count() * 3);
    bytes.extend_from_slice(MASH_MARKER.as_bytes());
    let mut flags = REVISION << REVISION_SHIFT;
    if props.vault {
        flags |= FLAG_VAULT;
    }
    if type_width == FieldWidth::Wide {
        flags |= TYPE_MODE_WIDE;
    }
    bytes.push(flags);
    binary::push_string(&mut bytes, &props.name);
    binary::push_string(&mut bytes, &props.depend_mod);
    binary::push_string(&mut bytes, &props.description);
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    for run in collect_runs(grid) {
        push_run(&mut bytes, &run, type_width);
    }
    bytes.push(RUN_TERMINATOR);

    let text = format!("{}{}", MASH_MARKER, STANDARD.encode(&bytes));
    Ok(EncodedLevel { bytes, text })
}

/// Walk the raster and fold identical consecutive samples into runs.
///
/// A sample is the (occupant, drag spot) pair, so a drag spot breaks a
/// run of otherwise identical cells. The trailing blank stretch is
/// dropped when it carries no drag spots; the decoder infers it from
/// the dimensions.
fn collect_runs(grid: &CellGrid) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let width = grid.width() as u32;
    let mut current: Option<Run> = None;
    for index in 0..grid.area() {
        let position = Position::from_raster_index(index, width);
        let occupant = grid
            .get(position)
            .map(|cell| (cell.cell_type, cell.direction));
        let drag_spot = grid.is_drag_spot(position);
        match current.as_mut() {
            Some(run) if run.occupant == occupant && run.drag_spot == drag_spot => {
                run.length += 1;
            }
            _ => {
                if let Some(done) = current.take() {
                    runs.push(done);
                }
                current = Some(Run {
                    occupant,
                    drag_spot,
                    length: 1,
                });
            }
        }
    }
    if let Some(done) = current {
        if done.occupant.is_some() || done.drag_spot {
            runs.push(done);
        }
    }
    runs
}

/// Serialize one run, splitting lengths above 65535 into chunks.
///
/// Type ids were validated against the chosen width before the scan.
fn push_run(out: &mut Vec<u8>, run: &Run, type_width: FieldWidth) {
    let mut remaining = run.length;
    while remaining > 0 {
        let chunk = remaining.min(u64::from(u16::MAX));
        remaining -= chunk;

        let mut header = match run.occupant {
            Some((_, direction)) => {
                let mut header = RUN_CELL | (direction.ordinal() << RUN_DIRECTION_SHIFT);
                if type_width == FieldWidth::Wide {
                    header |= RUN_WIDE_TYPE;
                }
                header
            }
            None => RUN_BLANK,
        };
        if chunk == 1 {
            header |= RUN_SINGLE;
        } else if chunk > u64::from(u8::MAX) {
            header |= RUN_WIDE_LENGTH;
        }
        if run.drag_spot {
            header |= RUN_DRAG_SPOT;
        }
        out.push(header);

        if let Some((cell_type, _)) = run.occupant {
            match type_width {
                FieldWidth::Wide => out.extend_from_slice(&(cell_type as u16).to_le_bytes()),
                FieldWidth::Narrow => out.push(cell_type as u8),
            }
        }
        if chunk > 1 {
            if chunk > u64::from(u8::MAX) {
                out.extend_from_slice(&(chunk as u16).to_le_bytes());
            } else {
                out.push(chunk as u8);
            }
        }
    }
}

fn decode(data: &[u8]) -> Result<DecodeResult> {
    let body = data
        .strip_prefix(MASH_MARKER.as_bytes())
        .ok_or_else(|| CodecError::malformed(NAME, "missing |ByteMash| marker"))?;
    let mut cursor = Cursor::new(body);
    let wire = |error: WireError| CodecError::wire(NAME, error);

    let flags = binary::read_u8(&mut cursor).map_err(wire)?;
    let vault = flags & FLAG_VAULT != 0;
    // Revision and type mode are advisory; the run headers carry the
    // authoritative field widths.
    let _revision = (flags & REVISION_MASK) >> REVISION_SHIFT;
    let name = binary::read_string(&mut cursor).map_err(wire)?;
    let depend_mod = binary::read_string(&mut cursor).map_err(wire)?;
    let description = binary::read_string(&mut cursor).map_err(wire)?;
    let width = binary::read_u16_le(&mut cursor).map_err(wire)?;
    let height = binary::read_u16_le(&mut cursor).map_err(wire)?;
    let area = u64::from(width) * u64::from(height);
    if area > MAX_GRID_AREA {
        return Err(CodecError::OversizedField {
            format: NAME,
            field: "grid area",
            declared: area,
            limit: MAX_GRID_AREA,
        });
    }

    let mut cells = Vec::new();
    let mut drag_spots = Vec::new();
    let mut index: u64 = 0;
    loop {
        let header = binary::read_u8(&mut cursor).map_err(wire)?;
        if header == RUN_TERMINATOR {
            break;
        }
        let occupant = match header & RUN_KIND_MASK {
            RUN_CELL => {
                let ordinal = (header & RUN_DIRECTION_MASK) >> RUN_DIRECTION_SHIFT;
                let direction = Direction::from_ordinal(ordinal)
                    .ok_or_else(|| CodecError::malformed(NAME, "run direction out of range"))?;
                let cell_type = if header & RUN_WIDE_TYPE != 0 {
                    u32::from(binary::read_u16_le(&mut cursor).map_err(wire)?)
                } else {
                    u32::from(binary::read_u8(&mut cursor).map_err(wire)?)
                };
                Some((cell_type, direction))
            }
            RUN_BLANK => None,
            _ => {
                return Err(CodecError::malformed(
                    NAME,
                    format!("invalid run header byte 0x{:02x}", header),
                ));
            }
        };
        let length = if header & RUN_SINGLE != 0 {
            1
        } else if header & RUN_WIDE_LENGTH != 0 {
            u64::from(binary::read_u16_le(&mut cursor).map_err(wire)?)
        } else {
            u64::from(binary::read_u8(&mut cursor).map_err(wire)?)
        };
        if index + length > area {
            return Err(CodecError::OversizedField {
                format: NAME,
                field: "run length",
                declared: length,
                limit: area - index,
            });
        }
        let drag_spot = header & RUN_DRAG_SPOT != 0;
        if let Some((cell_type, direction)) = occupant {
            for offset in index..index + length {
                let position = Position::from_raster_index(offset, u32::from(width));
                cells.push(Cell::new(cell_type, position, direction));
                if drag_spot {
                    drag_spots.push(position);
                }
            }
        } else if drag_spot {
            for offset in index..index + length {
                drag_spots.push(Position::from_raster_index(offset, u32::from(width)));
            }
        }
        index += length;
    }

    Ok(DecodeResult {
        name,
        description,
        depend_mod,
        width: i32::from(width),
        height: i32::from(height),
        vault,
        cells,
        drag_spots,
    })
}
