//! Layout switch points: run lengths, type widths, size caps.

use cellmash::{
    Cell, CellGrid, CodecError, Direction, Format, FormatDispatcher, Level, LevelFormat,
    LevelProperties, Position,
};

/// A 256x257 grid whose first `length` raster positions hold the same
/// cell, so the encoder sees one maximal run.
fn run_level(length: u64) -> Level {
    let width = 256;
    let mut grid = CellGrid::new(width, 257).unwrap();
    for index in 0..length {
        grid.insert(Cell::new(
            1,
            Position::from_raster_index(index, width as u32),
            Direction::East,
        ))
        .unwrap();
    }
    Level::new(LevelProperties::new(width, 257), grid)
}

fn mash_size(length: u64) -> usize {
    Format::Mash
        .encode_level(&run_level(length))
        .unwrap()
        .bytes
        .len()
}

#[test]
fn test_run_length_boundaries_roundtrip() {
    let dispatcher = FormatDispatcher::default();
    for length in [1u64, 2, 255, 256, 65535, 65536] {
        let level = run_level(length);
        let encoded = Format::Mash.encode_level(&level).unwrap();
        let decoded = dispatcher.decode_bytes(&encoded.bytes).unwrap();
        assert_eq!(decoded.cells.len() as u64, length, "length {}", length);
        assert_eq!(
            decoded.cells.last().unwrap().position,
            Position::from_raster_index(length - 1, 256),
            "length {}",
            length
        );
        assert_eq!(decoded.to_level().unwrap(), level, "length {}", length);
    }
}

#[test]
fn test_run_length_boundaries_switch_layout() {
    // Length 1 omits the length field entirely.
    assert_eq!(mash_size(2), mash_size(1) + 1);
    // One length byte carries everything up to 255.
    assert_eq!(mash_size(255), mash_size(2));
    // 256 forces the 16-bit length field.
    assert_eq!(mash_size(256), mash_size(255) + 1);
    // Two length bytes carry everything up to 65535.
    assert_eq!(mash_size(65535), mash_size(256));
    // 65536 no longer fits one run; a second one-cell run follows.
    assert_eq!(mash_size(65536), mash_size(65535) + 2);
}

fn typed_row(distinct: u32) -> Level {
    let mut grid = CellGrid::new(65, 1).unwrap();
    for id in 0..distinct {
        grid.insert(Cell::new(
            id,
            Position::new(id as i32, 0),
            Direction::North,
        ))
        .unwrap();
    }
    Level::new(LevelProperties::new(65, 1), grid)
}

#[test]
fn test_type_width_switches_at_65_distinct_types() {
    let narrow = Format::Mash.encode_level(&typed_row(64)).unwrap();
    let wide = Format::Mash.encode_level(&typed_row(65)).unwrap();

    // 64 single-cell runs at 2 bytes each vs 65 at 3 bytes each.
    assert_eq!(wide.bytes.len(), narrow.bytes.len() + 67);

    let dispatcher = FormatDispatcher::default();
    assert_eq!(
        dispatcher.decode_bytes(&narrow.bytes).unwrap().cells.len(),
        64
    );
    assert_eq!(
        dispatcher.decode_bytes(&wide.bytes).unwrap().cells.len(),
        65
    );
}

#[test]
fn test_type_width_switches_on_large_id() {
    // One distinct type still goes wide when the id needs two bytes.
    let narrow_id = {
        let mut grid = CellGrid::new(1, 1).unwrap();
        grid.insert(Cell::new(255, Position::new(0, 0), Direction::North))
            .unwrap();
        Format::Mash
            .encode_level(&Level::new(LevelProperties::new(1, 1), grid))
            .unwrap()
    };
    let wide_id = {
        let mut grid = CellGrid::new(1, 1).unwrap();
        grid.insert(Cell::new(256, Position::new(0, 0), Direction::North))
            .unwrap();
        Format::Mash
            .encode_level(&Level::new(LevelProperties::new(1, 1), grid))
            .unwrap()
    };
    assert_eq!(wide_id.bytes.len(), narrow_id.bytes.len() + 1);
}

// === Size caps ===

#[test]
fn test_area_above_cap_refused_by_both_encoders() {
    let level = Level::empty(2049, 2049).unwrap();
    for format in [Format::Mash, Format::Beta] {
        let result = format.encode_level(&level);
        assert!(
            matches!(result, Err(CodecError::EncodingConstraintViolation { .. })),
            "{} accepted an oversized grid",
            format
        );
    }
}

#[test]
fn test_area_exactly_at_cap_roundtrips() {
    let level = Level::empty(2048, 2048).unwrap();
    let dispatcher = FormatDispatcher::default();
    for format in [Format::Mash, Format::Beta] {
        let encoded = format.encode_level(&level).unwrap();
        let decoded = dispatcher.decode_bytes(&encoded.bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (2048, 2048));
        assert!(decoded.cells.is_empty());
    }
}

#[test]
fn test_dimension_caps_differ_per_format() {
    // 70000 columns fit the grouped format's 32-bit dimensions but not
    // the run-length format's 16-bit ones.
    let level = Level::empty(70_000, 1).unwrap();
    assert!(matches!(
        Format::Mash.encode_level(&level),
        Err(CodecError::EncodingConstraintViolation { .. })
    ));
    let encoded = Format::Beta.encode_level(&level).unwrap();
    let decoded = FormatDispatcher::default()
        .decode_bytes(&encoded.bytes)
        .unwrap();
    assert_eq!(decoded.width, 70_000);
}
