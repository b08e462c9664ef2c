//! Concrete byte-level walks and degenerate levels.

use cellmash::{
    Cell, CellGrid, Direction, Format, FormatDispatcher, Level, LevelFormat, LevelProperties,
    Position,
};

#[test]
fn test_grouped_scenario_three_by_three() {
    // 3x3 grid, one type-2 cell facing East at (1,1), one drag spot
    // at (0,0).
    let mut grid = CellGrid::new(3, 3).unwrap();
    grid.insert(Cell::new(2, Position::new(1, 1), Direction::East))
        .unwrap();
    grid.add_drag_spot(Position::new(0, 0)).unwrap();
    let level = Level::new(LevelProperties::new(3, 3), grid);

    let encoded = Format::Beta.encode_level(&level).unwrap();

    // Everything after the metadata block is fully determined.
    let mut tail = Vec::new();
    tail.extend_from_slice(&1i32.to_le_bytes()); // one drag spot
    tail.extend_from_slice(&0i32.to_le_bytes()); // at (0,
    tail.extend_from_slice(&0i32.to_le_bytes()); //     0)
    tail.extend_from_slice(&1i16.to_le_bytes()); // one type group
    tail.extend_from_slice(&2i16.to_le_bytes()); // type 2
    tail.push(1); // one direction group
    tail.push(Direction::East.ordinal());
    tail.extend_from_slice(&1i32.to_le_bytes()); // one cell
    tail.extend_from_slice(&1i16.to_le_bytes()); // at (1,
    tail.extend_from_slice(&1i16.to_le_bytes()); //     1)
    assert!(encoded.bytes.ends_with(&tail));

    let decoded = Format::Beta.decode_bytes(&encoded.bytes).unwrap();
    assert_eq!(
        decoded.cells,
        vec![Cell::new(2, Position::new(1, 1), Direction::East)]
    );
    assert_eq!(decoded.drag_spots, vec![Position::new(0, 0)]);
    assert_eq!((decoded.width, decoded.height), (3, 3));
}

#[test]
fn test_frozen_run_length_token() {
    // A 2x1 level named "A" with one type-5 cell at (0,0): the full
    // byte stream is pinned so accidental layout drift shows up here.
    let mut grid = CellGrid::new(2, 1).unwrap();
    grid.insert(Cell::new(5, Position::new(0, 0), Direction::North))
        .unwrap();
    let mut properties = LevelProperties::new(2, 1);
    properties.name = "A".to_string();
    let level = Level::new(properties, grid);

    let frozen: &[u8] = &[
        0x7C, 0x42, 0x79, 0x74, 0x65, 0x4D, 0x61, 0x73, 0x68, 0x7C, // |ByteMash|
        0x00, // flags: no vault, narrow types
        0x01, 0x41, // name "A"
        0x00, // depend_mod ""
        0x00, // description ""
        0x02, 0x00, // width 2
        0x01, 0x00, // height 1
        0x82, 0x05, // one type-5 cell, length omitted
        0x00, // terminator
    ];

    let encoded = Format::Mash.encode_level(&level).unwrap();
    assert_eq!(encoded.bytes, frozen);

    let decoded = FormatDispatcher::default().decode_bytes(frozen).unwrap();
    assert_eq!(decoded.to_level().unwrap(), level);
}

#[test]
fn test_empty_grid_roundtrips() {
    let level = Level::empty(0, 0).unwrap();
    let dispatcher = FormatDispatcher::default();
    for format in [Format::Mash, Format::Beta] {
        let encoded = format.encode_level(&level).unwrap();
        let decoded = dispatcher.decode_bytes(&encoded.bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (0, 0), "{}", format);
        assert!(decoded.cells.is_empty(), "{}", format);
        assert!(decoded.drag_spots.is_empty(), "{}", format);
    }
}

#[test]
fn test_fully_blank_grid_roundtrips() {
    let level = Level::empty(16, 16).unwrap();
    let dispatcher = FormatDispatcher::default();
    for format in [Format::Mash, Format::Beta] {
        let encoded = format.encode_level(&level).unwrap();
        let decoded = dispatcher.decode_bytes(&encoded.bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (16, 16), "{}", format);
        assert!(decoded.cells.is_empty(), "{}", format);
    }
}

#[test]
fn test_drag_spots_without_cells() {
    let mut grid = CellGrid::new(4, 4).unwrap();
    grid.add_drag_spot(Position::new(0, 0)).unwrap();
    grid.add_drag_spot(Position::new(3, 3)).unwrap();
    let level = Level::new(LevelProperties::new(4, 4), grid);

    let dispatcher = FormatDispatcher::default();
    for format in [Format::Mash, Format::Beta] {
        let encoded = format.encode_level(&level).unwrap();
        let decoded = dispatcher.decode_bytes(&encoded.bytes).unwrap();
        assert!(decoded.cells.is_empty(), "{}", format);
        assert_eq!(
            decoded.drag_spots,
            vec![Position::new(0, 0), Position::new(3, 3)],
            "{}",
            format
        );
    }
}

#[test]
fn test_vault_flag_survives_both_formats() {
    let dispatcher = FormatDispatcher::default();
    for vault in [false, true] {
        let mut properties = LevelProperties::new(2, 2);
        properties.vault = vault;
        let level = Level::new(properties, CellGrid::new(2, 2).unwrap());
        for format in [Format::Mash, Format::Beta] {
            let encoded = format.encode_level(&level).unwrap();
            let decoded = dispatcher.decode_bytes(&encoded.bytes).unwrap();
            assert_eq!(decoded.vault, vault, "{}", format);
        }
    }
}
