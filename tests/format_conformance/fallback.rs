//! Detection order, decode fallback, and terminal failure.

use cellmash::{
    BetaCodec, Cell, CellGrid, CodecError, Direction, Format, FormatDispatcher, Level,
    LevelFormat, LevelProperties, MashCodec, Position, MASH_MARKER,
};

fn level_with_depend(depend_mod: &str) -> Level {
    let mut grid = CellGrid::new(6, 6).unwrap();
    grid.insert(Cell::new(9, Position::new(2, 2), Direction::South))
        .unwrap();
    grid.add_drag_spot(Position::new(5, 5)).unwrap();
    let mut properties = LevelProperties::new(6, 6);
    properties.name = "Ambiguous".to_string();
    properties.depend_mod = depend_mod.to_string();
    Level::new(properties, grid)
}

#[test]
fn test_fallback_recovers_token_with_misleading_prefix() {
    // A grouped-format token whose first wire string happens to spell
    // the run-length marker: its length byte is 124, which is '|', and
    // its content opens with "ByteMash|". The byte that lands where
    // the run-length decoder expects a name length then starts an
    // over-long varint, so that decode is guaranteed to fail.
    let depend_mod = format!("ByteMash|F{}{}", "\u{FF}".repeat(3), "x".repeat(108));
    assert_eq!(depend_mod.len(), 124);

    let level = level_with_depend(&depend_mod);
    let token = BetaCodec.encode_level(&level).unwrap();

    // Both signatures claim the token...
    assert!(token.bytes.starts_with(MASH_MARKER.as_bytes()));
    assert!(MashCodec.matches_bytes(&token.bytes));
    assert!(BetaCodec.matches_bytes(&token.bytes));
    // ...but only the grouped decode survives.
    assert!(MashCodec.decode_bytes(&token.bytes).is_err());

    let decoded = FormatDispatcher::default()
        .decode_bytes(&token.bytes)
        .unwrap();
    assert_eq!(decoded.name, "Ambiguous");
    assert_eq!(decoded.depend_mod, depend_mod);
    assert_eq!(decoded.to_level().unwrap(), level);
}

#[test]
fn test_signature_disjointness_for_ordinary_tokens() {
    let level = level_with_depend("basegame");
    let mash = MashCodec.encode_level(&level).unwrap();
    let beta = BetaCodec.encode_level(&level).unwrap();

    assert!(!BetaCodec.matches_bytes(&mash.bytes));
    assert!(!BetaCodec.matches_text(&mash.text));
    assert!(BetaCodec.decode_bytes(&mash.bytes).is_err());

    assert!(!MashCodec.matches_bytes(&beta.bytes));
    assert!(!MashCodec.matches_text(&beta.text));
    assert!(MashCodec.decode_bytes(&beta.bytes).is_err());
}

#[test]
fn test_matching_signature_alone_is_not_enough() {
    // Carries the marker, decodes under nothing.
    let mut bytes = MASH_MARKER.as_bytes().to_vec();
    bytes.extend_from_slice(&[0xC3, 0xBF, 0xC3, 0xBF, 0xC3]);
    assert!(MashCodec.matches_bytes(&bytes));
    assert!(matches!(
        FormatDispatcher::default().decode_bytes(&bytes),
        Err(CodecError::UnrecognizedFormat)
    ));
}

#[test]
fn test_unrecognized_token_is_terminal() {
    let dispatcher = FormatDispatcher::default();
    assert!(matches!(
        dispatcher.decode_bytes(&[0x00, 0x01, 0x02]),
        Err(CodecError::UnrecognizedFormat)
    ));
    assert!(matches!(
        dispatcher.decode_text("definitely not a level"),
        Err(CodecError::UnrecognizedFormat)
    ));
}

#[test]
fn test_v3_claims_nothing() {
    let level = level_with_depend("basegame");
    for token in [
        MashCodec.encode_level(&level).unwrap(),
        BetaCodec.encode_level(&level).unwrap(),
    ] {
        assert!(!Format::LegacyV3.matches_bytes(&token.bytes));
        assert!(!Format::LegacyV3.matches_text(&token.text));
    }
    let v3_only = FormatDispatcher::new(vec![Format::LegacyV3]);
    let mash = MashCodec.encode_level(&level).unwrap();
    assert!(matches!(
        v3_only.decode_bytes(&mash.bytes),
        Err(CodecError::UnrecognizedFormat)
    ));
}

#[test]
fn test_transcode_rescues_the_ambiguous_token() {
    let depend_mod = format!("ByteMash|F{}{}", "\u{FF}".repeat(3), "x".repeat(108));
    let level = level_with_depend(&depend_mod);
    let beta = BetaCodec.encode_level(&level).unwrap();

    // Re-encoding through the run-length format removes the ambiguity.
    let mash = FormatDispatcher::default()
        .transcode_bytes(&beta.bytes, Format::Mash)
        .unwrap();
    assert!(BetaCodec.decode_bytes(&mash.bytes).is_err());
    let decoded = MashCodec.decode_bytes(&mash.bytes).unwrap();
    assert_eq!(decoded.depend_mod, depend_mod);
    assert_eq!(decoded.to_level().unwrap(), level);
}
