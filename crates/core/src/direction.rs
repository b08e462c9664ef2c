//! Cell facing directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Facing direction of a cell.
///
/// The ordinals are wire-visible: run headers store a direction in two
/// bits and grouped encodings key their direction groups by it, so the
/// numbering is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Up, ordinal 0.
    North,
    /// Right, ordinal 1.
    East,
    /// Down, ordinal 2.
    South,
    /// Left, ordinal 3.
    West,
}

impl Direction {
    /// All directions in ordinal order.
    ///
    /// Encoders that group cells by direction iterate this array, so the
    /// order is part of the wire contract.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The wire ordinal of this direction.
    pub fn ordinal(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Look up a direction by wire ordinal.
    ///
    /// Returns `None` for ordinals above 3.
    pub fn from_ordinal(ordinal: u8) -> Option<Direction> {
        match ordinal {
            0 => Some(Direction::North),
            1 => Some(Direction::East),
            2 => Some(Direction::South),
            3 => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}
