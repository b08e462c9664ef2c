//! Level metadata.

use serde::{Deserialize, Serialize};

/// Descriptive metadata carried alongside the grid.
///
/// The defaults match what historical tokens leave implicit: an unnamed
/// level decodes as "Default" by "Unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProperties {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Author display name.
    pub author: String,
    /// Level version string. Stored, never interpreted.
    pub version: String,
    /// Identifier of the mod this level depends on, empty for none.
    pub depend_mod: String,
    /// Grid width in cells.
    pub width: i32,
    /// Grid height in cells.
    pub height: i32,
    /// Last-saved wall clock, UTC microseconds since the Unix epoch.
    /// Encoders stamp the current time instead of this value.
    pub time: i64,
    /// Whether the level is vaulted (hidden from public listings).
    pub vault: bool,
}

impl LevelProperties {
    /// Default metadata with the given dimensions.
    pub fn new(width: i32, height: i32) -> LevelProperties {
        LevelProperties {
            width,
            height,
            ..LevelProperties::default()
        }
    }
}

impl Default for LevelProperties {
    fn default() -> LevelProperties {
        LevelProperties {
            name: "Default".to_string(),
            description: String::new(),
            author: "Unknown".to_string(),
            version: "1.0".to_string(),
            depend_mod: String::new(),
            width: 0,
            height: 0,
            time: 0,
            vault: false,
        }
    }
}
