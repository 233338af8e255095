//! Die face values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Number of dice a player starts each turn with.
pub const DICE_PER_TURN: usize = 6;

/// The face value shown by a single die, always in 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Face(u8);

/// All six faces in ascending order.
pub const ALL_FACES: [Face; 6] = [Face(1), Face(2), Face(3), Face(4), Face(5), Face(6)];

impl Face {
    /// Validates a raw die value.
    pub fn new(value: u8) -> Result<Face, GameError> {
        if (1..=6).contains(&value) {
            Ok(Face(value))
        } else {
            Err(GameError::invalid(format!(
                "die value {} outside 1..=6",
                value
            )))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Zero-based slot used by fixed-size per-face tables.
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for Face {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Face::new(value)
    }
}

impl From<Face> for u8 {
    fn from(face: Face) -> u8 {
        face.0
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates a slice of raw values into faces.
pub fn faces_from_values(values: &[u8]) -> Result<Vec<Face>, GameError> {
    values.iter().map(|&v| Face::new(v)).collect()
}
