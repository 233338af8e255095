//! Face-value histogram of a set of dice.

use crate::dice::{Face, ALL_FACES, DICE_PER_TURN};
use crate::error::GameError;

/// Per-face counts for the dice kept from one roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Histogram {
    counts: [u8; 6],
}

impl Histogram {
    /// Builds a histogram from one to six faces.
    pub fn from_faces(faces: &[Face]) -> Result<Histogram, GameError> {
        if faces.is_empty() {
            return Err(GameError::invalid("cannot score an empty set of dice"));
        }
        if faces.len() > DICE_PER_TURN {
            return Err(GameError::invalid(format!(
                "cannot score {} dice, at most {} are rolled",
                faces.len(),
                DICE_PER_TURN
            )));
        }
        let mut counts = [0u8; 6];
        for face in faces {
            counts[face.index()] += 1;
        }
        Ok(Histogram { counts })
    }

    pub fn count(&self, face: Face) -> u8 {
        self.counts[face.index()]
    }

    /// Number of distinct faces present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Faces appearing exactly `n` times, ascending.
    pub fn faces_with_count(&self, n: u8) -> impl Iterator<Item = Face> + '_ {
        ALL_FACES
            .iter()
            .copied()
            .filter(move |&f| self.count(f) == n)
    }
}
