//! A single physical roll of the dice.

use super::face::Face;
use crate::error::GameError;
use crate::scoring::has_scoring_dice;

/// One die on the table, identified by its position in the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Die {
    pub index: usize,
    pub face: Face,
}

/// The dice produced by one randomization event within a turn.
///
/// `generation` counts physical rolls within the turn, starting at 1 for
/// the first roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roll {
    pub generation: u32,
    pub dice: Vec<Die>,
}

impl Roll {
    pub fn new(generation: u32, faces: &[Face]) -> Self {
        let dice = faces
            .iter()
            .enumerate()
            .map(|(index, &face)| Die { index, face })
            .collect();
        Roll { generation, dice }
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    pub fn faces(&self) -> Vec<Face> {
        self.dice.iter().map(|d| d.face).collect()
    }

    /// True when no subset of this roll can score.
    pub fn is_bust(&self) -> bool {
        !has_scoring_dice(&self.faces())
    }

    /// Resolves die indices into faces.
    ///
    /// Rejects indices outside the roll and indices named more than once.
    /// An empty selection is returned as-is; the caller decides whether
    /// that is an error.
    pub fn select(&self, indices: &[usize]) -> Result<Vec<Face>, GameError> {
        let mut seen = vec![false; self.dice.len()];
        let mut faces = Vec::with_capacity(indices.len());
        for &i in indices {
            let die = self.dice.get(i).ok_or_else(|| {
                GameError::invalid(format!(
                    "die index {} out of range for a roll of {}",
                    i,
                    self.dice.len()
                ))
            })?;
            if seen[i] {
                return Err(GameError::invalid(format!("die index {} selected twice", i)));
            }
            seen[i] = true;
            faces.push(die.face);
        }
        Ok(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::face::faces_from_values;

    fn roll_of(values: &[u8]) -> Roll {
        Roll::new(1, &faces_from_values(values).unwrap())
    }

    #[test]
    fn dice_are_indexed_in_order() {
        let roll = roll_of(&[3, 1, 6]);
        assert_eq!(roll.len(), 3);
        assert_eq!(roll.dice[1].index, 1);
        assert_eq!(roll.dice[1].face.value(), 1);
    }

    #[test]
    fn select_returns_faces_in_selection_order() {
        let roll = roll_of(&[2, 5, 1, 4]);
        let faces = roll.select(&[2, 1]).unwrap();
        let values: Vec<u8> = faces.iter().map(|f| f.value()).collect();
        assert_eq!(values, vec![1, 5]);
    }

    #[test]
    fn select_rejects_out_of_range() {
        let roll = roll_of(&[2, 5]);
        assert!(matches!(roll.select(&[2]), Err(GameError::InvalidInput(_))));
    }

    #[test]
    fn select_rejects_duplicates() {
        let roll = roll_of(&[1, 5, 5]);
        assert!(matches!(roll.select(&[1, 1]), Err(GameError::InvalidInput(_))));
    }

    #[test]
    fn empty_selection_is_allowed_here() {
        let roll = roll_of(&[1]);
        assert!(roll.select(&[]).unwrap().is_empty());
    }

    #[test]
    fn bust_detection() {
        assert!(roll_of(&[2, 3, 4, 6, 2, 3]).is_bust());
        assert!(roll_of(&[2]).is_bust());
        assert!(!roll_of(&[2, 3, 5]).is_bust());
        assert!(!roll_of(&[2, 2, 2]).is_bust());
        assert!(!roll_of(&[2, 2, 3, 3, 4, 4]).is_bust());
    }
}
