//! Scoring engine.
//!
//! Prices the dice a player keeps from one roll. Scoring works over the
//! face-value histogram of the kept dice, so the order in which dice were
//! picked never changes the result.

pub mod combination;
pub mod histogram;

pub use combination::{classify, Combination};
pub use histogram::Histogram;

use crate::dice::face::faces_from_values;
use crate::dice::Face;
use crate::error::GameError;

/// Scores the faces kept from a single roll.
///
/// Accepts one to six dice. Returns 0 when nothing in the set scores; the
/// caller decides whether that counts as a bust.
pub fn score(faces: &[Face]) -> Result<u32, GameError> {
    let hist = Histogram::from_faces(faces)?;
    Ok(score_histogram(&hist))
}

/// Scores raw die values, rejecting anything outside 1..=6.
pub fn score_values(values: &[u8]) -> Result<u32, GameError> {
    score(&faces_from_values(values)?)
}

pub fn score_histogram(hist: &Histogram) -> u32 {
    classify(hist).iter().map(|c| c.points()).sum()
}

/// Returns true if at least one non-empty subset of `faces` scores.
pub fn has_scoring_dice(faces: &[Face]) -> bool {
    let mut counts = [0usize; 6];
    for face in faces {
        counts[face.index()] += 1;
    }
    let ones = counts[0];
    let fives = counts[4];
    let pairs = counts.iter().filter(|&&c| c == 2).count();
    let distinct = counts.iter().filter(|&&c| c > 0).count();

    ones > 0 || fives > 0 || counts.iter().any(|&c| c >= 3) || pairs == 3 || distinct == 6
}
