//! Sources of die faces.
//!
//! The session only ever asks a [`DiceSource`] for faces, so tests can
//! inject a fixed script while play uses a seeded or entropy-backed RNG.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::face::{Face, ALL_FACES};
use crate::error::GameError;

/// Produces independent die faces.
pub trait DiceSource {
    fn roll_face(&mut self) -> Face;

    fn roll_dice(&mut self, count: usize) -> Vec<Face> {
        (0..count).map(|_| self.roll_face()).collect()
    }
}

/// Uniform random faces drawn from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomDice<R: Rng = SmallRng> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        RandomDice { rng }
    }
}

impl RandomDice<SmallRng> {
    pub fn from_entropy() -> Self {
        RandomDice::new(SmallRng::from_entropy())
    }

    /// Seeded dice; a seed of 0 falls back to entropy.
    pub fn seeded(seed: u64) -> Self {
        if seed == 0 {
            Self::from_entropy()
        } else {
            RandomDice::new(SmallRng::seed_from_u64(seed))
        }
    }
}

impl<R: Rng> DiceSource for RandomDice<R> {
    fn roll_face(&mut self) -> Face {
        ALL_FACES[self.rng.gen_range(0..ALL_FACES.len())]
    }
}

/// Replays a fixed sequence of faces, wrapping around when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    script: Vec<Face>,
    pos: usize,
}

impl ScriptedDice {
    pub fn new(values: &[u8]) -> Result<Self, GameError> {
        if values.is_empty() {
            return Err(GameError::invalid("dice script is empty"));
        }
        let script = values
            .iter()
            .map(|&v| Face::new(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScriptedDice { script, pos: 0 })
    }
}

impl DiceSource for ScriptedDice {
    fn roll_face(&mut self) -> Face {
        let face = self.script[self.pos];
        self.pos = (self.pos + 1) % self.script.len();
        face
    }
}
