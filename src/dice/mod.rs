//! Dice representation.
//!
//! Contains die faces, the dice of a single roll, and the pluggable source
//! of randomness that produces them.

pub mod face;
pub mod roll;
pub mod source;

pub use face::{Face, ALL_FACES, DICE_PER_TURN};
pub use roll::{Die, Roll};
pub use source::{DiceSource, RandomDice, ScriptedDice};
