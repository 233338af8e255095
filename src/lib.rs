//! hotdice engine library.
//!
//! Exposes the dice, scoring engine, turn accumulator, game session, and
//! protocol modules for use by integration tests and the binary entry points.

pub mod dice;
pub mod engine;
pub mod error;
pub mod game;
pub mod protocol;
pub mod scoring;
pub mod simulate;
pub mod turn;

pub use error::GameError;
