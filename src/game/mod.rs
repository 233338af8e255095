//! Players, rules, and the game session.
//!
//! The session is the command API a presentation layer drives: register
//! players, start the game, then roll, keep, and end turns in rotation.

pub mod config;
pub mod player;
pub mod session;

pub use config::RuleConfig;
pub use player::{Color, PlayerState, MAX_NAME_LEN, MAX_PLAYERS};
pub use session::{GameState, Session, SessionStatus, TurnSummary};
