//! Turn accumulator.
//!
//! Tracks one player's turn across repeated rolls: the dice still in hand,
//! the provisional score built from kept dice, and the phase the turn is in.
//! Every kept subset is priced by the scoring engine on its own, so the
//! provisional score is always the sum of the per-keep scores.
//!
//! Phase flow:
//! - Idle      -> Selecting (roll)
//! - Selecting -> Rolling   (keep)
//! - Selecting -> TurnEnded (roll was a bust and the forfeit rule is on)
//! - Rolling   -> Selecting (roll)
//!
//! Ending the turn is driven by the session, which calls [`TurnState::start`]
//! again for the next player.

use crate::dice::{DiceSource, Face, Roll, DICE_PER_TURN};
use crate::error::GameError;
use crate::scoring::score;

/// Where a turn currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Fresh turn, nothing rolled yet.
    Idle,
    /// A roll is on the table and the player must keep some dice.
    Selecting,
    /// Dice were kept; the player may roll again or end the turn.
    Rolling,
    /// The turn busted under the forfeit rule. Only ending the turn is allowed.
    TurnEnded,
}

impl TurnPhase {
    pub const fn name(self) -> &'static str {
        match self {
            TurnPhase::Idle => "idle",
            TurnPhase::Selecting => "selecting",
            TurnPhase::Rolling => "rolling",
            TurnPhase::TurnEnded => "ended",
        }
    }
}

/// Dice kept from a single roll generation and the points they earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeptGroup {
    pub generation: u32,
    pub faces: Vec<Face>,
    pub points: u32,
}

/// Result of a roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    pub roll: Roll,
    /// No die in the roll can score.
    pub bust: bool,
    /// Provisional points lost to the forfeit rule, 0 when nothing was lost.
    pub forfeited: u32,
}

/// Mutable state of the turn in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub dice_remaining: usize,
    pub provisional_score: u32,
    pub roll_generation: u32,
    pub phase: TurnPhase,
    current_roll: Option<Roll>,
    kept: Vec<KeptGroup>,
}

impl Default for TurnState {
    fn default() -> Self {
        TurnState {
            dice_remaining: DICE_PER_TURN,
            provisional_score: 0,
            roll_generation: 0,
            phase: TurnPhase::Idle,
            current_roll: None,
            kept: Vec::new(),
        }
    }
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets everything for a fresh turn.
    pub fn start(&mut self) {
        *self = TurnState::default();
    }

    /// The most recent roll of this turn, if any.
    pub fn current_roll(&self) -> Option<&Roll> {
        self.current_roll.as_ref()
    }

    /// Dice kept so far this turn, oldest first.
    pub fn kept(&self) -> &[KeptGroup] {
        &self.kept
    }

    /// Rolls every die still in hand.
    ///
    /// Once all six dice have been kept the hand refills to six ("hot dice").
    /// With `forfeit_on_bust` set, a roll with no scoring dice wipes the
    /// provisional score and ends the turn.
    pub fn roll<D: DiceSource>(
        &mut self,
        dice: &mut D,
        forfeit_on_bust: bool,
    ) -> Result<RollOutcome, GameError> {
        match self.phase {
            TurnPhase::Idle | TurnPhase::Rolling => {}
            TurnPhase::Selecting => {
                return Err(GameError::illegal(
                    "select dice to keep before rolling again",
                ))
            }
            TurnPhase::TurnEnded => return Err(GameError::illegal("turn is over")),
        }

        if self.dice_remaining == 0 {
            self.dice_remaining = DICE_PER_TURN;
        }

        let faces = dice.roll_dice(self.dice_remaining);
        self.roll_generation += 1;
        let roll = Roll::new(self.roll_generation, &faces);
        let bust = roll.is_bust();

        let mut forfeited = 0;
        if bust && forfeit_on_bust {
            forfeited = self.provisional_score;
            self.provisional_score = 0;
            self.phase = TurnPhase::TurnEnded;
        } else {
            self.phase = TurnPhase::Selecting;
        }
        self.current_roll = Some(roll.clone());

        Ok(RollOutcome {
            roll,
            bust,
            forfeited,
        })
    }

    /// Keeps the dice at `indices` of the current roll and scores them.
    ///
    /// Returns the points awarded for this subset. On error nothing changes.
    pub fn keep(&mut self, indices: &[usize]) -> Result<u32, GameError> {
        if self.phase != TurnPhase::Selecting {
            return Err(GameError::illegal("no active roll to keep dice from"));
        }
        let roll = self
            .current_roll
            .as_ref()
            .ok_or_else(|| GameError::illegal("no active roll to keep dice from"))?;
        if indices.is_empty() {
            return Err(GameError::NothingSelected);
        }

        let faces = roll.select(indices)?;
        let points = score(&faces)?;

        self.provisional_score += points;
        self.dice_remaining -= faces.len();
        self.kept.push(KeptGroup {
            generation: roll.generation,
            faces,
            points,
        });
        self.phase = TurnPhase::Rolling;

        Ok(points)
    }
}
