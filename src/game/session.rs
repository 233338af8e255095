//! Game session.
//!
//! Owns the players, the turn in progress, the rules, and the dice source.
//! Every command either succeeds or returns an error with the session left
//! untouched.

use tracing::{debug, info};

use super::config::RuleConfig;
use super::player::{Color, PlayerState, MAX_PLAYERS};
use crate::dice::{DiceSource, RandomDice};
use crate::error::GameError;
use crate::turn::{RollOutcome, TurnState};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// Players may register; no turns are being played.
    Registering,
    InProgress,
    /// A player reached the target score.
    Finished { winner: usize },
}

/// The ordered players and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    pub players: Vec<PlayerState>,
    /// Zero-based index into `players`.
    pub current: usize,
}

impl GameState {
    /// Index of the player after `current`, wrapping to the first.
    pub fn next_index(&self) -> usize {
        if self.players.is_empty() {
            0
        } else {
            (self.current + 1) % self.players.len()
        }
    }
}

/// What ending a turn did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSummary {
    /// Player whose turn just ended.
    pub player: usize,
    pub points: u32,
    pub banked_score: u32,
    /// Player whose turn starts now.
    pub next_player: usize,
    pub winner: Option<usize>,
}

/// A single game of dice between registered players.
pub struct Session<D: DiceSource = RandomDice> {
    game: GameState,
    turn: TurnState,
    rules: RuleConfig,
    status: SessionStatus,
    dice: D,
}

impl Session<RandomDice> {
    /// Session with entropy-seeded dice.
    pub fn with_random_dice(rules: RuleConfig) -> Self {
        Session::new(rules, RandomDice::from_entropy())
    }
}

impl<D: DiceSource> Session<D> {
    pub fn new(rules: RuleConfig, dice: D) -> Self {
        Session {
            game: GameState::default(),
            turn: TurnState::new(),
            rules,
            status: SessionStatus::Registering,
            dice,
        }
    }

    pub fn rules(&self) -> RuleConfig {
        self.rules
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.game.players
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// The player whose turn it is, once the game has started.
    pub fn current_player(&self) -> Option<&PlayerState> {
        match self.status {
            SessionStatus::Registering => None,
            _ => self.game.players.get(self.game.current),
        }
    }

    /// Adds a player. Only allowed before the game starts.
    pub fn register_player(&mut self, name: &str, color: Color) -> Result<&PlayerState, GameError> {
        if self.status != SessionStatus::Registering {
            return Err(GameError::illegal("players cannot join a game in progress"));
        }
        if self.game.players.len() >= MAX_PLAYERS {
            return Err(GameError::invalid(format!(
                "this game supports up to {} players",
                MAX_PLAYERS
            )));
        }
        let player = PlayerState::new(name, color)?;
        info!(name = player.name(), %color, "player registered");
        self.game.players.push(player);
        let idx = self.game.players.len() - 1;
        Ok(&self.game.players[idx])
    }

    /// Starts play with the first registered player.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.status != SessionStatus::Registering {
            return Err(GameError::illegal("game already started"));
        }
        if self.game.players.is_empty() {
            return Err(GameError::illegal("register at least one player first"));
        }
        self.status = SessionStatus::InProgress;
        self.game.current = 0;
        self.turn.start();
        info!(players = self.game.players.len(), "game started");
        Ok(())
    }

    /// Discards the turn in progress and starts it over for the same player.
    pub fn start_turn(&mut self) -> Result<(), GameError> {
        self.require_in_progress()?;
        self.turn.start();
        Ok(())
    }

    pub fn roll(&mut self) -> Result<RollOutcome, GameError> {
        self.require_in_progress()?;
        let outcome = self.turn.roll(&mut self.dice, self.rules.forfeit_on_bust)?;
        debug!(
            player = self.game.current,
            generation = outcome.roll.generation,
            bust = outcome.bust,
            "rolled {:?}",
            outcome.roll.faces().iter().map(|f| f.value()).collect::<Vec<_>>()
        );
        if outcome.forfeited > 0 {
            info!(
                player = self.game.current,
                forfeited = outcome.forfeited,
                "bust, provisional score forfeited"
            );
        }
        Ok(outcome)
    }

    /// Keeps dice from the current roll by index and returns the points
    /// they earned.
    pub fn keep(&mut self, indices: &[usize]) -> Result<u32, GameError> {
        self.require_in_progress()?;
        let points = self.turn.keep(indices)?;
        debug!(
            player = self.game.current,
            points,
            provisional = self.turn.provisional_score,
            "kept dice"
        );
        Ok(points)
    }

    /// Banks the provisional score and passes play to the next player.
    pub fn end_turn(&mut self) -> Result<TurnSummary, GameError> {
        self.require_in_progress()?;

        let player = self.game.current;
        let points = self.turn.provisional_score;
        let banked_score = {
            let p = &mut self.game.players[player];
            p.bank(points);
            p.banked_score()
        };
        self.turn.start();

        let winner = self
            .rules
            .target_score
            .filter(|&target| banked_score >= target)
            .map(|_| player);

        let next_player = match winner {
            Some(w) => {
                self.status = SessionStatus::Finished { winner: w };
                info!(player = w, banked_score, "game won");
                w
            }
            None => {
                self.game.current = self.game.next_index();
                self.game.current
            }
        };
        info!(player, points, banked_score, next_player, "turn ended");

        Ok(TurnSummary {
            player,
            points,
            banked_score,
            next_player,
            winner,
        })
    }

    /// Clears all players and scores and reopens registration.
    pub fn restart_game(&mut self) {
        self.game = GameState::default();
        self.turn.start();
        self.status = SessionStatus::Registering;
        info!("game restarted");
    }

    fn require_in_progress(&self) -> Result<(), GameError> {
        match self.status {
            SessionStatus::InProgress => Ok(()),
            SessionStatus::Registering => Err(GameError::illegal("game has not started")),
            SessionStatus::Finished { .. } => Err(GameError::illegal("game is over")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::turn::TurnPhase;

    fn red() -> Color {
        Color::new(255, 0, 0)
    }

    fn session(script: &[u8], rules: RuleConfig) -> Session<ScriptedDice> {
        Session::new(rules, ScriptedDice::new(script).unwrap())
    }

    fn started(names: &[&str], script: &[u8]) -> Session<ScriptedDice> {
        let mut s = session(script, RuleConfig::default());
        for name in names {
            s.register_player(name, red()).unwrap();
        }
        s.start_game().unwrap();
        s
    }

    #[test]
    fn register_validates_name_and_cap() {
        let mut s = session(&[1], RuleConfig::default());
        assert!(matches!(
            s.register_player("toolong", red()),
            Err(GameError::InvalidInput(_))
        ));
        for name in ["a", "b", "c", "d", "e", "f"] {
            s.register_player(name, red()).unwrap();
        }
        assert!(matches!(
            s.register_player("g", red()),
            Err(GameError::InvalidInput(_))
        ));
        assert_eq!(s.players().len(), 6);
    }

    #[test]
    fn cannot_start_without_players() {
        let mut s = session(&[1], RuleConfig::default());
        assert!(matches!(s.start_game(), Err(GameError::IllegalState(_))));
        assert_eq!(s.status(), SessionStatus::Registering);
    }

    #[test]
    fn cannot_register_after_start() {
        let mut s = started(&["ann"], &[1]);
        assert!(matches!(
            s.register_player("bob", red()),
            Err(GameError::IllegalState(_))
        ));
    }

    #[test]
    fn commands_require_started_game() {
        let mut s = session(&[1], RuleConfig::default());
        assert!(matches!(s.roll(), Err(GameError::IllegalState(_))));
        assert!(matches!(s.keep(&[0]), Err(GameError::IllegalState(_))));
        assert!(matches!(s.end_turn(), Err(GameError::IllegalState(_))));
        assert!(s.current_player().is_none());
    }

    #[test]
    fn end_turn_banks_and_rotates() {
        let mut s = started(&["ann", "bob"], &[1, 5, 2, 3, 4, 6]);
        s.roll().unwrap();
        assert_eq!(s.keep(&[0, 1]).unwrap(), 150);
        let summary = s.end_turn().unwrap();
        assert_eq!(summary.player, 0);
        assert_eq!(summary.points, 150);
        assert_eq!(summary.banked_score, 150);
        assert_eq!(summary.next_player, 1);
        assert_eq!(summary.winner, None);
        assert_eq!(s.players()[0].banked_score(), 150);
        assert_eq!(s.current_player().unwrap().name(), "bob");
        assert_eq!(s.turn().provisional_score, 0);
        assert_eq!(s.turn().dice_remaining, 6);
        assert_eq!(s.turn().phase, TurnPhase::Idle);
    }

    #[test]
    fn rotation_wraps_to_first_player() {
        let mut s = started(&["a", "b", "c"], &[2]);
        let order: Vec<usize> = (0..4).map(|_| s.end_turn().unwrap().next_player).collect();
        assert_eq!(order, vec![1, 2, 0, 1]);
    }

    #[test]
    fn banked_score_unchanged_mid_turn() {
        let mut s = started(&["ann"], &[1, 1, 1, 2, 3, 4]);
        s.roll().unwrap();
        s.keep(&[0, 1, 2]).unwrap();
        assert_eq!(s.turn().provisional_score, 300);
        assert_eq!(s.players()[0].banked_score(), 0);
    }

    #[test]
    fn start_turn_discards_provisional() {
        let mut s = started(&["ann"], &[1, 1, 1, 2, 3, 4]);
        s.roll().unwrap();
        s.keep(&[0]).unwrap();
        s.start_turn().unwrap();
        assert_eq!(s.turn().provisional_score, 0);
        assert_eq!(s.end_turn().unwrap().banked_score, 0);
    }

    #[test]
    fn forfeited_turn_banks_nothing() {
        let rules = RuleConfig {
            forfeit_on_bust: true,
            target_score: None,
        };
        let mut s = session(&[1, 2, 3, 4, 6, 6, 2, 3, 4, 6, 2], rules);
        s.register_player("ann", red()).unwrap();
        s.start_game().unwrap();
        s.roll().unwrap();
        s.keep(&[0]).unwrap();
        let outcome = s.roll().unwrap();
        assert!(outcome.bust);
        assert_eq!(outcome.forfeited, 100);
        let summary = s.end_turn().unwrap();
        assert_eq!(summary.banked_score, 0);
    }

    #[test]
    fn reaching_target_finishes_game() {
        let rules = RuleConfig {
            forfeit_on_bust: false,
            target_score: Some(2000),
        };
        let mut s = session(&[1, 1, 1, 5, 5, 5], rules);
        s.register_player("ann", red()).unwrap();
        s.register_player("bob", red()).unwrap();
        s.start_game().unwrap();
        s.roll().unwrap();
        s.keep(&[0, 1, 2, 3, 4, 5]).unwrap();
        let summary = s.end_turn().unwrap();
        assert_eq!(summary.winner, Some(0));
        assert_eq!(s.status(), SessionStatus::Finished { winner: 0 });
        assert!(matches!(s.roll(), Err(GameError::IllegalState(_))));
    }

    #[test]
    fn restart_clears_players() {
        let mut s = started(&["ann", "bob"], &[1]);
        s.roll().unwrap();
        s.keep(&[0]).unwrap();
        s.end_turn().unwrap();
        s.restart_game();
        assert_eq!(s.status(), SessionStatus::Registering);
        assert!(s.players().is_empty());
        assert_eq!(s.turn().provisional_score, 0);
        s.register_player("cy", red()).unwrap();
        s.start_game().unwrap();
        assert_eq!(s.current_player().unwrap().name(), "cy");
    }
}
