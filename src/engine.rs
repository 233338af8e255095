//! Protocol-facing engine state.
//!
//! Holds the current session and the string options set by the client,
//! and turns each command into protocol response lines.

use std::collections::HashMap;
use std::io::{self, Write};

use tracing::warn;

use crate::dice::face::faces_from_values;
use crate::dice::RandomDice;
use crate::error::GameError;
use crate::game::config::{OPT_FORFEIT_ON_BUST, OPT_TARGET_SCORE};
use crate::game::{Color, RuleConfig, Session, SessionStatus};
use crate::scoring::{classify, score_histogram, Histogram};

/// Option name for the dice seed; 0 means entropy.
pub const OPT_SEED: &str = "Seed";

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub session: Session,
    pub options: HashMap<String, String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with default rules and entropy-seeded dice.
    pub fn new() -> Self {
        Engine {
            session: Session::with_random_dice(RuleConfig::default()),
            options: HashMap::new(),
        }
    }

    /// Replaces the session with a fresh one built from the current options.
    pub fn new_game(&mut self) {
        let rules = RuleConfig::from_options(&self.options);
        let seed = self
            .options
            .get(OPT_SEED)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        self.session = Session::new(rules, RandomDice::seeded(seed));
    }

    /// Sets an engine option. Takes effect on the next `newgame`.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Writes the handshake: id, options, protocol_version, and hotdiceok.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name hotdice")?;
        writeln!(out, "id author hotdice")?;
        writeln!(out, "option name {} type check default false", OPT_FORFEIT_ON_BUST)?;
        writeln!(
            out,
            "option name {} type spin default 0 min 0 max 1000000",
            OPT_TARGET_SCORE
        )?;
        writeln!(out, "option name {} type spin default 0", OPT_SEED)?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "hotdiceok")?;
        out.flush()
    }

    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    pub fn handle_player<W: Write>(&mut self, name: &str, color: &str, out: &mut W) -> io::Result<()> {
        let result = Color::from_hex(color)
            .and_then(|c| self.session.register_player(name, c).map(|p| (p.name().to_string(), p.color)));
        match result {
            Ok((name, color)) => {
                let n = self.session.players().len();
                writeln!(out, "player {} {} {}", n, name, color)?;
            }
            Err(e) => write_error(out, &e)?,
        }
        out.flush()
    }

    pub fn handle_start<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.session.start_game() {
            Ok(()) => self.write_turn(out)?,
            Err(e) => write_error(out, &e)?,
        }
        out.flush()
    }

    /// Writes `rolled <generation> <faces...>` with a trailing `bust` when
    /// nothing in the roll can score.
    pub fn handle_roll<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.session.roll() {
            Ok(outcome) => {
                let faces: Vec<String> = outcome
                    .roll
                    .faces()
                    .iter()
                    .map(|f| f.to_string())
                    .collect();
                write!(out, "rolled {} {}", outcome.roll.generation, faces.join(" "))?;
                if outcome.bust {
                    write!(out, " bust")?;
                }
                writeln!(out)?;
                if outcome.forfeited > 0 {
                    writeln!(out, "forfeit {}", outcome.forfeited)?;
                }
            }
            Err(e) => write_error(out, &e)?,
        }
        out.flush()
    }

    pub fn handle_keep<W: Write>(&mut self, indices: &[usize], out: &mut W) -> io::Result<()> {
        match self.session.keep(indices) {
            Ok(points) => {
                let turn = self.session.turn();
                writeln!(
                    out,
                    "kept {} turn {} remaining {}",
                    points, turn.provisional_score, turn.dice_remaining
                )?;
            }
            Err(e) => write_error(out, &e)?,
        }
        out.flush()
    }

    /// Writes `banked <player> <score> next <player>` (players are 1-based),
    /// or `winner <player> <score>` when the target score is reached.
    pub fn handle_end<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.session.end_turn() {
            Ok(summary) => match summary.winner {
                Some(w) => writeln!(out, "winner {} {}", w + 1, summary.banked_score)?,
                None => {
                    writeln!(
                        out,
                        "banked {} {} next {}",
                        summary.player + 1,
                        summary.banked_score,
                        summary.next_player + 1
                    )?;
                    self.write_turn(out)?;
                }
            },
            Err(e) => write_error(out, &e)?,
        }
        out.flush()
    }

    /// Writes `score <points> [<combination>...]` for the given faces.
    pub fn handle_score<W: Write>(&self, values: &[u8], out: &mut W) -> io::Result<()> {
        let result = faces_from_values(values).and_then(|faces| Histogram::from_faces(&faces));
        match result {
            Ok(hist) => {
                write!(out, "score {}", score_histogram(&hist))?;
                for c in &classify(&hist) {
                    write!(out, " {}", c)?;
                }
                writeln!(out)?;
            }
            Err(e) => write_error(out, &e)?,
        }
        out.flush()
    }

    pub fn handle_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let turn = self.session.turn();
        let state = match self.session.status() {
            SessionStatus::Registering => "registering".to_string(),
            SessionStatus::InProgress => "playing".to_string(),
            SessionStatus::Finished { winner } => format!("finished {}", winner + 1),
        };
        writeln!(
            out,
            "status {} player {} phase {} turn {} remaining {} generation {}",
            state,
            self.session.game().current + 1,
            turn.phase.name(),
            turn.provisional_score,
            turn.dice_remaining,
            turn.roll_generation
        )?;
        for (i, p) in self.session.players().iter().enumerate() {
            writeln!(out, "scoreboard {} {} {} {}", i + 1, p.name(), p.color, p.banked_score())?;
        }
        out.flush()
    }

    pub fn handle_restart(&mut self) {
        self.session.restart_game();
    }

    fn write_turn<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(p) = self.session.current_player() {
            writeln!(out, "turn {} {}", self.session.game().current + 1, p.name())?;
        }
        Ok(())
    }
}

fn write_error<W: Write>(out: &mut W, err: &GameError) -> io::Result<()> {
    warn!("command rejected: {}", err);
    writeln!(out, "error {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn seeded_engine() -> Engine {
        let mut engine = Engine::new();
        engine.set_option(OPT_SEED.to_string(), Some("42".to_string()));
        engine.new_game();
        engine
    }

    #[test]
    fn new_engine_has_no_players() {
        let engine = Engine::new();
        assert!(engine.session.players().is_empty());
        assert!(engine.options.is_empty());
    }

    #[test]
    fn set_option_stores_value() {
        let mut engine = Engine::new();
        engine.set_option("TargetScore".to_string(), Some("5000".to_string()));
        engine.set_option("ForfeitOnBust".to_string(), None);
        assert_eq!(engine.options.get("TargetScore"), Some(&"5000".to_string()));
        assert_eq!(engine.options.get("ForfeitOnBust"), Some(&String::new()));
    }

    #[test]
    fn new_game_applies_rule_options() {
        let mut engine = Engine::new();
        engine.set_option("TargetScore".to_string(), Some("5000".to_string()));
        engine.set_option("ForfeitOnBust".to_string(), Some("true".to_string()));
        engine.new_game();
        let rules = engine.session.rules();
        assert_eq!(rules.target_score, Some(5000));
        assert!(rules.forfeit_on_bust);
    }

    #[test]
    fn hello_outputs_handshake() {
        let engine = Engine::new();
        let out = output(|o| engine.handle_hello(o));
        assert!(out.contains("id name hotdice"));
        assert!(out.contains("protocol_version 1"));
        assert_eq!(out.lines().last(), Some("hotdiceok"));
    }

    #[test]
    fn isready_outputs_readyok() {
        let engine = Engine::new();
        assert_eq!(output(|o| engine.handle_isready(o)).trim(), "readyok");
    }

    #[test]
    fn player_registration_output() {
        let mut engine = seeded_engine();
        let out = output(|o| engine.handle_player("ann", "#FF0000", o));
        assert_eq!(out.trim(), "player 1 ann #ff0000");
        let out = output(|o| engine.handle_player("ann", "red", o));
        assert!(out.starts_with("error invalid input"));
        let out = output(|o| engine.handle_player("toolong", "#00ff00", o));
        assert!(out.starts_with("error invalid input"));
    }

    #[test]
    fn start_announces_first_turn() {
        let mut engine = seeded_engine();
        output(|o| engine.handle_player("ann", "#ff0000", o));
        assert_eq!(output(|o| engine.handle_start(o)).trim(), "turn 1 ann");
    }

    #[test]
    fn roll_before_start_is_an_error() {
        let mut engine = seeded_engine();
        let out = output(|o| engine.handle_roll(o));
        assert!(out.starts_with("error illegal state"));
    }

    #[test]
    fn roll_outputs_six_faces() {
        let mut engine = seeded_engine();
        output(|o| engine.handle_player("ann", "#ff0000", o));
        output(|o| engine.handle_start(o));
        let out = output(|o| engine.handle_roll(o));
        let line = out.lines().next().unwrap();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(tokens[0], "rolled");
        assert_eq!(tokens[1], "1");
        let faces: Vec<u8> = tokens[2..8].iter().map(|t| t.parse().unwrap()).collect();
        assert!(faces.iter().all(|f| (1..=6).contains(f)));
    }

    #[test]
    fn empty_keep_reports_nothing_selected() {
        let mut engine = seeded_engine();
        output(|o| engine.handle_player("ann", "#ff0000", o));
        output(|o| engine.handle_start(o));
        output(|o| engine.handle_roll(o));
        let out = output(|o| engine.handle_keep(&[], o));
        assert_eq!(out.trim(), "error no dice selected");
        assert_eq!(engine.session.turn().dice_remaining, 6);
    }

    #[test]
    fn end_turn_rotates_players() {
        let mut engine = seeded_engine();
        output(|o| engine.handle_player("ann", "#ff0000", o));
        output(|o| engine.handle_player("bob", "#0000ff", o));
        output(|o| engine.handle_start(o));
        let out = output(|o| engine.handle_end(o));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["banked 1 0 next 2", "turn 2 bob"]);
    }

    #[test]
    fn score_lists_combinations() {
        let engine = Engine::new();
        let out = output(|o| engine.handle_score(&[1, 1, 1, 5, 5, 5], o));
        assert_eq!(out.trim(), "score 2500 two-triplets:1,5");
        let out = output(|o| engine.handle_score(&[2, 2, 2, 2, 1, 1], o));
        assert_eq!(out.trim(), "score 1700 pair:1 quad-pair:2,1");
        let out = output(|o| engine.handle_score(&[2, 3], o));
        assert_eq!(out.trim(), "score 0");
        let out = output(|o| engine.handle_score(&[7], o));
        assert!(out.starts_with("error invalid input"));
    }

    #[test]
    fn status_lists_scoreboard() {
        let mut engine = seeded_engine();
        output(|o| engine.handle_player("ann", "#ff0000", o));
        let out = output(|o| engine.handle_status(o));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            "status registering player 1 phase idle turn 0 remaining 6 generation 0"
        );
        assert_eq!(lines[1], "scoreboard 1 ann #ff0000 0");
    }
}
