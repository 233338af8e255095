//! Bot self-play for rule statistics.
//!
//! Plays complete games between greedy bots on seeded dice and records the
//! outcome of each game. Games run in parallel with rayon when more than one
//! thread is configured.

use std::io::Write;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::dice::{Face, RandomDice, Roll};
use crate::error::GameError;
use crate::game::{Color, RuleConfig, Session, SessionStatus};
use crate::scoring::score;
use crate::turn::TurnPhase;

const BOT_NAMES: [&str; 6] = ["bot1", "bot2", "bot3", "bot4", "bot5", "bot6"];
const BOT_COLOR: Color = Color::new(0x33, 0x99, 0xff);

/// Configuration for simulated games.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub num_games: usize,
    /// Bots per game, 1..=6.
    pub players: usize,
    pub target_score: u32,
    pub forfeit_on_bust: bool,
    /// A bot banks once its provisional score reaches this.
    pub bank_at: u32,
    /// Rounds before a game is abandoned without a winner.
    pub max_rounds: u32,
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            num_games: 100,
            players: 2,
            target_score: 10_000,
            forfeit_on_bust: true,
            bank_at: 350,
            max_rounds: 500,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Outcome of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    /// One-based winning player, if the game finished.
    pub winner: Option<usize>,
    pub turns: u32,
    pub rolls: u32,
    pub busts: u32,
    pub final_scores: Vec<u32>,
}

/// Picks the highest-scoring subset of a roll.
///
/// Ties go to the subset using fewer dice, leaving more to roll. Returns
/// `None` when nothing in the roll scores.
pub fn best_keep(roll: &Roll) -> Option<(Vec<usize>, u32)> {
    let faces = roll.faces();
    let n = faces.len();
    let mut best: Option<(Vec<usize>, u32)> = None;

    for mask in 1u32..(1 << n) {
        let indices: Vec<usize> = (0..n).filter(|i| mask & (1 << i) != 0).collect();
        let subset: Vec<Face> = indices.iter().map(|&i| faces[i]).collect();
        let points = match score(&subset) {
            Ok(p) if p > 0 => p,
            _ => continue,
        };
        let better = match &best {
            None => true,
            Some((b_idx, b_pts)) => {
                points > *b_pts || (points == *b_pts && indices.len() < b_idx.len())
            }
        };
        if better {
            best = Some((indices, points));
        }
    }
    best
}

/// Plays one game to completion or until `max_rounds` is exhausted.
pub fn play_game(config: &SimConfig, game_id: usize, rng: SmallRng) -> Result<GameRecord, GameError> {
    let rules = RuleConfig {
        forfeit_on_bust: config.forfeit_on_bust,
        target_score: Some(config.target_score),
    };
    let mut session = Session::new(rules, RandomDice::new(rng));
    for name in BOT_NAMES.iter().take(config.players) {
        session.register_player(name, BOT_COLOR)?;
    }
    session.start_game()?;

    let max_turns = config.max_rounds * config.players as u32;
    let mut record = GameRecord {
        game_id,
        winner: None,
        turns: 0,
        rolls: 0,
        busts: 0,
        final_scores: Vec::new(),
    };

    while record.turns < max_turns {
        play_turn(&mut session, config, &mut record)?;
        let summary = session.end_turn()?;
        record.turns += 1;
        if let Some(w) = summary.winner {
            record.winner = Some(w + 1);
            break;
        }
    }

    if session.status() == SessionStatus::InProgress {
        warn!(game_id, turns = record.turns, "game abandoned without a winner");
    }
    record.final_scores = session.players().iter().map(|p| p.banked_score()).collect();
    Ok(record)
}

/// Rolls and keeps until the bot decides to bank or the roll busts.
fn play_turn(
    session: &mut Session<RandomDice>,
    config: &SimConfig,
    record: &mut GameRecord,
) -> Result<(), GameError> {
    loop {
        let outcome = session.roll()?;
        record.rolls += 1;
        if outcome.bust {
            record.busts += 1;
            if session.turn().phase != TurnPhase::TurnEnded {
                // Without the forfeit rule a bust still has to keep something.
                session.keep(&[0])?;
            }
            return Ok(());
        }

        if let Some((indices, _)) = best_keep(&outcome.roll) {
            session.keep(&indices)?;
        }

        let turn = session.turn();
        let hot_dice = turn.dice_remaining == 0;
        if !hot_dice && turn.provisional_score >= config.bank_at {
            return Ok(());
        }
        if !hot_dice && turn.dice_remaining < 3 && turn.provisional_score > 0 {
            return Ok(());
        }
    }
}

fn game_rng(config: &SimConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn play_logged(config: &SimConfig, game_id: usize) -> Option<GameRecord> {
    let start = Instant::now();
    match play_game(config, game_id, game_rng(config, game_id)) {
        Ok(game) => {
            if !config.quiet {
                info!(
                    "Game {}/{}: winner {:?} after {} turns ({:.3}s)",
                    game_id + 1,
                    config.num_games,
                    game.winner,
                    game.turns,
                    start.elapsed().as_secs_f64()
                );
            }
            Some(game)
        }
        Err(e) => {
            warn!(game_id, "game failed: {}", e);
            None
        }
    }
}

/// Runs all configured games and returns their records in game order.
pub fn run_simulation(config: &SimConfig) -> Vec<GameRecord> {
    if config.threads > 1 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
        {
            Ok(pool) => {
                return pool.install(|| {
                    (0..config.num_games)
                        .into_par_iter()
                        .filter_map(|i| play_logged(config, i))
                        .collect()
                })
            }
            Err(e) => warn!("failed to build thread pool, running sequentially: {}", e),
        }
    }
    (0..config.num_games)
        .filter_map(|i| play_logged(config, i))
        .collect()
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints win rates and averages to stderr.
pub fn print_summary(games: &[GameRecord], players: usize) {
    let total = games.len();
    if total == 0 {
        eprintln!("No games played.");
        return;
    }
    let mut wins = vec![0usize; players];
    let mut unfinished = 0;
    for game in games {
        match game.winner {
            Some(w) if w >= 1 && w <= players => wins[w - 1] += 1,
            _ => unfinished += 1,
        }
    }
    let turns: u64 = games.iter().map(|g| g.turns as u64).sum();
    let rolls: u64 = games.iter().map(|g| g.rolls as u64).sum();
    let busts: u64 = games.iter().map(|g| g.busts as u64).sum();

    eprintln!("=== Simulation Summary ===");
    eprintln!("Games: {}", total);
    eprintln!("Unfinished: {}", unfinished);
    eprintln!("Average turns: {:.1}", turns as f64 / total as f64);
    if rolls > 0 {
        eprintln!("Bust rate: {:.1}%", busts as f64 / rolls as f64 * 100.0);
    }
    eprintln!("Win distribution:");
    for (i, w) in wins.iter().enumerate() {
        eprintln!(
            "  {}: {} ({:.1}%)",
            BOT_NAMES[i],
            w,
            *w as f64 / total as f64 * 100.0
        );
    }
}
