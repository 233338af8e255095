//! Bot self-play CLI.
//!
//! Plays games between greedy bots and outputs one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of games to play (default: 100)
//!   --players N      Bots per game, 1-6 (default: 2)
//!   --target N       Winning score (default: 10000)
//!   --bank-at N      Provisional score at which bots bank (default: 350)
//!   --no-forfeit     Keep provisional points on a bust
//!   --threads N      Number of parallel threads (default: 4)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hotdice::game::MAX_PLAYERS;
use hotdice::simulate::{self, SimConfig};

fn parse_arg<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SimConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = parse_arg(&args, i, "--games");
            }
            "--players" => {
                i += 1;
                config.players = parse_arg(&args, i, "--players");
            }
            "--target" => {
                i += 1;
                config.target_score = parse_arg(&args, i, "--target");
            }
            "--bank-at" => {
                i += 1;
                config.bank_at = parse_arg(&args, i, "--bank-at");
            }
            "--no-forfeit" => {
                config.forfeit_on_bust = false;
            }
            "--threads" => {
                i += 1;
                config.threads = parse_arg(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_arg(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(parse_arg(&args, i, "--output"));
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if config.players == 0 || config.players > MAX_PLAYERS {
        eprintln!("--players must be between 1 and {}", MAX_PLAYERS);
        process::exit(1);
    }

    let default_level = if config.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!(
        "Simulation: {} games, {} players, target {}, bank at {}, forfeit {}, {} threads",
        config.num_games,
        config.players,
        config.target_score,
        config.bank_at,
        config.forfeit_on_bust,
        config.threads
    );

    let start = Instant::now();
    let games = simulate::run_simulation(&config);
    let elapsed = start.elapsed();

    if !config.quiet {
        info!(
            "Completed {} games in {:.2}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        simulate::print_summary(&games, config.players);
    }

    let result = match output_path {
        Some(path) => match File::create(&path) {
            Ok(file) => {
                let mut writer = BufWriter::new(file);
                simulate::write_jsonl(&games, &mut writer)
                    .map(|_| info!("Wrote {} games to {}", games.len(), path))
            }
            Err(e) => Err(e),
        },
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            simulate::write_jsonl(&games, &mut writer)
        }
    };

    if let Err(e) = result {
        error!("failed to write output: {}", e);
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: simulate [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 100)");
    eprintln!("  --players N      Bots per game, 1-6 (default: 2)");
    eprintln!("  --target N       Winning score (default: 10000)");
    eprintln!("  --bank-at N      Provisional score at which bots bank (default: 350)");
    eprintln!("  --no-forfeit     Keep provisional points on a bust");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
