//! hotdice -- a Farkle-style dice game engine driven over a text protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to see them.

use std::io::{self, BufRead};

use tracing::error;
use tracing_subscriber::EnvFilter;

use hotdice::engine::Engine;
use hotdice::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let result = match cmd {
            Command::Hello => engine.handle_hello(&mut out),
            Command::IsReady => engine.handle_isready(&mut out),
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
                Ok(())
            }
            Command::NewGame => {
                engine.new_game();
                Ok(())
            }
            Command::Player { name, color } => engine.handle_player(&name, &color, &mut out),
            Command::Start => engine.handle_start(&mut out),
            Command::Roll => engine.handle_roll(&mut out),
            Command::Keep { indices } => engine.handle_keep(&indices, &mut out),
            Command::End => engine.handle_end(&mut out),
            Command::Score { values } => engine.handle_score(&values, &mut out),
            Command::Status => engine.handle_status(&mut out),
            Command::Restart => {
                engine.handle_restart();
                Ok(())
            }
            Command::Quit => break,
        };

        if let Err(e) = result {
            error!("failed to write response: {}", e);
            break;
        }
    }
}
