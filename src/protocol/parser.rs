//! Command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the driver loop can dispatch on.

use tracing::warn;

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Discard the session and build a new one from the current options.
    NewGame,

    /// Register a player: `player <name> <#rrggbb>`.
    Player { name: String, color: String },

    Start,

    Roll,

    /// Keep dice from the current roll by zero-based index.
    Keep { indices: Vec<usize> },

    /// Bank the provisional score and pass to the next player.
    End,

    /// Price a set of faces without touching the session.
    Score { values: Vec<u8> },

    Status,

    Restart,

    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "hotdice" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "start" => Some(Command::Start),
        "roll" => Some(Command::Roll),
        "end" => Some(Command::End),
        "status" => Some(Command::Status),
        "restart" => Some(Command::Restart),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(args),
        "player" => parse_player(args),
        "keep" => parse_keep(args),
        "score" => parse_score(args),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let (name_parts, value_parts) = match args.iter().position(|&t| t == "value") {
        Some(vi) => (&args[1..vi], Some(&args[vi + 1..])),
        None => (&args[1..], None),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }

    let name = name_parts.join(" ");
    let value = value_parts
        .filter(|parts| !parts.is_empty())
        .map(|parts| parts.join(" "));
    Some(Command::SetOption { name, value })
}

/// Parses `player <name> <color>`.
fn parse_player(args: &[&str]) -> Option<Command> {
    match args {
        [name, color] => Some(Command::Player {
            name: name.to_string(),
            color: color.to_string(),
        }),
        _ => {
            warn!("malformed player: expected 'player <name> <#rrggbb>'");
            None
        }
    }
}

/// Parses `keep [<index>...]`. An empty list is passed through so the
/// session can report that nothing was selected.
fn parse_keep(args: &[&str]) -> Option<Command> {
    let mut indices = Vec::with_capacity(args.len());
    for tok in args {
        match tok.parse::<usize>() {
            Ok(i) => indices.push(i),
            Err(_) => {
                warn!("invalid die index: '{}'", tok);
                return None;
            }
        }
    }
    Some(Command::Keep { indices })
}

/// Parses `score <value>...`. Range checks are left to the scoring engine.
fn parse_score(args: &[&str]) -> Option<Command> {
    if args.is_empty() {
        warn!("malformed score: expected 'score <value>...'");
        return None;
    }
    let mut values = Vec::with_capacity(args.len());
    for tok in args {
        match tok.parse::<u8>() {
            Ok(v) => values.push(v),
            Err(_) => {
                warn!("invalid die value: '{}'", tok);
                return None;
            }
        }
    }
    Some(Command::Score { values })
}
