//! Text protocol handling.
//!
//! A line-oriented command protocol lets a front end (or a test harness)
//! drive a session over stdin/stdout without linking the library.

pub mod parser;

pub use parser::{parse_command, Command};
