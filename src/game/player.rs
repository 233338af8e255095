//! Player registration data.

use std::fmt;

use crate::error::GameError;

/// Most players a game supports.
pub const MAX_PLAYERS: usize = 6;
/// Longest allowed player name, in characters.
pub const MAX_NAME_LEN: usize = 5;

/// A player's display color as 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Color, GameError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GameError::invalid(format!("invalid color '{}'", s)));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| GameError::invalid(format!("invalid color '{}'", s)))
        };
        Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A registered player and their banked total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    name: String,
    pub color: Color,
    banked_score: u32,
}

impl PlayerState {
    /// Creates a player after trimming and validating the name.
    pub fn new(name: &str, color: Color) -> Result<PlayerState, GameError> {
        let name = name.trim();
        let len = name.chars().count();
        if len == 0 || len > MAX_NAME_LEN {
            return Err(GameError::invalid(format!(
                "player name must be 1 to {} characters",
                MAX_NAME_LEN
            )));
        }
        Ok(PlayerState {
            name: name.to_string(),
            color,
            banked_score: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn banked_score(&self) -> u32 {
        self.banked_score
    }

    pub(crate) fn bank(&mut self, points: u32) {
        self.banked_score += points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_parsing() {
        assert_eq!(Color::from_hex("#ff8000").unwrap(), Color::new(255, 128, 0));
        assert_eq!(Color::from_hex("00FF10").unwrap(), Color::new(0, 255, 16));
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn color_display_is_lowercase_hex() {
        assert_eq!(Color::new(255, 128, 0).to_string(), "#ff8000");
    }

    #[test]
    fn name_is_trimmed_and_bounded() {
        let red = Color::new(255, 0, 0);
        assert_eq!(PlayerState::new("  ann ", red).unwrap().name(), "ann");
        assert_eq!(PlayerState::new("abcde", red).unwrap().name(), "abcde");
        assert!(PlayerState::new("abcdef", red).is_err());
        assert!(PlayerState::new("   ", red).is_err());
        assert!(PlayerState::new("", red).is_err());
    }

    #[test]
    fn name_length_counts_characters() {
        assert!(PlayerState::new("ÅÄÖÜé", Color::new(0, 0, 0)).is_ok());
    }

    #[test]
    fn new_player_has_no_score() {
        let p = PlayerState::new("bo", Color::new(1, 2, 3)).unwrap();
        assert_eq!(p.banked_score(), 0);
        assert_eq!(p.color, Color::new(1, 2, 3));
    }
}
