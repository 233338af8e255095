//! Rule configuration.

use std::collections::HashMap;

/// Option name toggling the bust-forfeit rule.
pub const OPT_FORFEIT_ON_BUST: &str = "ForfeitOnBust";
/// Option name for the winning score; 0 disables it.
pub const OPT_TARGET_SCORE: &str = "TargetScore";

/// House rules applied by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleConfig {
    /// A roll with no scoring dice wipes the provisional score and ends the turn.
    pub forfeit_on_bust: bool,
    /// Banking at least this many points wins the game.
    pub target_score: Option<u32>,
}

impl RuleConfig {
    /// Builds rules from string options, falling back to defaults for
    /// anything missing or unparseable.
    pub fn from_options(options: &HashMap<String, String>) -> Self {
        let forfeit_on_bust = options
            .get(OPT_FORFEIT_ON_BUST)
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);
        let target_score = options
            .get(OPT_TARGET_SCORE)
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&t| t > 0);
        RuleConfig {
            forfeit_on_bust,
            target_score,
        }
    }
}
