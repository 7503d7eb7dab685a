//! Session configuration, read from TOML.

use std::path::Path;

use chess_core::{Color, DrawRules};
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};
use crate::player::{Participant, PlayerId, Seats};

/// Who sits across the board from the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opponent {
    /// Practice: the local player moves both sides.
    Local,
    Bot,
    /// Online play; the other side's moves arrive as remote submissions.
    Remote,
}

/// What to do when a pawn reaches the last rank and no piece was named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionPolicy {
    /// Promote to a queen.
    AutoQueen,
    /// Reject the move as illegal.
    Explicit,
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub opponent: Opponent,
    /// Color of the local player (ignored in practice games).
    pub human_color: Color,
    /// Pause before the bot answers, in milliseconds
    pub bot_delay_ms: u64,
    /// Fixed seed for reproducible bot games (None = fresh entropy)
    pub bot_seed: Option<u64>,
    /// Id of the remote opponent, if known in advance
    pub remote_player: Option<String>,
    pub promotion: PromotionPolicy,
    pub draw_rules: DrawRules,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            opponent: Opponent::Bot,
            human_color: Color::White,
            bot_delay_ms: 500,
            bot_seed: None,
            remote_player: None,
            promotion: PromotionPolicy::AutoQueen,
            draw_rules: DrawRules::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(text: &str) -> SessionResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> SessionResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Seats for a game where `user` is the local player.
    pub fn seats(&self, user: &PlayerId) -> Seats {
        let me = Participant::Human(user.clone());
        let other = match self.opponent {
            Opponent::Local => {
                return Seats {
                    white: me.clone(),
                    black: me,
                }
            }
            Opponent::Bot => Participant::Bot,
            Opponent::Remote => Participant::Remote(
                self.remote_player
                    .clone()
                    .map(PlayerId::new)
                    .unwrap_or_else(PlayerId::anonymous),
            ),
        };
        match self.human_color {
            Color::White => Seats {
                white: me,
                black: other,
            },
            Color::Black => Seats {
                white: other,
                black: me,
            },
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
