use std::fmt;

use chess_core::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of an authenticated player. The session never looks
/// inside it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh id for a player who did not identify themselves.
    pub fn anonymous() -> Self {
        Self(format!("guest-{}", Uuid::new_v4().simple()))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who moves the pieces of one color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "player", rename_all = "snake_case")]
pub enum Participant {
    /// Plays on this machine.
    Human(PlayerId),
    /// Plays through the network; moves arrive as remote submissions.
    Remote(PlayerId),
    Bot,
}

impl Participant {
    pub fn is_bot(&self) -> bool {
        matches!(self, Participant::Bot)
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Human(id) => write!(f, "{id}"),
            Participant::Remote(id) => write!(f, "{id} (remote)"),
            Participant::Bot => f.write_str("bot"),
        }
    }
}

/// The two seats of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seats {
    pub white: Participant,
    pub black: Participant,
}

impl Seats {
    pub fn get(&self, color: Color) -> &Participant {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

/// Where a submitted move came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "player", rename_all = "snake_case")]
pub enum MoveOrigin {
    /// Typed or dropped on this machine.
    Local,
    Remote(PlayerId),
    Bot,
}

impl MoveOrigin {
    /// Whether a move from this origin may be played for `seat`.
    pub fn may_move(&self, seat: &Participant) -> bool {
        match (self, seat) {
            (MoveOrigin::Local, Participant::Human(_)) => true,
            (MoveOrigin::Remote(from), Participant::Remote(seated)) => from == seated,
            _ => false,
        }
    }
}
