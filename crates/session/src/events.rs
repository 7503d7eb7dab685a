use chess_core::{Color, IllegalReason, Move, Outcome};
use serde::{Deserialize, Serialize};

use crate::player::MoveOrigin;

/// A move that was accepted and applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlayed {
    /// One-based ply number in the game record.
    pub ply: usize,
    pub color: Color,
    pub mv: Move,
    pub san: String,
    pub origin: MoveOrigin,
    /// Position after the move, in FEN.
    pub fen: String,
    pub outcome: Outcome,
}

/// Why a submission was refused. The session is unchanged after any of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    Illegal(IllegalReason),
    Unparseable,
    NotYourTurn,
    GameOver,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Illegal(reason) => write!(f, "illegal move: {reason}"),
            RejectReason::Unparseable => f.write_str("not a move"),
            RejectReason::NotYourTurn => f.write_str("not your turn"),
            RejectReason::GameOver => f.write_str("the game is over"),
        }
    }
}

/// Result of submitting a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Submission {
    Accepted(MovePlayed),
    Rejected {
        attempted: String,
        reason: RejectReason,
    },
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }
}

/// Notifications published by the session driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    MovePlayed(MovePlayed),
    MoveRejected {
        attempted: String,
        reason: RejectReason,
        origin: MoveOrigin,
    },
    GameOver {
        outcome: Outcome,
    },
    Reset {
        fen: String,
    },
    TakenBack {
        plies: usize,
        fen: String,
    },
}
