//! Game outcome evaluation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::movegen::has_legal_moves;
use crate::record::GameRecord;
use crate::types::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::ThreefoldRepetition => "threefold repetition",
        })
    }
}

/// Status of a position from the point of view of the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    /// The side to move is in check but has a legal reply.
    Check,
    Checkmate { winner: Color },
    Stalemate,
    Draw { reason: DrawReason },
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Outcome::Checkmate { .. } | Outcome::Stalemate | Outcome::Draw { .. }
        )
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => f.write_str("in progress"),
            Outcome::Check => f.write_str("check"),
            Outcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            Outcome::Stalemate => f.write_str("stalemate"),
            Outcome::Draw { reason } => write!(f, "draw by {reason}"),
        }
    }
}

/// Which automatic draw rules apply. All are on by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawRules {
    pub fifty_move_rule: bool,
    pub insufficient_material: bool,
    pub threefold_repetition: bool,
}

impl Default for DrawRules {
    fn default() -> Self {
        Self {
            fifty_move_rule: true,
            insufficient_material: true,
            threefold_repetition: true,
        }
    }
}

impl DrawRules {
    pub const NONE: DrawRules = DrawRules {
        fifty_move_rule: false,
        insufficient_material: false,
        threefold_repetition: false,
    };
}

/// Evaluates `pos` with the default draw rules and no history, so
/// repetition is never reported.
pub fn evaluate(pos: &Position) -> Outcome {
    evaluate_with(pos, &DrawRules::default(), None)
}

/// Evaluates `pos`. Repetition needs `record`, whose current position is
/// expected to be `pos`. Checkmate and stalemate win over every draw rule.
pub fn evaluate_with(pos: &Position, rules: &DrawRules, record: Option<&GameRecord>) -> Outcome {
    let in_check = pos.is_check();
    if !has_legal_moves(pos) {
        return if in_check {
            Outcome::Checkmate {
                winner: pos.side_to_move().other(),
            }
        } else {
            Outcome::Stalemate
        };
    }

    if rules.insufficient_material && pos.is_insufficient_material() {
        return Outcome::Draw {
            reason: DrawReason::InsufficientMaterial,
        };
    }
    if rules.fifty_move_rule && pos.is_fifty_move_draw() {
        return Outcome::Draw {
            reason: DrawReason::FiftyMoveRule,
        };
    }
    if rules.threefold_repetition && record.is_some_and(|r| r.repetition_count() >= 3) {
        return Outcome::Draw {
            reason: DrawReason::ThreefoldRepetition,
        };
    }

    if in_check {
        Outcome::Check
    } else {
        Outcome::Ongoing
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod outcome_tests;
