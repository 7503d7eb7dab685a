//! Error types for the rules core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Move;

/// Errors returned by the rules core. Every operation that fails leaves its
/// input untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The move is not in the legal move set of the position. Recoverable:
    /// callers report it as a rejected move.
    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: IllegalReason },

    /// Malformed or inconsistent board state (bad FEN, corrupt snapshot,
    /// impossible piece placement).
    #[error("invalid position: {0}")]
    InvalidState(String),

    /// A move was requested from a position that has none.
    #[error("no legal moves in this position")]
    NoLegalMoves,

    #[error("cannot parse move `{0}`")]
    InvalidMoveText(String),

    #[error("cannot parse square `{0}`")]
    InvalidSquare(String),
}

/// Why a move was found illegal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IllegalReason {
    #[error("there is no piece on the source square")]
    NoPiece,
    #[error("the piece belongs to the opponent")]
    NotYourPiece,
    #[error("a pawn reaching the last rank needs a promotion piece")]
    MissingPromotion,
    #[error("only a pawn reaching the last rank can promote")]
    UnexpectedPromotion,
    #[error("the move would leave the king in check")]
    LeavesKingInCheck,
    #[error("the piece cannot move there")]
    NotPseudoLegal,
}

pub type ChessResult<T> = Result<T, ChessError>;

pub(crate) fn invalid_state(msg: impl Into<String>) -> ChessError {
    ChessError::InvalidState(msg.into())
}
