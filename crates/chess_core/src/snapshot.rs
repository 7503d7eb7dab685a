//! Serialized forms of positions and game records.
//!
//! Positions serialize as a 64-entry board (`null` or `{"kind", "color"}`,
//! a1 first) plus metadata. Records serialize as their start position and
//! move list. Both are validated when read back: a snapshot that does not
//! describe a reachable state is an error, never a broken value.

use serde::{Deserialize, Serialize};

use crate::board::{CastlingRights, Position};
use crate::error::{invalid_state, ChessError};
use crate::record::GameRecord;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub board: Vec<Option<Piece>>,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl From<Position> for PositionSnapshot {
    fn from(pos: Position) -> Self {
        Self {
            board: pos.board.to_vec(),
            side_to_move: pos.side_to_move,
            castling: pos.castling,
            en_passant: pos.en_passant,
            halfmove_clock: pos.halfmove_clock,
            fullmove_number: pos.fullmove_number,
        }
    }
}

impl TryFrom<PositionSnapshot> for Position {
    type Error = ChessError;

    fn try_from(snap: PositionSnapshot) -> Result<Self, Self::Error> {
        let len = snap.board.len();
        let board: [Option<Piece>; 64] = snap
            .board
            .try_into()
            .map_err(|_| invalid_state(format!("board has {len} squares, expected 64")))?;
        Position::from_parts(
            board,
            snap.side_to_move,
            snap.castling,
            snap.en_passant,
            snap.halfmove_clock,
            snap.fullmove_number,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    pub start: Position,
    pub moves: Vec<Move>,
}

impl From<GameRecord> for RecordSnapshot {
    fn from(record: GameRecord) -> Self {
        Self {
            moves: record.moves().collect(),
            start: record.start().clone(),
        }
    }
}

impl TryFrom<RecordSnapshot> for GameRecord {
    type Error = ChessError;

    fn try_from(snap: RecordSnapshot) -> Result<Self, Self::Error> {
        GameRecord::from_moves(snap.start, snap.moves)
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod snapshot_tests;
