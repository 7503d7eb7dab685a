//! Game history: the start position and every ply played since.

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::ChessResult;
use crate::notation::san;
use crate::snapshot::RecordSnapshot;
use crate::types::Move;

/// One half-move as it was played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ply {
    pub mv: Move,
    /// Standard algebraic notation, rendered against the position before the move.
    pub san: String,
    /// Repetition key of the position after the move.
    pub key: u64,
}

/// Append-only move history.
///
/// The record only grows through [`GameRecord::play`]; taking moves back
/// yields a shorter copy through [`GameRecord::truncated`]. It serializes as
/// the start position plus the move list and is replayed, so every move is
/// checked again when a record is loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RecordSnapshot", try_from = "RecordSnapshot")]
pub struct GameRecord {
    start: Position,
    plies: Vec<Ply>,
    // positions[i] is the position after plies[i]
    positions: Vec<Position>,
}

impl GameRecord {
    pub fn new(start: Position) -> Self {
        Self {
            start,
            plies: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Replays `moves` from `start`, failing on the first illegal one.
    pub fn from_moves(start: Position, moves: impl IntoIterator<Item = Move>) -> ChessResult<Self> {
        let mut record = Self::new(start);
        for mv in moves {
            record.play(mv)?;
        }
        Ok(record)
    }

    pub fn start(&self) -> &Position {
        &self.start
    }

    /// The position after the last ply.
    pub fn position(&self) -> &Position {
        self.positions.last().unwrap_or(&self.start)
    }

    pub fn plies(&self) -> &[Ply] {
        &self.plies
    }

    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.plies.iter().map(|p| p.mv)
    }

    pub fn last_move(&self) -> Option<Move> {
        self.plies.last().map(|p| p.mv)
    }

    pub fn len(&self) -> usize {
        self.plies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    /// Applies `mv` to the current position and appends it.
    pub fn play(&mut self, mv: Move) -> ChessResult<&Ply> {
        let before = self.position();
        let next = before.apply(mv)?;
        let ply = Ply {
            mv,
            san: san(before, mv)?,
            key: next.key(),
        };
        self.plies.push(ply);
        self.positions.push(next);
        Ok(&self.plies[self.plies.len() - 1])
    }

    /// Copy of the record holding only the first `len` plies.
    pub fn truncated(&self, len: usize) -> GameRecord {
        let len = len.min(self.plies.len());
        GameRecord {
            start: self.start.clone(),
            plies: self.plies[..len].to_vec(),
            positions: self.positions[..len].to_vec(),
        }
    }

    /// How many times the current position has occurred, counting the
    /// start position and the current one.
    pub fn repetition_count(&self) -> usize {
        let current = self.position().key();
        let earlier = self.plies.iter().filter(|p| p.key == current).count();
        let start = usize::from(self.start.key() == current);
        if self.plies.is_empty() {
            1
        } else {
            earlier + start
        }
    }

    /// Move list in the usual `1. e4 e5 2. Nf3` layout.
    pub fn movetext(&self) -> String {
        let mut out = String::new();
        let mut number = self.start.fullmove_number();
        let mut white = self.start.side_to_move() == crate::types::Color::White;
        for (i, ply) in self.plies.iter().enumerate() {
            if white {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&format!("{number}. {}", ply.san));
            } else {
                if i == 0 {
                    out.push_str(&format!("{number}... {}", ply.san));
                } else {
                    out.push(' ');
                    out.push_str(&ply.san);
                }
                number += 1;
            }
            white = !white;
        }
        out
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
