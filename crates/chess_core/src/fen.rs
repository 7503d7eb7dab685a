//! Forsyth-Edwards Notation import and export.

use crate::board::{CastlingRights, Position};
use crate::error::{invalid_state, ChessResult};
use crate::types::*;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parses a FEN string. The clock fields may be omitted (they default to
    /// `0 1`), which is how most perft suites write their positions.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&parts.len()) {
            return Err(invalid_state(format!(
                "FEN needs 4 to 6 fields, found {}",
                parts.len()
            )));
        }

        let board = parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(invalid_state(format!("bad side to move `{other}`"))),
        };

        let mut castling = CastlingRights::NONE;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(invalid_state(format!("bad castling field `{}`", parts[2]))),
                }
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            text => Some(
                text.parse::<Square>()
                    .map_err(|_| invalid_state(format!("bad en-passant square `{text}`")))?,
            ),
        };

        let halfmove_clock = parse_counter(parts.get(4).copied().unwrap_or("0"), "halfmove clock")?;
        let fullmove_number =
            parse_counter(parts.get(5).copied().unwrap_or("1"), "fullmove number")?;

        Position::from_parts(
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        )
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);

        for rank in (0..8).rev() {
            let mut empty = 0u8;
            for file in 0..8 {
                match self.piece_at(Square::at(file, rank)) {
                    None => empty += 1,
                    Some(pc) => {
                        if empty > 0 {
                            out.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                }
            }
            if empty > 0 {
                out.push((b'0' + empty) as char);
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        if self.castling.is_empty() {
            out.push('-');
        } else {
            for (allowed, c) in [
                (self.castling.wk, 'K'),
                (self.castling.wq, 'Q'),
                (self.castling.bk, 'k'),
                (self.castling.bq, 'q'),
            ] {
                if allowed {
                    out.push(c);
                }
            }
        }

        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}

fn parse_placement(text: &str) -> ChessResult<[Option<Piece>; 64]> {
    let ranks: Vec<&str> = text.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid_state(format!(
            "placement needs 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut board = [None; 64];
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        // FEN lists rank 8 first.
        let rank = 7 - rank_idx as i8;
        let mut file: i8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += d as i8;
            } else {
                let pc = Piece::from_fen_char(ch)
                    .ok_or_else(|| invalid_state(format!("bad piece character `{ch}`")))?;
                let sq = Square::from_coords(file, rank)
                    .ok_or_else(|| invalid_state(format!("rank {} is too long", rank + 1)))?;
                board[sq.index()] = Some(pc);
                file += 1;
            }
            if file > 8 {
                return Err(invalid_state(format!("rank {} is too long", rank + 1)));
            }
        }
        if file != 8 {
            return Err(invalid_state(format!("rank {} is too short", rank + 1)));
        }
    }
    Ok(board)
}

fn parse_counter(text: &str, what: &str) -> ChessResult<u32> {
    text.parse()
        .map_err(|_| invalid_state(format!("bad {what} `{text}`")))
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
