//! Standard algebraic notation (SAN) and move text parsing.

use crate::board::Position;
use crate::error::{ChessError, ChessResult};
use crate::movegen::{has_legal_moves, legal_moves};
use crate::types::*;

/// Renders a legal move in SAN (`Nf3`, `exd5`, `O-O`, `e8=Q+`, `Qh4#`).
pub fn san(pos: &Position, mv: Move) -> ChessResult<String> {
    let next = pos.apply(mv)?;
    let mut out = san_body(pos, mv);
    if next.is_check() {
        out.push(if has_legal_moves(&next) { '+' } else { '#' });
    }
    Ok(out)
}

fn san_body(pos: &Position, mv: Move) -> String {
    let Some(pc) = pos.piece_at(mv.from) else {
        return mv.to_string();
    };

    if pc.kind == PieceKind::King && (mv.to.file() - mv.from.file()).abs() == 2 {
        return if mv.to.file() > mv.from.file() {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        };
    }

    let mut out = String::with_capacity(8);
    let capture = pos.piece_at(mv.to).is_some()
        || (pc.kind == PieceKind::Pawn && mv.from.file() != mv.to.file());

    if pc.kind == PieceKind::Pawn {
        if capture {
            out.push(file_char(mv.from));
        }
    } else {
        out.push(pc.kind.to_char().to_ascii_uppercase());

        let rivals: Vec<Move> = legal_moves(pos)
            .into_iter()
            .filter(|m| {
                m.to == mv.to && m.from != mv.from && pos.piece_at(m.from) == Some(pc)
            })
            .collect();
        if !rivals.is_empty() {
            let same_file = rivals.iter().any(|m| m.from.file() == mv.from.file());
            let same_rank = rivals.iter().any(|m| m.from.rank() == mv.from.rank());
            if !same_file {
                out.push(file_char(mv.from));
            } else if !same_rank {
                out.push(rank_char(mv.from));
            } else {
                out.push(file_char(mv.from));
                out.push(rank_char(mv.from));
            }
        }
    }

    if capture {
        out.push('x');
    }
    out.push_str(&mv.to.to_string());

    if let Some(kind) = mv.promo {
        out.push('=');
        out.push(kind.to_char().to_ascii_uppercase());
    }
    out
}

fn file_char(sq: Square) -> char {
    (b'a' + sq.file() as u8) as char
}

fn rank_char(sq: Square) -> char {
    (b'1' + sq.rank() as u8) as char
}

/// Reads a move typed by a player, in long algebraic (`e2e4`, `e7e8q`) or
/// SAN (`e4`, `Nxf3`, `O-O`, `e8=Q`).
///
/// Long algebraic text is returned as written, legal or not, so the caller
/// gets a precise rejection when it is applied. SAN only resolves against the
/// legal moves of `pos`. A SAN pawn move to the last rank without a piece
/// (`e8`) comes back without a promotion.
pub fn parse_move(pos: &Position, text: &str) -> ChessResult<Move> {
    let text = text.trim();
    if let Ok(mv) = text.parse::<Move>() {
        return Ok(mv);
    }

    let wanted = normalize(text);
    if wanted.is_empty() {
        return Err(ChessError::InvalidMoveText(text.to_string()));
    }
    let wanted = match wanted.as_str() {
        "00" => "OO".to_string(),
        "000" => "OOO".to_string(),
        _ => wanted,
    };

    let candidates: Vec<Move> = legal_moves(pos)
        .into_iter()
        .filter(|&m| {
            let body = normalize(&san_body(pos, m));
            body == wanted || (m.promo.is_some() && strip_promotion(&body) == wanted)
        })
        .collect();

    match candidates.as_slice() {
        [mv] => Ok(*mv),
        [] => Err(ChessError::InvalidMoveText(text.to_string())),
        [first, rest @ ..] => {
            // Only the promotion piece is missing.
            if rest.iter().all(|m| m.from == first.from && m.to == first.to) {
                Ok(Move::new(first.from, first.to))
            } else {
                Err(ChessError::InvalidMoveText(text.to_string()))
            }
        }
    }
}

/// Drops decorations that carry no information for matching.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '+' | '#' | '!' | '?' | '=' | '-'))
        .collect()
}

fn strip_promotion(body: &str) -> &str {
    match body.char_indices().last() {
        Some((i, c)) if matches!(c, 'Q' | 'R' | 'B' | 'N') => &body[..i],
        _ => body,
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
