//! Legal move generation.
//!
//! Moves are first generated from the piece movement rules alone
//! (pseudo-legal), then every move that would leave the mover's own king
//! attacked is discarded. The result is a set: callers must not rely on the
//! order.

use crate::board::{
    Position, DIAGONALS, KINGSIDE_ROOK_FILE, KING_DELTAS, KING_FILE, KNIGHT_DELTAS, ORTHOGONALS,
    QUEENSIDE_ROOK_FILE,
};
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_legal_moves_into(pos, out);
    out.retain(|&mv| keeps_king_safe(pos, mv));
}

/// Legal moves of the piece standing on `from`; empty when the square is
/// empty or holds an opponent's piece.
pub fn legal_moves_from(pos: &Position, from: Square) -> Vec<Move> {
    let mut out = pseudo_legal_moves_from(pos, from);
    out.retain(|&mv| keeps_king_safe(pos, mv));
    out
}

pub fn is_legal(pos: &Position, mv: Move) -> bool {
    is_pseudo_legal(pos, mv) && keeps_king_safe(pos, mv)
}

pub fn has_legal_moves(pos: &Position) -> bool {
    let mut buf = Vec::with_capacity(32);
    pos.pieces()
        .filter(|(_, pc)| pc.color == pos.side_to_move())
        .any(|(sq, pc)| {
            buf.clear();
            piece_moves(pos, sq, pc, &mut buf);
            buf.iter().any(|&mv| keeps_king_safe(pos, mv))
        })
}

pub(crate) fn is_pseudo_legal(pos: &Position, mv: Move) -> bool {
    pseudo_legal_moves_from(pos, mv.from).contains(&mv)
}

pub(crate) fn pseudo_legal_moves_from(pos: &Position, from: Square) -> Vec<Move> {
    let mut out = Vec::with_capacity(32);
    if let Some(pc) = pos.piece_at(from) {
        if pc.color == pos.side_to_move() {
            piece_moves(pos, from, pc, &mut out);
        }
    }
    out
}

pub(crate) fn keeps_king_safe(pos: &Position, mv: Move) -> bool {
    let mover = pos.side_to_move();
    !pos.play_unchecked(mv).in_check(mover)
}

fn pseudo_legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    for (sq, pc) in pos.pieces() {
        if pc.color == pos.side_to_move() {
            piece_moves(pos, sq, pc, out);
        }
    }
}

fn piece_moves(pos: &Position, from: Square, pc: Piece, out: &mut Vec<Move>) {
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
        PieceKind::Knight => gen_steps(pos, from, pc.color, &KNIGHT_DELTAS, out),
        PieceKind::Bishop => gen_slider(pos, from, pc.color, &DIAGONALS, out),
        PieceKind::Rook => gen_slider(pos, from, pc.color, &ORTHOGONALS, out),
        PieceKind::Queen => {
            gen_slider(pos, from, pc.color, &DIAGONALS, out);
            gen_slider(pos, from, pc.color, &ORTHOGONALS, out);
        }
        PieceKind::King => {
            gen_steps(pos, from, pc.color, &KING_DELTAS, out);
            gen_castle(pos, from, pc.color, out);
        }
    }
}

fn push_pawn_move(from: Square, to: Square, c: Color, out: &mut Vec<Move>) {
    if to.rank() == c.promotion_rank() {
        out.extend(
            PieceKind::PROMOTIONS
                .iter()
                .map(|&kind| Move::with_promotion(from, to, kind)),
        );
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let dir = c.forward();
    let start_rank = c.back_rank() + dir;

    if let Some(to) = from.offset(0, dir) {
        if pos.piece_at(to).is_none() {
            push_pawn_move(from, to, c, out);

            if from.rank() == start_rank {
                if let Some(to2) = from.offset(0, 2 * dir) {
                    if pos.piece_at(to2).is_none() {
                        out.push(Move::new(from, to2));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, c, out),
            None if pos.en_passant() == Some(to) => out.push(Move::new(from, to)),
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: Square, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in dirs {
        let mut cur = from.offset(df, dr);
        while let Some(to) = cur {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != c {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            cur = to.offset(df, dr);
        }
    }
}

fn gen_castle(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let rank = c.back_rank();
    if from.file() != KING_FILE || from.rank() != rank {
        return;
    }
    // Can't castle out of check.
    if pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    let empty = |files: &[i8]| {
        files
            .iter()
            .all(|&f| Square::from_coords(f, rank).is_some_and(|s| pos.piece_at(s).is_none()))
    };
    let safe = |files: &[i8]| {
        files.iter().all(|&f| {
            Square::from_coords(f, rank).is_some_and(|s| !pos.is_square_attacked(s, enemy))
        })
    };
    let rook_home = |file: i8| {
        Square::from_coords(file, rank).and_then(|s| pos.piece_at(s))
            == Some(Piece::new(c, PieceKind::Rook))
    };

    // King side: king crosses f and lands on g.
    if pos.castling().kingside(c) && rook_home(KINGSIDE_ROOK_FILE) && empty(&[5, 6]) && safe(&[5, 6])
    {
        if let Some(to) = from.offset(2, 0) {
            out.push(Move::new(from, to));
        }
    }
    // Queen side: b must be empty too, but only d and c need to be safe.
    if pos.castling().queenside(c)
        && rook_home(QUEENSIDE_ROOK_FILE)
        && empty(&[1, 2, 3])
        && safe(&[2, 3])
    {
        if let Some(to) = from.offset(-2, 0) {
            out.push(Move::new(from, to));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
