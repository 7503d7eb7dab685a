//! Move application: deriving the next position from a legal move.

use crate::board::{Position, KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE};
use crate::error::{ChessError, ChessResult, IllegalReason};
use crate::movegen::{is_pseudo_legal, pseudo_legal_moves_from};
use crate::types::*;

/// Returns the position after `mv`, or [`ChessError::IllegalMove`] if `mv`
/// is not one of the legal moves of `pos`. `pos` itself is never modified.
pub fn apply(pos: &Position, mv: Move) -> ChessResult<Position> {
    if !is_pseudo_legal(pos, mv) {
        return Err(ChessError::IllegalMove {
            mv,
            reason: classify_rejection(pos, mv),
        });
    }
    let next = pos.play_unchecked(mv);
    if next.in_check(pos.side_to_move()) {
        return Err(ChessError::IllegalMove {
            mv,
            reason: IllegalReason::LeavesKingInCheck,
        });
    }
    Ok(next)
}

/// Explains why a move that is not pseudo-legal was refused.
fn classify_rejection(pos: &Position, mv: Move) -> IllegalReason {
    let pc = match pos.piece_at(mv.from) {
        None => return IllegalReason::NoPiece,
        Some(pc) if pc.color != pos.side_to_move() => return IllegalReason::NotYourPiece,
        Some(pc) => pc,
    };

    let reaches_last_rank =
        pc.kind == PieceKind::Pawn && mv.to.rank() == pc.color.promotion_rank();
    let same_path = |m: &Move| m.from == mv.from && m.to == mv.to;

    match mv.promo {
        None if reaches_last_rank => {
            // Only complain about the missing piece if the pawn could get there.
            if pseudo_legal_moves_from(pos, mv.from).iter().any(same_path) {
                IllegalReason::MissingPromotion
            } else {
                IllegalReason::NotPseudoLegal
            }
        }
        Some(_) if !reaches_last_rank => IllegalReason::UnexpectedPromotion,
        _ => IllegalReason::NotPseudoLegal,
    }
}

impl Position {
    /// See [`apply`].
    pub fn apply(&self, mv: Move) -> ChessResult<Position> {
        apply(self, mv)
    }

    /// Plays a pseudo-legal move without checking it.
    ///
    /// Castling and en passant are recognised from the move shape: a king
    /// moving two files castles, a pawn moving diagonally onto the empty
    /// en-passant square captures the pawn behind it.
    pub(crate) fn play_unchecked(&self, mv: Move) -> Position {
        let mut next = self.clone();
        let (from, to) = (mv.from, mv.to);
        let Some(moved) = self.piece_at(from) else {
            return next;
        };
        let mut captured = self.piece_at(to);

        next.en_passant = None;
        let mut reset_clock = moved.kind == PieceKind::Pawn || captured.is_some();

        if moved.kind == PieceKind::Pawn
            && captured.is_none()
            && from.file() != to.file()
            && self.en_passant == Some(to)
        {
            if let Some(victim) = to.offset(0, -moved.color.forward()) {
                captured = next.piece_at(victim);
                next.set_piece(victim, None);
                reset_clock = true;
            }
        }

        next.set_piece(from, None);
        let placed = match mv.promo {
            Some(kind)
                if moved.kind == PieceKind::Pawn && to.rank() == moved.color.promotion_rank() =>
            {
                Piece::new(moved.color, kind)
            }
            _ => moved,
        };
        next.set_piece(to, Some(placed));

        if moved.kind == PieceKind::King && (to.file() - from.file()).abs() == 2 {
            let (rook_file, rook_to_file) = if to.file() > from.file() {
                (KINGSIDE_ROOK_FILE, to.file() - 1)
            } else {
                (QUEENSIDE_ROOK_FILE, to.file() + 1)
            };
            let rook_from = Square::from_coords(rook_file, from.rank());
            let rook_to = Square::from_coords(rook_to_file, from.rank());
            if let (Some(rf), Some(rt)) = (rook_from, rook_to) {
                let rook = next.piece_at(rf);
                next.set_piece(rf, None);
                next.set_piece(rt, rook);
            }
        }

        if moved.kind == PieceKind::King {
            next.castling.clear(moved.color);
        }
        if moved.kind == PieceKind::Rook {
            next.castling.clear_rook_square(from);
        }
        if captured.is_some_and(|cp| cp.kind == PieceKind::Rook) {
            next.castling.clear_rook_square(to);
        }

        if moved.kind == PieceKind::Pawn && (to.rank() - from.rank()).abs() == 2 {
            next.en_passant = from.offset(0, moved.color.forward());
        }

        next.halfmove_clock = if reset_clock {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        // Counters read from FEN or a snapshot can sit at u32::MAX.
        if self.side_to_move == Color::Black {
            next.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        next.side_to_move = self.side_to_move.other();

        next
    }
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod apply_tests;
