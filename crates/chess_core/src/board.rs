use serde::{Deserialize, Serialize};

use crate::error::{invalid_state, ChessResult};
use crate::snapshot::PositionSnapshot;
use crate::types::*;

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Files of the king and the two rooks before they have moved.
pub(crate) const KING_FILE: i8 = 4;
pub(crate) const KINGSIDE_ROOK_FILE: i8 = 7;
pub(crate) const QUEENSIDE_ROOK_FILE: i8 = 0;

/// Which castling moves are still permitted by the game's history.
///
/// A right is lost for good once the king or the corresponding rook moves,
/// or the rook is captured on its home square. Temporary obstacles (pieces
/// in between, attacked squares) are checked during move generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    pub fn kingside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wk,
            Color::Black => self.bk,
        }
    }

    pub fn queenside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wq,
            Color::Black => self.bq,
        }
    }

    pub(crate) fn clear(&mut self, c: Color) {
        match c {
            Color::White => {
                self.wk = false;
                self.wq = false;
            }
            Color::Black => {
                self.bk = false;
                self.bq = false;
            }
        }
    }

    /// Drops the right tied to a rook on `sq`, if `sq` is a rook home square.
    pub(crate) fn clear_rook_square(&mut self, sq: Square) {
        match (sq.file(), sq.rank()) {
            (QUEENSIDE_ROOK_FILE, 0) => self.wq = false,
            (KINGSIDE_ROOK_FILE, 0) => self.wk = false,
            (QUEENSIDE_ROOK_FILE, 7) => self.bq = false,
            (KINGSIDE_ROOK_FILE, 7) => self.bk = false,
            _ => {}
        }
    }

    /// Four-bit mask in KQkq order.
    pub fn bits(&self) -> usize {
        (self.wk as usize) | (self.wq as usize) << 1 | (self.bk as usize) << 2 | (self.bq as usize) << 3
    }

    pub fn is_empty(&self) -> bool {
        self.bits() == 0
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

/// A complete board state: piece placement plus the metadata the rules
/// need (side to move, castling rights, en-passant target, clocks).
///
/// A `Position` can only be built through validating constructors, and the
/// only way to advance one is [`Position::apply`], which returns a new value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "PositionSnapshot", try_from = "PositionSnapshot")]
pub struct Position {
    pub(crate) board: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    /// Square behind a pawn that advanced two squares on the previous ply.
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Position {
    pub fn startpos() -> Self {
        let mut board = [None; 64];
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            board[f] = Some(Piece::new(Color::White, kind));
            board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board[56 + f] = Some(Piece::new(Color::Black, kind));
        }

        Position {
            board,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Builds a position from its parts, rejecting anything that could not
    /// arise in a legal game (see [`Position::validate`]).
    pub fn from_parts(
        board: [Option<Piece>; 64],
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> ChessResult<Self> {
        let pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        };
        pos.validate()?;
        Ok(pos)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    pub(crate) fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.board[sq.index()] = pc;
    }

    pub fn board(&self) -> &[Option<Piece>; 64] {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// All occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.in_check(self.side_to_move)
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let holds = |sq: Option<Square>, kinds: &[PieceKind]| {
            sq.and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A pawn of `by` attacks `target` from one rank behind it (from `by`'s view).
        let back = -by.forward();
        if holds(target.offset(-1, back), &[PieceKind::Pawn])
            || holds(target.offset(1, back), &[PieceKind::Pawn])
        {
            return true;
        }

        if KNIGHT_DELTAS
            .iter()
            .any(|&(df, dr)| holds(target.offset(df, dr), &[PieceKind::Knight]))
        {
            return true;
        }

        if KING_DELTAS
            .iter()
            .any(|&(df, dr)| holds(target.offset(df, dr), &[PieceKind::King]))
        {
            return true;
        }

        let slides = |dirs: &[(i8, i8)], kinds: &[PieceKind]| {
            dirs.iter().any(|&(df, dr)| {
                let mut cur = target.offset(df, dr);
                while let Some(s) = cur {
                    if let Some(pc) = self.piece_at(s) {
                        return pc.color == by && kinds.contains(&pc.kind);
                    }
                    cur = s.offset(df, dr);
                }
                false
            })
        };

        slides(&DIAGONALS, &[PieceKind::Bishop, PieceKind::Queen])
            || slides(&ORTHOGONALS, &[PieceKind::Rook, PieceKind::Queen])
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly deliver mate: bare kings, a single minor
    /// piece, or only bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut light_bishops = 0;
        let mut dark_bishops = 0;

        for (sq, pc) in self.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    if sq.is_light() {
                        light_bishops += 1;
                    } else {
                        dark_bishops += 1;
                    }
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }

        if minors <= 1 {
            return true;
        }
        knights == 0 && (light_bishops == 0 || dark_bishops == 0)
    }

    /// Checks the structural invariants a position must satisfy.
    pub fn validate(&self) -> ChessResult<()> {
        for c in [Color::White, Color::Black] {
            let kings = self
                .pieces()
                .filter(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(invalid_state(format!("{c} has {kings} kings, expected 1")));
            }
        }

        if let Some((sq, _)) = self
            .pieces()
            .find(|(sq, pc)| pc.kind == PieceKind::Pawn && (sq.rank() == 0 || sq.rank() == 7))
        {
            return Err(invalid_state(format!("pawn on back rank square {sq}")));
        }

        if self.in_check(self.side_to_move.other()) {
            return Err(invalid_state(format!(
                "{} is in check but it is {} to move",
                self.side_to_move.other(),
                self.side_to_move
            )));
        }

        self.validate_castling()?;
        self.validate_en_passant()?;

        if self.fullmove_number == 0 {
            return Err(invalid_state("fullmove number must start at 1"));
        }

        Ok(())
    }

    fn validate_castling(&self) -> ChessResult<()> {
        for c in [Color::White, Color::Black] {
            let rank = c.back_rank();
            let has = |file: i8, kind: PieceKind| {
                Square::from_coords(file, rank).and_then(|s| self.piece_at(s))
                    == Some(Piece::new(c, kind))
            };
            let sides = [
                (self.castling.kingside(c), KINGSIDE_ROOK_FILE, "kingside"),
                (self.castling.queenside(c), QUEENSIDE_ROOK_FILE, "queenside"),
            ];
            for (allowed, rook_file, side) in sides {
                if allowed && !(has(KING_FILE, PieceKind::King) && has(rook_file, PieceKind::Rook)) {
                    return Err(invalid_state(format!(
                        "{c} may castle {side} but king or rook is not on its home square"
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_en_passant(&self) -> ChessResult<()> {
        let Some(ep) = self.en_passant else {
            return Ok(());
        };
        // The pawn that just double-stepped belongs to the side not to move.
        let mover = self.side_to_move.other();
        let expected_rank = mover.back_rank() + 2 * mover.forward();
        let pawn_sq = ep.offset(0, mover.forward());
        let origin = ep.offset(0, -mover.forward());

        let ok = ep.rank() == expected_rank
            && self.piece_at(ep).is_none()
            && origin.is_some_and(|s| self.piece_at(s).is_none())
            && pawn_sq.and_then(|s| self.piece_at(s)) == Some(Piece::new(mover, PieceKind::Pawn));
        if ok {
            Ok(())
        } else {
            Err(invalid_state(format!("en-passant square {ep} is inconsistent")))
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
