use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChessError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Rank delta of a pawn push for this color.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank index (0..=7) of this color's pieces at the start of the game.
    pub fn back_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank index on which this color's pawns promote.
    pub fn promotion_rank(self) -> i8 {
        self.other().back_rank()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    /// Lowercase letter used in FEN and long algebraic notation.
    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Accepts either case.
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { kind, color }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub fn fen_char(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { kind, color })
    }
}

/// A board square, indexed 0..64 from a1 along the files, then up the ranks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square(u8);

impl Square {
    pub fn new(index: u8) -> Option<Square> {
        (index < 64).then_some(Square(index))
    }

    /// `file` and `rank` are zero-based; returns `None` off the board.
    pub fn from_coords(file: i8, rank: i8) -> Option<Square> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square((rank as u8) * 8 + (file as u8)))
        } else {
            None
        }
    }

    pub(crate) const fn at(file: u8, rank: u8) -> Square {
        Square(rank * 8 + file)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn file(self) -> i8 {
        (self.0 % 8) as i8
    }

    pub fn rank(self) -> i8 {
        (self.0 / 8) as i8
    }

    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        Square::from_coords(self.file() + df, self.rank() + dr)
    }

    pub fn is_light(self) -> bool {
        (self.file() + self.rank()) % 2 == 1
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.0 % 8) as char;
        let rank = (b'1' + self.0 / 8) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 || !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
            return Err(ChessError::InvalidSquare(s.to_string()));
        }
        Ok(Square::at(b[0] - b'a', b[1] - b'1'))
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> String {
        sq.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = ChessError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A move as the player expresses it: where from, where to, and the
/// promotion piece if a pawn reaches the last rank.
///
/// Castling is written as the king's two-square move and en passant as the
/// pawn's diagonal step; both are recognised from the position the move is
/// applied to. The text form is long algebraic notation (`e2e4`, `e7e8q`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promo: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promo: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, promo: PieceKind) -> Self {
        Self {
            from,
            to,
            promo: Some(promo),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promo {
            write!(f, "{}", p.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidMoveText(s.to_string());
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(invalid());
        }
        let from = s[0..2].parse().map_err(|_| invalid())?;
        let to = s[2..4].parse().map_err(|_| invalid())?;
        let promo = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(k) if PieceKind::PROMOTIONS.contains(&k) => Some(k),
                _ => return Err(invalid()),
            },
        };
        Ok(Move { from, to, promo })
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> String {
        mv.to_string()
    }
}

impl TryFrom<String> for Move {
    type Error = ChessError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
