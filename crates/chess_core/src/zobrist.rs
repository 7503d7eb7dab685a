//! Position keys for repetition detection.
//!
//! Two positions get the same key when they agree on everything that makes
//! them "the same position" under the repetition rule. The key XORs together
//! random values for:
//! - Each piece on each square (12 pieces × 64 squares = 768 values)
//! - Side to move (1 value)
//! - Castling rights (4 values)
//! - En passant file (8 values)

use crate::board::Position;
use crate::types::{Color, Piece, Square};

/// Pre-computed random values for Zobrist hashing.
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Random values for each piece on each square.
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// Random value for black to move (XOR when black's turn)
    pub side_to_move: u64,
    /// Random values for castling rights [wk, wq, bk, bq]
    pub castling: [u64; 4],
    /// Random values for en passant file (0-7)
    pub en_passant: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate Zobrist keys using a simple PRNG with fixed seed.
    /// Uses xorshift64 for fast, reproducible random numbers.
    pub const fn new() -> Self {
        // Simple xorshift64 PRNG
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x123456789ABCDEF0u64; // Fixed seed

        // Generate piece keys
        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut piece = 0;
            while piece < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][piece][sq] = state;
                    sq += 1;
                }
                piece += 1;
            }
            color += 1;
        }

        // Generate side to move key
        state = xorshift64(state);
        let side_to_move = state;

        // Generate castling keys
        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        // Generate en passant keys
        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    /// Get the Zobrist key for a piece on a square.
    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: Square) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq.index()]
    }

    /// Get the Zobrist key for castling right index (0=wk, 1=wq, 2=bk, 3=bq).
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    /// Get the Zobrist key for en passant on a file (0-7).
    #[inline(always)]
    pub fn ep_key(&self, file: i8) -> u64 {
        self.en_passant[file as usize]
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

impl Position {
    /// Hash of placement, side to move, castling rights and en-passant file.
    ///
    /// Clocks are left out: positions reached with different half-move
    /// clocks still count as repetitions of each other.
    pub fn key(&self) -> u64 {
        let mut key = self
            .pieces()
            .fold(0u64, |acc, (sq, pc)| acc ^ ZOBRIST.piece_key(pc, sq));

        if self.side_to_move == Color::Black {
            key ^= ZOBRIST.side_to_move;
        }

        let rights = self.castling.bits();
        for i in 0..4 {
            if rights & (1 << i) != 0 {
                key ^= ZOBRIST.castling_key(i);
            }
        }

        if let Some(ep) = self.en_passant {
            key ^= ZOBRIST.ep_key(ep.file());
        }
        key
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
