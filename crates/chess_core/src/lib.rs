pub mod apply;
pub mod board;
pub mod error;
pub mod fen;
pub mod movegen;
pub mod notation;
pub mod outcome;
pub mod perft;
pub mod record;
pub mod snapshot;
pub mod types;
pub mod zobrist;

// Re-export the rules API
pub use apply::apply;
pub use board::*;
pub use error::*;
pub use fen::STARTING_POSITION_FEN;
pub use movegen::{has_legal_moves, is_legal, legal_moves, legal_moves_from, legal_moves_into};
pub use notation::{parse_move, san};
pub use outcome::*;
pub use perft::{divide, perft};
pub use record::{GameRecord, Ply};
pub use snapshot::{PositionSnapshot, RecordSnapshot};
pub use types::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// MoveSelector trait: implemented by every bot strategy
// =============================================================================

/// A strategy that picks the bot's move.
///
/// Implementations only see the position. Any legal move is acceptable;
/// the turn controller re-checks legality before applying it.
pub trait MoveSelector: Send {
    /// Returns one of the legal moves of `pos`, or
    /// [`ChessError::NoLegalMoves`](crate::ChessError::NoLegalMoves) when
    /// there are none.
    fn select_move(&mut self, pos: &Position) -> ChessResult<Move>;

    fn name(&self) -> &str;

    /// Called when the game is reset. Default implementation does nothing.
    fn new_game(&mut self) {}
}

impl<S: MoveSelector + ?Sized> MoveSelector for Box<S> {
    fn select_move(&mut self, pos: &Position) -> ChessResult<Move> {
        (**self).select_move(pos)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn new_game(&mut self) {
        (**self).new_game()
    }
}
