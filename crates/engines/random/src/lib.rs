//! Random Move Selector
//!
//! Picks moves uniformly at random from all legal moves. This is the bot the
//! game plays against, and a convenient opponent for stress testing the
//! turn controller.

use chess_core::{legal_moves_into, ChessError, ChessResult, Move, MoveSelector, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// A bot that plays random legal moves.
///
/// Seed it with [`RandomEngine::with_seed`] for reproducible games.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    seed: Option<u64>,
    buf: Vec<Move>,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
            buf: Vec::with_capacity(64),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
            buf: Vec::with_capacity(64),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomEngine {
    fn select_move(&mut self, pos: &Position) -> ChessResult<Move> {
        legal_moves_into(pos, &mut self.buf);
        self.buf
            .choose(&mut self.rng)
            .copied()
            .ok_or(ChessError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        // A seeded bot replays the same game for the same opponent moves.
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }
}
