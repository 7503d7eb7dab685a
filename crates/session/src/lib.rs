//! Game sessions: who moves next, and what happens when they do.
//!
//! This crate sequences moves between players on top of `chess_core`:
//! - `GameSession`: the turn controller (human, remote and bot seats)
//! - `SessionConfig`: TOML configuration for a game
//! - `GameSnapshot`: JSON persistence of a running game
//! - `driver`: a tokio task that owns a session, serializes submissions
//!   and plays the bot's moves after a cancellable delay

mod config;
pub mod driver;
mod error;
mod events;
mod persist;
mod player;
mod session;

pub use config::*;
pub use error::*;
pub use events::*;
pub use persist::*;
pub use player::*;
pub use session::*;
