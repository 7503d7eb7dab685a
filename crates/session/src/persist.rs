//! Saving and restoring games as JSON.

use std::path::Path;

use chess_core::{GameRecord, MoveSelector};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::player::Seats;
use crate::session::{default_bot, GameSession};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to resume a game: who sits where, the rules in force
/// and the full move record. The current position is rebuilt by replaying
/// the record, so a tampered file cannot produce an illegal game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub id: Uuid,
    pub config: SessionConfig,
    pub seats: Seats,
    pub record: GameRecord,
}

impl GameSnapshot {
    pub fn to_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> SessionResult<Self> {
        // Check the version before the shape, so old files get a clear error.
        #[derive(Deserialize)]
        struct Header {
            version: u32,
        }
        let header: Header = serde_json::from_str(text)?;
        if header.version != SNAPSHOT_VERSION {
            return Err(SessionError::UnsupportedSnapshot(header.version));
        }
        Ok(serde_json::from_str(text)?)
    }

    pub fn save(&self, path: &Path) -> SessionResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| SessionError::io(path, e))
    }

    pub fn load(path: &Path) -> SessionResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
        Self::from_json(&text)
    }
}

impl GameSession {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            id: self.id(),
            config: self.config().clone(),
            seats: self.seats().clone(),
            record: self.record().clone(),
        }
    }

    /// Resumes a saved game with the default bot for its config.
    pub fn restore(snapshot: GameSnapshot) -> SessionResult<Self> {
        let bot = default_bot(&snapshot.config);
        Self::restore_with(snapshot, bot)
    }

    pub fn restore_with(snapshot: GameSnapshot, bot: Box<dyn MoveSelector>) -> SessionResult<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SessionError::UnsupportedSnapshot(snapshot.version));
        }
        let mut session =
            GameSession::with_parts(snapshot.config, snapshot.seats, snapshot.record, bot);
        session.set_id(snapshot.id);
        Ok(session)
    }

    /// Save game to JSON file
    pub fn save_json(&self, path: &Path) -> SessionResult<()> {
        self.snapshot().save(path)
    }

    /// Load game from JSON file
    pub fn load_json(path: &Path) -> SessionResult<Self> {
        Self::restore(GameSnapshot::load(path)?)
    }
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod persist_tests;
