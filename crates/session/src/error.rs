use std::io;
use std::path::PathBuf;

use chess_core::ChessError;
use thiserror::Error;

/// Failures of the session layer. Rejected moves are not errors: they come
/// back as [`Submission::Rejected`](crate::Submission::Rejected).
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Chess(#[from] ChessError),

    #[error("cannot access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unsupported snapshot version {0}")]
    UnsupportedSnapshot(u32),

    #[error("the session driver has shut down")]
    DriverClosed,
}

pub type SessionResult<T> = Result<T, SessionError>;

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SessionError::Io {
            path: path.into(),
            source,
        }
    }
}
