//! Error types for the trackquiz domain logic

use thiserror::Error;

/// Domain errors shared by the stores, the selector and both frontends.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Track not found: {0}")]
    TrackNotFound(i64),

    #[error("Invalid track data: {0}")]
    Validation(String),

    #[error("No active tracks available")]
    NoTracksAvailable,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<sqlx::Error> for GameError {
    // Lookup misses are reported as TrackNotFound by the stores themselves
    // (via fetch_optional), so every sqlx error reaching this point means
    // the storage layer itself failed.
    fn from(err: sqlx::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
