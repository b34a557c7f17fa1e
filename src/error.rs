//! Error types shared by the generator, level table, session and player store.

use crate::session::GameEvent;

/// Grid generation failures. All of these are level configuration problems;
/// none is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("word {word:?} must be non-empty uppercase ASCII")]
    InvalidWord { word: String },
    #[error("word {word:?} has {len} letters but the grid is only {size} wide")]
    WordTooLong { word: String, len: usize, size: usize },
    #[error("could not place {word:?} after {attempts} attempts")]
    PlacementExhausted { word: String, attempts: usize },
}

/// Level table failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("level table is empty")]
    NoLevels,
    #[error("level {index} is invalid: {source}")]
    InvalidLevel {
        index: usize,
        #[source]
        source: GridError,
    },
    #[error("level table JSON could not be parsed: {0}")]
    Json(String),
}

/// Failures surfaced by [`crate::GameSession`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("already on the final level")]
    FinalLevel,
    #[error("session has not been started")]
    NotStarted,
    /// The clock ran out but the fresh grid could not be dealt. `events`
    /// holds the expiry notifications that were produced before the failure.
    #[error("time expired and the level could not restart: {source}")]
    ExpiredRestart { events: Vec<GameEvent>, source: GridError },
}

/// Player name validation and persistence failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    #[error("please enter your name to start the game")]
    EmptyName,
    #[error("player storage unavailable: {0}")]
    Storage(String),
}
