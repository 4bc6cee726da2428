//! Error types for dataset lookups, configuration, and tick validation.

use thiserror::Error;

/// Errors produced by the simulation core.
///
/// None of these escape [`crate::game_loop::Simulation::step`]; the step
/// logs them and leaves the affected state untouched.
#[derive(Debug, Error)]
pub enum GameError {
    /// Class tag missing from the balance dataset
    #[error("unknown character class: {0}")]
    UnknownClass(String),
    /// Enemy type tag missing from the balance dataset
    #[error("unknown enemy type: {0}")]
    UnknownEnemyType(String),
    /// Elapsed time was negative or not finite
    #[error("invalid tick duration: {0}")]
    InvalidTick(f32),
    /// Malformed balance dataset, config, or snapshot
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// Config or dataset file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for fallible core operations.
pub type GameResult<T> = Result<T, GameError>;
