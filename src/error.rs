//! Error types
//!
//! Configuration-level failures surfaced to callers of the engine.
//! Rule-level rejections (bumping a wall, input while not playing) are
//! no-ops, not errors.

/// Errors raised while setting up a session.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Not enough floor cells to place the player, enemies and items apart.
    #[error("insufficient space: need {required} free floor cells, found {available}")]
    InsufficientSpace { required: usize, available: usize },

    /// The wall grid does not match the requested dimensions.
    #[error("grid is {actual_width}x{actual_height}, expected {width}x{height}")]
    GridMismatch {
        width: i32,
        height: i32,
        actual_width: i32,
        actual_height: i32,
    },

    /// The tile list does not cover the map.
    #[error("expected {expected} tiles, got {actual}")]
    TileCount { expected: usize, actual: usize },

    /// The player was asked to start on a wall or off the grid.
    #[error("player cannot start at ({x}, {y})")]
    BlockedStart { x: i32, y: i32 },

    /// A configuration file could not be read or parsed, or holds
    /// values no session can start with.
    #[error("config error: {0}")]
    Config(String),
}

/// Result alias used across the crate.
pub type GameResult<T> = Result<T, GameError>;
