//! Error types for the Notakto crate

use thiserror::Error;

/// Main error type for the Notakto crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board count {count} (must be at least 1)")]
    InvalidBoardCount { count: usize },

    #[error("action {action} is out of range (must be 0-{max} for {boards} board(s))")]
    ActionOutOfRange {
        action: usize,
        max: usize,
        boards: usize,
    },

    #[error("invalid move: cell {cell} on board {board} is already marked")]
    CellOccupied { board: usize, cell: usize },

    #[error("invalid move: board {board} already has a completed line")]
    DeadBoard { board: usize },

    #[error("board key has wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidKeyLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid action list '{input}': {reason}")]
    InvalidActionList { input: String, reason: String },

    #[error("transposition table already holds {stored} for '{key}', refusing to store {attempted}")]
    CacheConflict {
        key: String,
        stored: i32,
        attempted: i32,
    },

    #[error("search aborted after {visited} positions: {reason}")]
    SearchAborted { visited: u64, reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
