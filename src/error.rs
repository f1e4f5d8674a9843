//! Error types for the game layer.
//!
//! The rules engine itself never fails: illegal moves are rejected by
//! `BoardState::is_valid_move` and silently ignored by `make_move`. These
//! errors cover everything around it: coordinate text, configuration and
//! turn management.

use thiserror::Error;

use crate::types::Position;

/// Malformed letter+digit coordinate text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("expected a column letter and a row digit, e.g. \"D3\" (got {0} characters)")]
    WrongLength(usize),

    #[error("column must be a letter from A to H, got {0:?}")]
    BadColumn(char),

    #[error("row must be a digit from 1 to 8, got {0:?}")]
    BadRow(char),
}

/// Invalid engine or game configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown difficulty {0:?} (expected 1-3, easy, normal or hard)")]
    UnknownDifficulty(String),

    #[error("search depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u8, max: u8 },
}

/// Errors raised while driving a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,

    #[error("game is not over yet")]
    GameNotOver,

    #[error("it is not the player's turn")]
    NotYourTurn,

    #[error("illegal move at row {}, col {}", .0.row, .0.col)]
    IllegalMove(Position),

    #[error("engine could not select a move")]
    EngineNoMove,

    /// The finished board produced no winner. Indicates a broken board invariant.
    #[error("unexpected outcome: finished game has no winner")]
    UnexpectedOutcome,

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
