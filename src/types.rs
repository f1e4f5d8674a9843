use serde::{Deserialize, Serialize};

/// A side in the game. Black moves first and is the maximizing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Self::Black => Cell::Black,
            Self::White => Cell::White,
        }
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::Black => Some(Color::Black),
            Self::White => Some(Color::White),
        }
    }

    /// Signed occupancy: +1 for Black, -1 for White, 0 for empty.
    pub fn sign(self) -> i32 {
        match self {
            Self::Empty => 0,
            Self::Black => 1,
            Self::White => -1,
        }
    }

    /// Wire code used in `GameState::board`: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Black => 1,
            Self::White => 2,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Square index in row-major order (0..=63).
    pub fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }
}

/// A move as reported by the search.
///
/// `position == None` is the "no move" value, also produced by parsing
/// malformed coordinate text. `value` is only set by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Move {
    pub position: Option<Position>,
    pub value: Option<i32>,
}

impl Move {
    pub const fn undefined() -> Self {
        Self {
            position: None,
            value: None,
        }
    }

    pub const fn at(position: Position) -> Self {
        Self {
            position: Some(position),
            value: None,
        }
    }

    pub const fn scored(position: Option<Position>, value: i32) -> Self {
        Self {
            position,
            value: Some(value),
        }
    }

    pub fn is_undefined(&self) -> bool {
        self.position.is_none()
    }
}

/// Final outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win(Color),
    Tie,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub current_player: Color,
    pub human_color: Color,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the side that should have moved next had no legal move,
    ///   so the previous mover is to play again.
    /// - `false` otherwise.
    pub is_pass: bool,
    /// Squares (0..=63) flipped by the most recent move.
    pub flipped: Vec<u8>,
    pub last_move: Option<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub outcome: Outcome,
    pub black_count: u8,
    pub white_count: u8,
    pub human_score: u8,
    pub engine_score: u8,
}
