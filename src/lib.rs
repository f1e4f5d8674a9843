use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod notation;
pub mod types;
pub mod wasm;

pub use ai::eval::{EvalWeights, Evaluator, evaluate};
pub use ai::search::SearchEngine;
pub use board::BoardState;
pub use config::{Difficulty, EngineConfig, GameConfig};
pub use error::{ConfigError, GameError, NotationError};
pub use game::{GameInstance, MoveSelector};
pub use types::{Cell, Color, Move, Outcome, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
