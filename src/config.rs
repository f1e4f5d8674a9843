use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Color;

/// Deepest search accepted by `EngineConfig::validate`.
pub const MAX_SEARCH_DEPTH: u8 = 10;

/// Menu-level difficulty, mapped to a fixed search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn depth(self) -> u8 {
        match self {
            Self::Easy => 2,
            Self::Normal => 4,
            Self::Hard => 8,
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    /// Accepts the menu number or the name, ignoring case and whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "easy" => Ok(Self::Easy),
            "2" | "normal" => Ok(Self::Normal),
            "3" | "hard" => Ok(Self::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.trim().to_string())),
        }
    }
}

/// Search engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ply limit. 0 still looks one ply ahead.
    pub max_depth: u8,
    /// The side the engine selects moves for.
    pub color: Color,
    /// Seed for tie-break coin flips; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: Difficulty::Easy.depth(),
            color: Color::Black,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::DepthTooLarge {
                depth: self.max_depth,
                max: MAX_SEARCH_DEPTH,
            });
        }
        Ok(())
    }
}

/// Settings for a human-versus-engine game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    /// Black moves first, so `Black` means the human plays first.
    pub human_color: Color,
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_depth: self.difficulty.depth(),
            color: self.human_color.opponent(),
            seed: self.seed,
        }
    }
}
