//! Browser-facing API over `GameInstance`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::GameInstance;

/// Installs the console logger and panic hook. Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        // Err only means a logger is already installed.
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}

#[wasm_bindgen]
pub struct WasmGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl WasmGame {
    /// `config` is a `GameConfig`-shaped object, e.g.
    /// `{ difficulty: "hard", human_color: "white", seed: 1 }`.
    /// Missing fields and `undefined` fall back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&e.to_string()))?
        };

        let inner = GameInstance::new(&config)?;
        Ok(Self { inner })
    }

    pub fn place(&mut self, row: u8, col: u8) -> Result<(), JsError> {
        self.inner.place(row, col)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = placeNotation)]
    pub fn place_notation(&mut self, text: &str) -> Result<(), JsError> {
        self.inner.place_notation(text)?;
        Ok(())
    }

    /// Lets the engine move and returns the square it played, e.g. `"F5"`.
    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<String, JsError> {
        let pos = self.inner.do_ai_move()?;
        Ok(pos.to_string())
    }

    #[wasm_bindgen(js_name = isHumanTurn)]
    pub fn is_human_turn(&self) -> bool {
        self.inner.is_human_turn()
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.to_game_state())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.legal_moves())
    }

    pub fn result(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.to_game_result()?)
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}
