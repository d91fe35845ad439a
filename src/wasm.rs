//! JavaScript bindings over [`Game`].

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::ai::search::SearchConfig;
use crate::error::EngineError;
use crate::game::Game;

#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Accepts `undefined`, `null`, or a `{ depth, policy }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsValue> {
        let config: SearchConfig = if config.is_undefined() || config.is_null() {
            SearchConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            inner: Game::with_search(config),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.state())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.legal_moves())
    }

    pub fn place(&mut self, col: i32, row: i32) -> Result<JsValue, JsValue> {
        self.inner.play(col, row).map_err(to_js_error)?;
        self.state()
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        self.inner.do_ai_move().map_err(to_js_error)?;
        self.state()
    }

    pub fn pass(&mut self) -> Result<JsValue, JsValue> {
        self.inner.pass().map_err(to_js_error)?;
        self.state()
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.result())
    }

    /// Search score of the current position for the side to move.
    #[wasm_bindgen(js_name = bestScore)]
    pub fn best_score(&self) -> i32 {
        self.inner.best_score()
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn to_js_error(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
