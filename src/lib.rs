//! Othello rules engine and adversarial search.
//!
//! - [`board`]: the 8x8 cell grid.
//! - [`moves`]: legal move generation and move application.
//! - [`ai::search`]: negamax with alpha-beta pruning over disc count.
//! - [`game`]: turn, pass and game-over handling.
//! - [`wasm`]: bindings for a JavaScript front end.

use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod moves;
pub mod types;
pub mod wasm;

pub use ai::search::{SearchConfig, SearchPolicy, Searcher, best_score, negamax};
pub use board::Board;
pub use error::EngineError;
pub use moves::{apply_move, generate_moves};
pub use types::{Cell, Move, Position, Side};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
