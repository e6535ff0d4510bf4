// Nim Core - Rust/WASM Implementation
// Licensed under the Apache License, Version 2.0

//! # Nim Core (Rust/WASM)
//!
//! Game logic for Nim played in the browser against an optimal computer
//! opponent, compiled to WebAssembly. Rendering and click wiring stay in
//! the page; this crate owns the heaps and the strategy.
//!
//! ## Architecture
//!
//! - **HeapManager**: ordered heap counts, removals, re-indexing, notifications
//! - **OptimalMoveEngine**: nim-sum strategy applied through the heap manager
//! - **TokenBoard**: token id to `(heap, order)` side-map for the page
//! - **NimGame**: WASM facade owning one round at a time

use wasm_bindgen::prelude::*;

// Module declarations
mod board;
mod config;
mod engine;
mod game;
mod heap;
mod types;
mod utils;

// Re-exports
pub use board::{TokenBoard, TokenLocation};
pub use config::GameConfig;
pub use engine::{candidates, find_optimal_move, nim_sum, OptimalMoveEngine};
pub use game::{NimGame, RoundState};
pub use heap::HeapManager;
pub use types::{HeapEvent, Move, NimError, Player, Reindex, Result};

// WASM initialization
#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// Version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
