// Type definitions for Nim Core

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Timestamp in milliseconds since epoch
pub type Timestamp = i64;

/// Result type for Nim operations
pub type Result<T> = std::result::Result<T, NimError>;

/// Error types for Nim operations
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NimError {
    #[error("Invalid index: heap {}{}", .heap, token_suffix(.token))]
    InvalidIndex { heap: usize, token: Option<usize> },

    #[error("No legal move: position is balanced")]
    NoLegalMove,

    #[error("Token not found: {0}")]
    TokenNotFound(String),

    #[error("Game over: no tokens left")]
    GameOver,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

fn token_suffix(token: &Option<usize>) -> String {
    token.map(|t| format!(", token {}", t)).unwrap_or_default()
}

// Convert Rust errors to JsValue for WASM boundary
impl From<NimError> for JsValue {
    fn from(err: NimError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// A move applied to the heap collection
///
/// `heap` is the index the move was made on, as seen before the move.
/// If `new_count` is zero that heap no longer exists afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub heap: usize,
    pub new_count: usize,
    pub removed: usize,
}

/// Who made a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Computer,
}

/// Heap index shift caused by a deleted heap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reindex {
    pub from: usize,
    pub to: usize,
}

/// Notification emitted by the heap state manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HeapEvent {
    #[serde(rename = "heap:tokensRemoved")]
    TokensRemoved {
        heap: usize,
        previous_count: usize,
        new_count: usize,
    },
    #[serde(rename = "heap:deleted")]
    HeapDeleted {
        heap: usize,
        reindexed: Vec<Reindex>,
    },
}
