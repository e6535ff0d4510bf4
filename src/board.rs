// Board: token identity to heap coordinates for Nim Core

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{HeapEvent, NimError, Result};
use crate::utils::generate_id;

/// Logical coordinates of a token
///
/// `order` counts from the bottom of the heap, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLocation {
    pub heap: usize,
    pub order: usize,
}

/// Side-map from token ids to their `(heap, order)` coordinates
///
/// The presentation layer keys each visual token by its id and asks the
/// board where it sits. The board follows the heap manager by applying the
/// same [`HeapEvent`]s, so lookups stay in step after heaps are deleted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TokenBoard {
    columns: Vec<Vec<String>>,
    #[serde(skip)]
    locations: HashMap<String, TokenLocation>,
}

impl TokenBoard {
    /// Assign fresh ids to every token of the given heap counts
    pub fn deal(counts: &[usize]) -> TokenBoard {
        let mut board = TokenBoard::default();

        for (heap, &count) in counts.iter().enumerate() {
            let column: Vec<String> = (0..count).map(|_| generate_id()).collect();
            for (order, id) in column.iter().enumerate() {
                board.locations.insert(id.clone(), TokenLocation { heap, order });
            }
            board.columns.push(column);
        }

        board
    }

    /// Where a token currently sits
    pub fn locate(&self, token_id: &str) -> Result<TokenLocation> {
        self.locations
            .get(token_id)
            .copied()
            .ok_or_else(|| NimError::TokenNotFound(token_id.to_string()))
    }

    /// Token ids of one heap, bottom first
    pub fn token_ids(&self, heap: usize) -> Result<&[String]> {
        self.columns
            .get(heap)
            .map(|c| c.as_slice())
            .ok_or(NimError::InvalidIndex { heap, token: None })
    }

    /// Number of columns on the board
    pub fn heap_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of live tokens on the board
    pub fn token_count(&self) -> usize {
        self.locations.len()
    }

    /// Mirror a heap notification onto the board
    pub fn apply(&mut self, event: &HeapEvent) -> Result<()> {
        match event {
            HeapEvent::TokensRemoved { heap, new_count, .. } => {
                let column = self
                    .columns
                    .get_mut(*heap)
                    .ok_or(NimError::InvalidIndex { heap: *heap, token: None })?;

                let keep = (*new_count).min(column.len());
                for id in column.drain(keep..) {
                    self.locations.remove(&id);
                }
            }
            HeapEvent::HeapDeleted { heap, reindexed } => {
                if *heap >= self.columns.len() {
                    return Err(NimError::InvalidIndex { heap: *heap, token: None });
                }

                for id in self.columns.remove(*heap) {
                    self.locations.remove(&id);
                }

                for shift in reindexed {
                    let column = self
                        .columns
                        .get(shift.to)
                        .ok_or(NimError::InvalidIndex { heap: shift.to, token: None })?;
                    for id in column {
                        if let Some(location) = self.locations.get_mut(id) {
                            location.heap = shift.to;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
