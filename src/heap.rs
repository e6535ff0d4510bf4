// Heap: authoritative heap collection for Nim Core

use rand::Rng;

use crate::config::{GameConfig, MIN_DEAL};
use crate::types::{HeapEvent, Move, NimError, Reindex, Result};
use crate::utils::random_in_range;

/// Heap state manager
///
/// Owns the ordered token counts of every heap and applies removals.
/// A heap that reaches zero is deleted, so every count is at least one
/// between moves. Each removal queues [`HeapEvent`]s until drained.
#[derive(Debug, Clone, Default)]
pub struct HeapManager {
    heaps: Vec<usize>,
    pending: Vec<HeapEvent>,
}

impl HeapManager {
    /// Create a collection from explicit counts
    pub fn from_counts(counts: Vec<usize>) -> Result<HeapManager> {
        if let Some(heap) = counts.iter().position(|&c| c == 0) {
            return Err(NimError::InvalidConfig(format!("heap {} is empty", heap)));
        }

        Ok(HeapManager {
            heaps: counts,
            pending: Vec::new(),
        })
    }

    /// Deal a random collection within the config bounds
    pub fn random<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<HeapManager> {
        config.validate()?;

        let columns = random_in_range(rng, MIN_DEAL, config.max_columns);
        let heaps = (0..columns)
            .map(|_| random_in_range(rng, MIN_DEAL, config.max_tokens))
            .collect();

        Ok(HeapManager {
            heaps,
            pending: Vec::new(),
        })
    }

    /// Token counts, in heap order
    pub fn counts(&self) -> &[usize] {
        &self.heaps
    }

    /// Number of heaps left
    pub fn len(&self) -> usize {
        self.heaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heaps.is_empty()
    }

    /// Token count of one heap
    pub fn count(&self, heap: usize) -> Result<usize> {
        self.heaps
            .get(heap)
            .copied()
            .ok_or(NimError::InvalidIndex { heap, token: None })
    }

    pub fn total_tokens(&self) -> usize {
        self.heaps.iter().sum()
    }

    /// True once every token has been taken
    pub fn is_exhausted(&self) -> bool {
        self.is_empty()
    }

    /// Remove tokens from the top of `heap` down to and including `down_to`
    ///
    /// `down_to` is 0-based from the bottom, so the heap keeps `down_to`
    /// tokens. If that leaves it empty the heap is deleted and every later
    /// heap moves down one index. Invalid input leaves state untouched.
    pub fn remove_tokens(&mut self, heap: usize, down_to: usize) -> Result<Move> {
        let previous_count = self.count(heap)?;
        if down_to >= previous_count {
            return Err(NimError::InvalidIndex { heap, token: Some(down_to) });
        }

        self.heaps[heap] = down_to;
        self.pending.push(HeapEvent::TokensRemoved {
            heap,
            previous_count,
            new_count: down_to,
        });

        if down_to == 0 {
            self.heaps.remove(heap);
            let reindexed = (heap..self.heaps.len())
                .map(|to| Reindex { from: to + 1, to })
                .collect();
            self.pending.push(HeapEvent::HeapDeleted { heap, reindexed });
        }

        Ok(Move {
            heap,
            new_count: down_to,
            removed: previous_count - down_to,
        })
    }

    /// Take every queued notification, oldest first
    pub fn drain_events(&mut self) -> Vec<HeapEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Number of queued notifications
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }
}
