// Optimal move engine for Nim Core
//
// Standard Nim strategy: a position is lost for the mover exactly when the
// XOR of all heap counts (the nim-sum) is zero. From any other position,
// some heap can be shrunk to `count ^ nim_sum`, which zeroes the nim-sum.

use crate::heap::HeapManager;
use crate::types::{Move, NimError, Result};

/// XOR of every heap count
pub fn nim_sum(counts: &[usize]) -> usize {
    counts.iter().fold(0, |acc, &c| acc ^ c)
}

/// Count each heap would need for the nim-sum to become zero
pub fn candidates(counts: &[usize]) -> Vec<usize> {
    let total = nim_sum(counts);
    counts.iter().map(|&c| c ^ total).collect()
}

/// Pick the first heap whose candidate count is below its current count
///
/// Returns [`NimError::NoLegalMove`] for balanced positions, including the
/// empty collection. Pure: nothing is mutated.
pub fn find_optimal_move(counts: &[usize]) -> Result<Move> {
    candidates(counts)
        .into_iter()
        .zip(counts)
        .position(|(target, &count)| target < count)
        .map(|heap| {
            let count = counts[heap];
            let new_count = count ^ nim_sum(counts);
            Move {
                heap,
                new_count,
                removed: count - new_count,
            }
        })
        .ok_or(NimError::NoLegalMove)
}

/// Computer opponent playing the nim-sum strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalMoveEngine;

impl OptimalMoveEngine {
    pub fn new() -> OptimalMoveEngine {
        OptimalMoveEngine
    }

    /// Compute the optimal move and apply it through the heap manager
    ///
    /// On a balanced position the heaps are left untouched and
    /// `NoLegalMove` is returned for the caller to handle.
    pub fn play(&self, heaps: &mut HeapManager) -> Result<Move> {
        let chosen = find_optimal_move(heaps.counts())?;
        heaps.remove_tokens(chosen.heap, chosen.new_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every collection of `heaps` heaps with counts in `1..=max`
    fn all_positions(heaps: usize, max: usize) -> Vec<Vec<usize>> {
        let mut positions = vec![vec![]];
        for _ in 0..heaps {
            positions = positions
                .into_iter()
                .flat_map(|p| {
                    (1..=max).map(move |c| {
                        let mut next = p.clone();
                        next.push(c);
                        next
                    })
                })
                .collect();
        }
        positions
    }

    #[test]
    fn test_nim_sum() {
        assert_eq!(nim_sum(&[]), 0);
        assert_eq!(nim_sum(&[3, 4, 5]), 2);
        assert_eq!(nim_sum(&[1, 1]), 0);
        assert_eq!(nim_sum(&[7]), 7);
    }

    #[test]
    fn test_scenario_three_four_five() {
        let counts = [3, 4, 5];
        assert_eq!(candidates(&counts), vec![1, 6, 7]);

        let mv = find_optimal_move(&counts).unwrap();
        assert_eq!(mv, Move { heap: 0, new_count: 1, removed: 2 });

        let mut manager = HeapManager::from_counts(counts.to_vec()).unwrap();
        OptimalMoveEngine::new().play(&mut manager).unwrap();
        assert_eq!(manager.counts(), &[1, 4, 5]);
        assert_eq!(nim_sum(manager.counts()), 0);
    }

    #[test]
    fn test_balanced_position_has_no_move() {
        let mut manager = HeapManager::from_counts(vec![1, 1]).unwrap();
        let err = OptimalMoveEngine::new().play(&mut manager).unwrap_err();

        assert_eq!(err, NimError::NoLegalMove);
        assert_eq!(manager.counts(), &[1, 1]);
        assert_eq!(manager.pending_events(), 0);
    }

    #[test]
    fn test_empty_collection_has_no_move() {
        assert_eq!(find_optimal_move(&[]), Err(NimError::NoLegalMove));
    }

    #[test]
    fn test_single_heap_is_taken_whole() {
        let mut manager = HeapManager::from_counts(vec![5]).unwrap();
        let mv = OptimalMoveEngine::new().play(&mut manager).unwrap();

        assert_eq!(mv, Move { heap: 0, new_count: 0, removed: 5 });
        assert!(manager.is_exhausted());
    }

    #[test]
    fn test_picks_lowest_qualifying_heap() {
        // nim-sum 4: heaps 1, 2 and 3 all qualify
        let mv = find_optimal_move(&[1, 4, 5, 4]).unwrap();
        assert_eq!(mv.heap, 1);
        assert_eq!(mv.new_count, 0);
    }

    #[test]
    fn test_move_restores_zero_nim_sum_everywhere() {
        for heaps in 1..=4 {
            for counts in all_positions(heaps, 7) {
                let total = nim_sum(&counts);
                let result = find_optimal_move(&counts);

                if total == 0 {
                    assert_eq!(result, Err(NimError::NoLegalMove), "{:?}", counts);
                    continue;
                }

                let mv = result.unwrap();
                let cands = candidates(&counts);
                assert!(cands[mv.heap] < counts[mv.heap]);
                assert!(cands[..mv.heap]
                    .iter()
                    .zip(&counts)
                    .all(|(target, count)| target >= count));

                let mut manager = HeapManager::from_counts(counts.clone()).unwrap();
                OptimalMoveEngine::new().play(&mut manager).unwrap();
                assert_eq!(nim_sum(manager.counts()), 0, "{:?}", counts);
                assert_eq!(manager.total_tokens(), counts.iter().sum::<usize>() - mv.removed);
            }
        }
    }

    #[test]
    fn test_engine_wins_self_play_from_unbalanced_start() {
        // Engine moves first from an unbalanced position, the opponent takes
        // one token from the first heap; the engine always takes the last one.
        let mut manager = HeapManager::from_counts(vec![2, 3, 5, 5]).unwrap();
        let engine = OptimalMoveEngine::new();
        let mut engine_moved_last = false;

        while !manager.is_exhausted() {
            engine.play(&mut manager).unwrap();
            engine_moved_last = true;
            if manager.is_exhausted() {
                break;
            }
            let top = manager.count(0).unwrap() - 1;
            manager.remove_tokens(0, top).unwrap();
            engine_moved_last = false;
        }

        assert!(engine_moved_last);
    }
}
