//! The two-stage dig: greedy removal, then bounded backtracking.

use rand::{Rng, seq::IndexedRandom as _, seq::SliceRandom as _};
use sudokuzen_core::Board;

use crate::UniquenessCache;

/// Shape and budget knobs for the dig.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigParams {
    /// Filled cells sampled per removability probe.
    pub probe_limit: usize,
    /// The bridge clue count is `max(target + bridge_extra, bridge_floor)`.
    pub bridge_extra: usize,
    /// Lower bound on the bridge clue count.
    pub bridge_floor: usize,
    /// Removal candidates tried per backtracking depth.
    pub branch_limit: usize,
    /// Shared node budget for one backtracking attempt.
    pub node_limit: usize,
    /// Full greedy+backtracking attempts per solved grid.
    pub max_restarts: usize,
}

impl Default for DigParams {
    fn default() -> Self {
        Self {
            probe_limit: 40,
            bridge_extra: 6,
            bridge_floor: 24,
            branch_limit: 8,
            node_limit: 6000,
            max_restarts: 5,
        }
    }
}

/// Collects the filled cells whose removal keeps the puzzle unique.
///
/// Samples up to `probe_limit` filled cells in random order; each is
/// tentatively cleared and probed through the uniqueness cache.
fn removable_cells<R: Rng>(
    puzzle: &mut Board,
    rng: &mut R,
    cache: &mut UniquenessCache,
    probe_limit: usize,
) -> Vec<usize> {
    let mut filled: Vec<usize> = puzzle.filled_cells().collect();
    filled.shuffle(rng);

    let mut removable = Vec::new();
    for &cell in filled.iter().take(probe_limit) {
        let saved = puzzle.get(cell);
        puzzle.set(cell, 0);
        if cache.is_unique(puzzle) {
            removable.push(cell);
        }
        puzzle.set(cell, saved);
    }
    removable
}

/// Stage B: depth-first removal with a shared node budget.
fn dig_backtracking<R: Rng>(
    puzzle: &mut Board,
    clues: usize,
    target_clues: usize,
    rng: &mut R,
    cache: &mut UniquenessCache,
    params: &DigParams,
    nodes_left: &mut usize,
) -> Option<Board> {
    if clues == target_clues {
        return Some(*puzzle);
    }
    if clues < target_clues || *nodes_left == 0 {
        return None;
    }
    *nodes_left -= 1;

    let mut removable = removable_cells(puzzle, rng, cache, params.probe_limit);
    if removable.is_empty() {
        return None;
    }
    removable.shuffle(rng);

    for &cell in removable.iter().take(params.branch_limit) {
        let saved = puzzle.get(cell);
        puzzle.set(cell, 0);
        let found = dig_backtracking(
            puzzle,
            clues - 1,
            target_clues,
            rng,
            cache,
            params,
            nodes_left,
        );
        puzzle.set(cell, saved);
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Digs a solved grid down to `target_clues` while preserving uniqueness.
///
/// Stage A greedily removes random removable cells until the bridge clue
/// count; stage B backtracks over the remaining removals under
/// [`DigParams::node_limit`]. The whole attempt restarts from the solved
/// grid with fresh randomness up to [`DigParams::max_restarts`] times
/// before giving up.
///
/// Every returned puzzle has exactly one solution, and restoring any
/// cleared cell keeps it that way (clues only constrain further).
pub fn dig_puzzle<R: Rng>(
    solution: &Board,
    target_clues: usize,
    rng: &mut R,
    cache: &mut UniquenessCache,
    params: &DigParams,
) -> Option<Board> {
    let bridge_clues = (target_clues + params.bridge_extra).max(params.bridge_floor);

    for attempt in 0..params.max_restarts {
        let mut puzzle = *solution;
        let mut clues = puzzle.clue_count();

        // Stage A: greedy descent to the bridge.
        while clues > bridge_clues {
            let removable = removable_cells(&mut puzzle, rng, cache, params.probe_limit);
            let Some(&cell) = removable.choose(rng) else {
                break;
            };
            puzzle.set(cell, 0);
            clues -= 1;
        }

        if clues == target_clues {
            return Some(puzzle);
        }
        if clues > target_clues {
            let mut nodes_left = params.node_limit;
            if let Some(found) = dig_backtracking(
                &mut puzzle,
                clues,
                target_clues,
                rng,
                cache,
                params,
                &mut nodes_left,
            ) {
                return Some(found);
            }
            log::debug!(
                "dig attempt {attempt} stalled at {clues} clues (target {target_clues})"
            );
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PuzzleSeed, solution::shuffled_solution};

    /// A bridge above the target keeps the test inside the greedy stage.
    fn quick_params() -> DigParams {
        DigParams {
            probe_limit: 20,
            bridge_extra: 0,
            bridge_floor: 30,
            branch_limit: 4,
            node_limit: 200,
            max_restarts: 2,
        }
    }

    #[test]
    fn test_digs_to_target_and_stays_unique() {
        let mut rng = PuzzleSeed::from_u64(77).rng();
        let solution = shuffled_solution(&mut rng);
        let mut cache = UniquenessCache::new();

        let puzzle = dig_puzzle(&solution, 32, &mut rng, &mut cache, &quick_params())
            .expect("a 32-clue dig should succeed");
        assert_eq!(puzzle.clue_count(), 32);
        assert!(cache.is_unique(&puzzle));

        // Every clue matches the solution it was dug from.
        for cell in puzzle.filled_cells() {
            assert_eq!(puzzle.get(cell), solution.get(cell));
        }
    }

    #[test]
    fn test_restoring_a_cleared_cell_keeps_uniqueness() {
        let mut rng = PuzzleSeed::from_u64(78).rng();
        let solution = shuffled_solution(&mut rng);
        let mut cache = UniquenessCache::new();

        let puzzle = dig_puzzle(&solution, 34, &mut rng, &mut cache, &quick_params()).unwrap();
        let mut restored = puzzle;
        let cleared = (0..81).find(|&cell| puzzle.get(cell) == 0).unwrap();
        restored.set(cleared, solution.get(cleared));
        assert!(cache.is_unique(&restored));
    }

    #[test]
    fn test_same_seed_digs_the_same_puzzle() {
        let params = quick_params();
        let dig = |seed: u64| {
            let mut rng = PuzzleSeed::from_u64(seed).rng();
            let solution = shuffled_solution(&mut rng);
            let mut cache = UniquenessCache::new();
            dig_puzzle(&solution, 33, &mut rng, &mut cache, &params)
        };
        assert_eq!(dig(5), dig(5));
    }
}
