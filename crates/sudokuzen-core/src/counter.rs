//! Capped solution counting by backtracking search.
//!
//! The counter is independent of the technique library: it works directly
//! on the board with minimum-remaining-values cell selection and stops as
//! soon as the caller's limit is reached. Synthesis and catalog filtering
//! probe it with `limit = 2` to test uniqueness.

use crate::{
    Board, CandidateState, DigitSet,
    geometry::{CELL_COUNT, PEERS},
};

/// Counts the solutions of a board, stopping at `limit`.
///
/// Returns the exact number of completions when it is below `limit`, and
/// `limit` otherwise. Boards that fail validation (unit duplicates, dead
/// cells) count as unsatisfiable and yield 0.
///
/// Cell selection is minimum-remaining-values with ties broken by smallest
/// index; a cell with a single legal digit is committed immediately. Digits
/// are tried in ascending order, so the search is fully deterministic.
///
/// # Examples
///
/// ```
/// use sudokuzen_core::{Board, count_solutions};
///
/// let empty = Board::new();
/// assert_eq!(count_solutions(&empty, 2), 2); // wildly ambiguous
/// ```
#[must_use]
pub fn count_solutions(board: &Board, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    if CandidateState::from_board(board).is_err() {
        return 0;
    }
    let mut grid = *board;
    let mut found = 0;
    search(&mut grid, limit, &mut found);
    found
}

fn legal_digits(grid: &Board, cell: usize) -> DigitSet {
    let mut used = DigitSet::EMPTY;
    for &peer in &PEERS[cell] {
        let value = grid.get(peer);
        if value != 0 {
            used.insert(value);
        }
    }
    !used
}

/// Picks the empty cell with the fewest legal digits.
///
/// Returns `None` when the grid is complete. A zero-candidate cell is
/// returned immediately so the caller can prune.
fn pick_cell(grid: &Board) -> Option<(usize, DigitSet)> {
    let mut best: Option<(usize, DigitSet)> = None;
    for cell in 0..CELL_COUNT {
        if grid.get(cell) != 0 {
            continue;
        }
        let digits = legal_digits(grid, cell);
        match digits.len() {
            0 => return Some((cell, digits)),
            1 => return Some((cell, digits)),
            n => {
                if best.is_none_or(|(_, b)| n < b.len()) {
                    best = Some((cell, digits));
                }
            }
        }
    }
    best
}

fn search(grid: &mut Board, limit: usize, found: &mut usize) {
    if *found >= limit {
        return;
    }
    let Some((cell, digits)) = pick_cell(grid) else {
        *found += 1;
        return;
    };
    for digit in digits {
        grid.set(cell, digit);
        search(grid, limit, found);
        grid.set(cell, 0);
        if *found >= limit {
            return;
        }
    }
}
