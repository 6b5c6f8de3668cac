//! Per-cell candidate state and the assignment/elimination primitives.
//!
//! [`CandidateState`] pairs the board with one [`DigitSet`] per cell. The
//! three primitives here (`from_board`, [`eliminate`], [`assign`]) are the
//! only code that mutates candidate data; techniques express themselves in
//! terms of them.
//!
//! [`eliminate`]: CandidateState::eliminate
//! [`assign`]: CandidateState::assign

use derive_more::{Display, Error};

use crate::{
    Board, DigitSet,
    geometry::{CELL_COUNT, PEERS, UNITS, col_of, row_of},
};

/// Error produced when a board cannot seed a candidate state.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// A unit already holds the same digit twice.
    #[display("digit {digit} appears twice in unit {unit}")]
    DuplicateInUnit {
        /// Index of the offending unit (0-26).
        unit: usize,
        /// The duplicated digit.
        digit: u8,
    },
    /// An empty cell has no legal digit at all.
    #[display("cell r{}c{} has no candidates", row_of(*cell) + 1, col_of(*cell) + 1)]
    Unsatisfiable {
        /// Linear index of the dead cell.
        cell: usize,
    },
}

/// A deduction emptied the candidate set of an unfilled cell.
///
/// Techniques and the assignment cascade surface this instead of panicking;
/// the logic solver converts it into an unsolved outcome.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("cell r{}c{} lost its last candidate", row_of(*cell) + 1, col_of(*cell) + 1)]
pub struct Contradiction {
    /// Linear index of the cell whose candidate set became empty.
    pub cell: usize,
}

/// Board values plus the candidate set of every cell.
///
/// Invariants maintained by the primitives:
///
/// - a filled cell has an empty candidate set;
/// - an empty cell's candidates exclude every digit placed at a peer;
/// - an empty cell with an empty candidate set never survives a primitive —
///   it is reported as a [`Contradiction`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateState {
    board: Board,
    candidates: [DigitSet; CELL_COUNT],
}

impl CandidateState {
    /// Builds the candidate state for a board.
    ///
    /// Each empty cell starts with all digits minus those placed at its
    /// peers.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateInUnit`] if the board already violates
    /// a unit constraint, or [`BoardError::Unsatisfiable`] if some empty
    /// cell ends up with no candidates.
    pub fn from_board(board: &Board) -> Result<Self, BoardError> {
        for (unit_index, unit) in UNITS.iter().enumerate() {
            let mut seen = DigitSet::EMPTY;
            for &cell in unit {
                let value = board.get(cell);
                if value != 0 && !seen.insert(value) {
                    return Err(BoardError::DuplicateInUnit {
                        unit: unit_index,
                        digit: value,
                    });
                }
            }
        }

        let mut candidates = [DigitSet::EMPTY; CELL_COUNT];
        for cell in 0..CELL_COUNT {
            if board.get(cell) != 0 {
                continue;
            }
            let mut used = DigitSet::EMPTY;
            for &peer in &PEERS[cell] {
                let value = board.get(peer);
                if value != 0 {
                    used.insert(value);
                }
            }
            let possible = !used;
            if possible.is_empty() {
                return Err(BoardError::Unsatisfiable { cell });
            }
            candidates[cell] = possible;
        }

        Ok(Self {
            board: *board,
            candidates,
        })
    }

    /// Returns the current board.
    #[must_use]
    #[inline]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the state and returns the board.
    #[must_use]
    #[inline]
    pub const fn into_board(self) -> Board {
        self.board
    }

    /// Returns the value at a cell (`0` when empty).
    #[must_use]
    #[inline]
    pub const fn value_at(&self, cell: usize) -> u8 {
        self.board.get(cell)
    }

    /// Returns the candidate set of a cell (empty for filled cells).
    #[must_use]
    #[inline]
    pub const fn candidates_at(&self, cell: usize) -> DigitSet {
        self.candidates[cell]
    }

    /// Returns `true` if the cell is unfilled.
    #[must_use]
    #[inline]
    pub const fn is_cell_empty(&self, cell: usize) -> bool {
        self.board.get(cell) == 0
    }

    /// Returns `true` if every cell is filled.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.board.is_complete()
    }

    /// Removes `digit` from the candidate set of a cell.
    ///
    /// Filled cells and absent candidates are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Contradiction`] if the removal empties the candidate set of
    /// a still-empty cell.
    pub fn eliminate(&mut self, cell: usize, digit: u8) -> Result<(), Contradiction> {
        if self.board.get(cell) != 0 || !self.candidates[cell].contains(digit) {
            return Ok(());
        }
        self.candidates[cell].remove(digit);
        if self.candidates[cell].is_empty() {
            return Err(Contradiction { cell });
        }
        Ok(())
    }

    /// Places `digit` at a cell and cascades the elimination to all peers.
    ///
    /// # Errors
    ///
    /// Returns [`Contradiction`] if the digit is not a candidate of the cell,
    /// if the cell is already filled with a different digit, or if the
    /// cascade empties a peer's candidate set.
    pub fn assign(&mut self, cell: usize, digit: u8) -> Result<(), Contradiction> {
        if self.board.get(cell) != 0 {
            if self.board.get(cell) == digit {
                return Ok(());
            }
            return Err(Contradiction { cell });
        }
        if !self.candidates[cell].contains(digit) {
            return Err(Contradiction { cell });
        }
        self.board.set(cell, digit);
        self.candidates[cell].clear();
        for &peer in &PEERS[cell] {
            self.eliminate(peer, digit)?;
        }
        Ok(())
    }

    /// Returns an iterator over the indices of empty cells.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.board.empty_cells()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::cell_at;

    fn full_grid() -> Board {
        // cell(r, c) = ((3r + r/3 + c) mod 9) + 1 is a valid solution.
        let mut board = Board::new();
        for row in 0..9 {
            for col in 0..9 {
                let value = ((3 * row + row / 3 + col) % 9 + 1) as u8;
                board.set(cell_at(row, col), value);
            }
        }
        board
    }

    #[test]
    fn test_from_board_excludes_peer_digits() {
        let mut board = Board::new();
        board.set(cell_at(0, 0), 5);
        board.set(cell_at(0, 8), 7);

        let state = CandidateState::from_board(&board).unwrap();
        let corner = state.candidates_at(cell_at(0, 1));
        assert!(!corner.contains(5));
        assert!(!corner.contains(7));
        assert_eq!(corner.len(), 7);
        // Filled cells carry no candidates.
        assert!(state.candidates_at(cell_at(0, 0)).is_empty());
    }

    #[test]
    fn test_from_board_rejects_duplicate() {
        let mut board = Board::new();
        board.set(cell_at(3, 0), 9);
        board.set(cell_at(3, 6), 9);
        assert_eq!(
            CandidateState::from_board(&board),
            Err(BoardError::DuplicateInUnit { unit: 3, digit: 9 })
        );
    }

    #[test]
    fn test_assign_cascades_to_peers() {
        let board = Board::new();
        let mut state = CandidateState::from_board(&board).unwrap();
        state.assign(cell_at(4, 4), 6).unwrap();

        assert_eq!(state.value_at(cell_at(4, 4)), 6);
        assert!(state.candidates_at(cell_at(4, 4)).is_empty());
        assert!(!state.candidates_at(cell_at(4, 0)).contains(6)); // row peer
        assert!(!state.candidates_at(cell_at(0, 4)).contains(6)); // column peer
        assert!(!state.candidates_at(cell_at(3, 3)).contains(6)); // box peer
        assert!(state.candidates_at(cell_at(0, 0)).contains(6)); // non-peer
    }

    #[test]
    fn test_assign_rejects_non_candidate() {
        let mut board = Board::new();
        board.set(cell_at(0, 0), 3);
        let mut state = CandidateState::from_board(&board).unwrap();
        // 3 is excluded from the whole first row by the placement.
        assert_eq!(
            state.assign(cell_at(0, 5), 3),
            Err(Contradiction { cell: cell_at(0, 5) })
        );
    }

    #[test]
    fn test_eliminate_reports_last_candidate() {
        let board = Board::new();
        let mut state = CandidateState::from_board(&board).unwrap();
        for digit in 1..=8 {
            state.eliminate(0, digit).unwrap();
        }
        assert_eq!(state.candidates_at(0).as_single(), Some(9));
        assert_eq!(state.eliminate(0, 9), Err(Contradiction { cell: 0 }));
    }

    #[test]
    fn test_eliminate_ignores_filled_cells() {
        let mut board = Board::new();
        board.set(0, 1);
        let mut state = CandidateState::from_board(&board).unwrap();
        let before = state.clone();
        state.eliminate(0, 1).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_full_grid_has_no_candidates_left() {
        let state = CandidateState::from_board(&full_grid()).unwrap();
        assert!(state.is_solved());
        assert!((0..81).all(|cell| state.candidates_at(cell).is_empty()));
    }
}
