use sudokuzen_core::{CandidateState, Contradiction, geometry::cell_at};
use tinyvec::ArrayVec;

use super::{BoxedTechnique, Technique, TechniqueKind};
use crate::TraceStep;

/// X-Wing eliminations.
///
/// When a digit is possible in exactly the same two columns of two rows, it
/// is eliminated from those columns in every other row; the column-based
/// form swaps the roles of rows and columns. All digits are scanned in the
/// row orientation before any digit in the column orientation.
#[derive(Debug, Default, Clone, Copy)]
pub struct XWing;

impl XWing {
    /// Creates a new `XWing` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Lines (rows or columns) where `digit` has exactly two positions.
///
/// `at(line, slot)` maps line/slot coordinates to a cell index for the
/// chosen orientation.
fn double_lines(
    state: &CandidateState,
    digit: u8,
    at: impl Fn(usize, usize) -> usize,
) -> ArrayVec<[(usize, (usize, usize)); 9]> {
    let mut lines = ArrayVec::new();
    for line in 0..9 {
        let mut slots = ArrayVec::<[usize; 9]>::new();
        for slot in 0..9 {
            let cell = at(line, slot);
            if state.is_cell_empty(cell) && state.candidates_at(cell).contains(digit) {
                slots.push(slot);
            }
        }
        if let [a, b] = slots[..] {
            lines.push((line, (a, b)));
        }
    }
    lines
}

impl Technique for XWing {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::XWing
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, state: &mut CandidateState) -> Result<Option<TraceStep>, Contradiction> {
        // Row-based: two rows sharing the same column pair.
        for digit in 1..=9 {
            let rows = double_lines(state, digit, cell_at);
            for (i, &(r1, cols)) in rows.iter().enumerate() {
                for &(r2, other_cols) in &rows[i + 1..] {
                    if cols != other_cols {
                        continue;
                    }
                    let (c1, c2) = cols;
                    let mut removed = 0;
                    for row in 0..9 {
                        if row == r1 || row == r2 {
                            continue;
                        }
                        for col in [c1, c2] {
                            let cell = cell_at(row, col);
                            if state.is_cell_empty(cell)
                                && state.candidates_at(cell).contains(digit)
                            {
                                state.eliminate(cell, digit)?;
                                removed += 1;
                            }
                        }
                    }
                    if removed > 0 {
                        let detail = format!(
                            "d{digit} rows {},{} cols {},{} removed {removed}",
                            r1 + 1,
                            r2 + 1,
                            c1 + 1,
                            c2 + 1
                        );
                        return Ok(Some(TraceStep::eliminate(TechniqueKind::XWing, detail)));
                    }
                }
            }
        }

        // Column-based: two columns sharing the same row pair.
        for digit in 1..=9 {
            let cols = double_lines(state, digit, |line, slot| cell_at(slot, line));
            for (i, &(c1, rows)) in cols.iter().enumerate() {
                for &(c2, other_rows) in &cols[i + 1..] {
                    if rows != other_rows {
                        continue;
                    }
                    let (r1, r2) = rows;
                    let mut removed = 0;
                    for col in 0..9 {
                        if col == c1 || col == c2 {
                            continue;
                        }
                        for row in [r1, r2] {
                            let cell = cell_at(row, col);
                            if state.is_cell_empty(cell)
                                && state.candidates_at(cell).contains(digit)
                            {
                                state.eliminate(cell, digit)?;
                                removed += 1;
                            }
                        }
                    }
                    if removed > 0 {
                        let detail = format!(
                            "d{digit} cols {},{} rows {},{} removed {removed}",
                            c1 + 1,
                            c2 + 1,
                            r1 + 1,
                            r2 + 1
                        );
                        return Ok(Some(TraceStep::eliminate(TechniqueKind::XWing, detail)));
                    }
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use sudokuzen_core::Board;

    use super::*;

    #[test]
    fn test_row_x_wing_clears_columns() {
        // Digit 1 restricted to columns 1 and 7 in rows 0 and 4.
        let mut state = CandidateState::from_board(&Board::new()).unwrap();
        for col in 0..9 {
            if col != 1 && col != 7 {
                state.eliminate(cell_at(0, col), 1).unwrap();
                state.eliminate(cell_at(4, col), 1).unwrap();
            }
        }

        let step = XWing::new().apply(&mut state).unwrap().unwrap();
        assert_eq!(step.technique, TechniqueKind::XWing);
        assert!(step.detail.starts_with("d1 rows 1,5 cols 2,8"), "{}", step.detail);

        for row in 0..9 {
            if row == 0 || row == 4 {
                continue;
            }
            assert!(!state.candidates_at(cell_at(row, 1)).contains(1));
            assert!(!state.candidates_at(cell_at(row, 7)).contains(1));
        }
        // The wing corners keep the digit.
        assert!(state.candidates_at(cell_at(0, 1)).contains(1));
        assert!(state.candidates_at(cell_at(4, 7)).contains(1));
    }

    #[test]
    fn test_column_x_wing_clears_rows() {
        // Digit 9 restricted to rows 2 and 6 in columns 0 and 5.
        let mut state = CandidateState::from_board(&Board::new()).unwrap();
        for row in 0..9 {
            if row != 2 && row != 6 {
                state.eliminate(cell_at(row, 0), 9).unwrap();
                state.eliminate(cell_at(row, 5), 9).unwrap();
            }
        }

        let step = XWing::new().apply(&mut state).unwrap().unwrap();
        assert!(step.detail.starts_with("d9 cols 1,6 rows 3,7"), "{}", step.detail);

        for col in 1..9 {
            if col == 5 {
                continue;
            }
            assert!(!state.candidates_at(cell_at(2, col)).contains(9));
            assert!(!state.candidates_at(cell_at(6, col)).contains(9));
        }
    }

    #[test]
    fn test_idle_on_open_board() {
        let mut state = CandidateState::from_board(&Board::new()).unwrap();
        assert_eq!(XWing::new().apply(&mut state).unwrap(), None);
    }
}
