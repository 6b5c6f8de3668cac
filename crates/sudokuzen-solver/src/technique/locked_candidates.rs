use sudokuzen_core::{
    CandidateState, Contradiction,
    geometry::{BOXES, COLS, ROWS, box_of, col_of, row_of},
};
use tinyvec::ArrayVec;

use super::{BoxedTechnique, Technique, TechniqueKind};
use crate::TraceStep;

/// Box/line intersection eliminations.
///
/// - **Pointing**: all candidates of a digit inside a box lie in one row
///   (or column), so the digit leaves that row (column) outside the box.
/// - **Claiming**: all candidates of a digit inside a row (or column) lie
///   in one box, so the digit leaves the rest of that box.
///
/// All boxes are scanned for pointing before any line is scanned for
/// claiming.
#[derive(Debug, Default, Clone, Copy)]
pub struct LockedCandidates;

impl LockedCandidates {
    /// Creates a new `LockedCandidates` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn digit_positions(
    state: &CandidateState,
    unit: &[usize; 9],
    digit: u8,
) -> ArrayVec<[usize; 9]> {
    let mut positions = ArrayVec::new();
    for &cell in unit {
        if state.is_cell_empty(cell) && state.candidates_at(cell).contains(digit) {
            positions.push(cell);
        }
    }
    positions
}

fn eliminate_from<I>(
    state: &mut CandidateState,
    targets: I,
    digit: u8,
) -> Result<usize, Contradiction>
where
    I: IntoIterator<Item = usize>,
{
    let mut removed = 0;
    for target in targets {
        if state.is_cell_empty(target) && state.candidates_at(target).contains(digit) {
            state.eliminate(target, digit)?;
            removed += 1;
        }
    }
    Ok(removed)
}

impl Technique for LockedCandidates {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::LockedCandidates
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, state: &mut CandidateState) -> Result<Option<TraceStep>, Contradiction> {
        // Pointing: box -> row/col.
        for box_unit in &BOXES {
            for digit in 1..=9 {
                let positions = digit_positions(state, box_unit, digit);
                if positions.len() <= 1 {
                    continue;
                }
                let box_index = box_of(positions[0]);
                let row = row_of(positions[0]);
                let col = col_of(positions[0]);
                if positions.iter().all(|&cell| row_of(cell) == row) {
                    let targets = ROWS[row]
                        .into_iter()
                        .filter(|&cell| box_of(cell) != box_index);
                    let removed = eliminate_from(state, targets, digit)?;
                    if removed > 0 {
                        let detail =
                            format!("pointing d{digit} row r{}, removed {removed}", row + 1);
                        return Ok(Some(TraceStep::eliminate(
                            TechniqueKind::LockedCandidates,
                            detail,
                        )));
                    }
                } else if positions.iter().all(|&cell| col_of(cell) == col) {
                    let targets = COLS[col]
                        .into_iter()
                        .filter(|&cell| box_of(cell) != box_index);
                    let removed = eliminate_from(state, targets, digit)?;
                    if removed > 0 {
                        let detail =
                            format!("pointing d{digit} col c{}, removed {removed}", col + 1);
                        return Ok(Some(TraceStep::eliminate(
                            TechniqueKind::LockedCandidates,
                            detail,
                        )));
                    }
                }
            }
        }

        // Claiming: row/col -> box.
        for (lines, is_row) in [(&ROWS, true), (&COLS, false)] {
            for (line_index, line) in lines.iter().enumerate() {
                for digit in 1..=9 {
                    let positions = digit_positions(state, line, digit);
                    if positions.len() <= 1 {
                        continue;
                    }
                    let box_index = box_of(positions[0]);
                    if !positions.iter().all(|&cell| box_of(cell) == box_index) {
                        continue;
                    }
                    let targets = BOXES[box_index]
                        .into_iter()
                        .filter(|&cell| !line.contains(&cell));
                    let removed = eliminate_from(state, targets, digit)?;
                    if removed > 0 {
                        let axis = if is_row { "row" } else { "col" };
                        let detail = format!(
                            "claiming d{digit} {axis}{}, removed {removed}",
                            line_index + 1
                        );
                        return Ok(Some(TraceStep::eliminate(
                            TechniqueKind::LockedCandidates,
                            detail,
                        )));
                    }
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use sudokuzen_core::{Board, geometry::cell_at};

    use super::*;
    use crate::Action;

    /// Confines digit 5 in box 0 to row 0 by placing 5s that knock out the
    /// other two rows of the box.
    fn pointing_setup() -> CandidateState {
        let mut board = Board::new();
        board.set(cell_at(1, 4), 5); // row 1
        board.set(cell_at(2, 7), 5); // row 2
        CandidateState::from_board(&board).unwrap()
    }

    #[test]
    fn test_pointing_clears_row_outside_box() {
        let mut state = pointing_setup();
        assert!(state.candidates_at(cell_at(0, 5)).contains(5));

        let step = LockedCandidates::new().apply(&mut state).unwrap().unwrap();
        assert_eq!(step.technique, TechniqueKind::LockedCandidates);
        assert_eq!(step.action, Action::Eliminate);
        assert!(step.detail.starts_with("pointing d5 row r1"), "{}", step.detail);

        for col in 3..9 {
            assert!(
                !state.candidates_at(cell_at(0, col)).contains(5),
                "c{col} still offers 5"
            );
        }
        // Inside the box nothing changed.
        assert!(state.candidates_at(cell_at(0, 0)).contains(5));
    }

    #[test]
    fn test_claiming_clears_box_remainder() {
        // Row 0: remove digit 7 from columns 3-8, so its candidates claim
        // box 0.
        let mut state = CandidateState::from_board(&Board::new()).unwrap();
        for col in 3..9 {
            state.eliminate(cell_at(0, col), 7).unwrap();
        }

        let step = LockedCandidates::new().apply(&mut state).unwrap().unwrap();
        assert!(step.detail.starts_with("claiming d7 row1"), "{}", step.detail);

        assert!(!state.candidates_at(cell_at(1, 0)).contains(7));
        assert!(!state.candidates_at(cell_at(2, 2)).contains(7));
        // The claiming cells themselves keep the digit.
        assert!(state.candidates_at(cell_at(0, 0)).contains(7));
    }

    #[test]
    fn test_idle_on_open_board() {
        let mut state = CandidateState::from_board(&Board::new()).unwrap();
        assert_eq!(LockedCandidates::new().apply(&mut state).unwrap(), None);
    }
}
