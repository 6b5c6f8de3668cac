use sudokuzen_core::{CandidateState, Contradiction, geometry::UNITS};

use super::{BoxedTechnique, Technique, TechniqueKind, cell_label};
use crate::TraceStep;

/// Places a digit that fits only one cell of some unit.
///
/// Units are scanned rows first, then columns, then boxes; within a unit,
/// digits ascend.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenSingle;

impl HiddenSingle {
    /// Creates a new `HiddenSingle` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for HiddenSingle {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::HiddenSingle
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, state: &mut CandidateState) -> Result<Option<TraceStep>, Contradiction> {
        for unit in &UNITS {
            for digit in 1..=9 {
                let mut only = None;
                let mut count = 0;
                for &cell in unit {
                    if state.is_cell_empty(cell) && state.candidates_at(cell).contains(digit) {
                        only = Some(cell);
                        count += 1;
                        if count > 1 {
                            break;
                        }
                    }
                }
                if count == 1
                    && let Some(cell) = only
                {
                    state.assign(cell, digit)?;
                    let detail = format!("{}={digit}", cell_label(cell));
                    return Ok(Some(TraceStep::place(TechniqueKind::HiddenSingle, detail)));
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

    #[test]
    fn test_places_digit_with_one_position_in_row() {
        // In row 0, block digit 4 from every cell but (0, 4): one 4 in each
        // of boxes 0 and 2, plus column clues for c4's flanking columns.
        let mut board = Board::new();
        board.set(cell_at(1, 0), 4); // box 0 blocks r1c1-c3
        board.set(cell_at(2, 6), 4); // box 2 blocks r1c7-c9
        board.set(cell_at(4, 3), 4); // column 4
        board.set(cell_at(7, 5), 4); // column 6
        let mut state = CandidateState::from_board(&board).unwrap();
        // Column 4 is the only spot left for digit 4 in row 0.
        assert!(state.candidates_at(cell_at(0, 4)).contains(4));

        let step = HiddenSingle::new().apply(&mut state).unwrap().unwrap();
        assert_eq!(step.technique, TechniqueKind::HiddenSingle);
        assert_eq!(step.action, Action::Place);
        assert_eq!(step.detail, "r1c5=4");
        assert_eq!(state.value_at(cell_at(0, 4)), 4);
    }

    #[test]
    fn test_idle_on_open_board() {
        let mut state = CandidateState::from_board(&Board::new()).unwrap();
        assert_eq!(HiddenSingle::new().apply(&mut state).unwrap(), None);
    }
}
