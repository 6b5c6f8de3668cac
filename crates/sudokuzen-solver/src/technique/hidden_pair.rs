use sudokuzen_core::{CandidateState, Contradiction, geometry::UNITS};

use super::{BoxedTechnique, Technique, TechniqueKind};
use crate::TraceStep;

/// Two digits confined to the same two cells of a unit strip every other
/// candidate from those cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenPair;

impl HiddenPair {
    /// Creates a new `HiddenPair` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for HiddenPair {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::HiddenPair
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, state: &mut CandidateState) -> Result<Option<TraceStep>, Contradiction> {
        for unit in &UNITS {
            // 9-bit position masks per digit, indexed within the unit.
            let mut masks = [0u16; 10];
            for digit in 1..=9u8 {
                for (slot, &cell) in unit.iter().enumerate() {
                    if state.is_cell_empty(cell) && state.candidates_at(cell).contains(digit) {
                        masks[digit as usize] |= 1 << slot;
                    }
                }
            }

            for d1 in 1..=8u8 {
                let mask = masks[d1 as usize];
                if mask.count_ones() != 2 {
                    continue;
                }
                for d2 in d1 + 1..=9u8 {
                    if masks[d2 as usize] != mask {
                        continue;
                    }
                    let mut removed = 0;
                    for (slot, &cell) in unit.iter().enumerate() {
                        if mask & (1 << slot) == 0 {
                            continue;
                        }
                        for digit in state.candidates_at(cell) {
                            if digit != d1 && digit != d2 {
                                state.eliminate(cell, digit)?;
                                removed += 1;
                            }
                        }
                    }
                    if removed > 0 {
                        let detail = format!("pair ({d1},{d2}) removed {removed}");
                        return Ok(Some(TraceStep::eliminate(
                            TechniqueKind::HiddenPair,
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
    use sudokuzen_core::{Board, DigitSet, geometry::cell_at};

    use super::*;

    #[test]
    fn test_hidden_pair_strips_other_candidates() {
        // In row 0, confine digits 3 and 8 to columns 2 and 6.
        let mut state = CandidateState::from_board(&Board::new()).unwrap();
        for col in 0..9 {
            if col == 2 || col == 6 {
                continue;
            }
            state.eliminate(cell_at(0, col), 3).unwrap();
            state.eliminate(cell_at(0, col), 8).unwrap();
        }

        let step = HiddenPair::new().apply(&mut state).unwrap().unwrap();
        assert_eq!(step.technique, TechniqueKind::HiddenPair);
        assert!(step.detail.starts_with("pair (3,8)"), "{}", step.detail);

        let expected = DigitSet::from_iter([3, 8]);
        assert_eq!(state.candidates_at(cell_at(0, 2)), expected);
        assert_eq!(state.candidates_at(cell_at(0, 6)), expected);
    }

    #[test]
    fn test_idle_when_pair_cells_are_already_bare() {
        let mut state = CandidateState::from_board(&Board::new()).unwrap();
        for col in 0..9 {
            if col == 2 || col == 6 {
                continue;
            }
            state.eliminate(cell_at(0, col), 3).unwrap();
            state.eliminate(cell_at(0, col), 8).unwrap();
        }
        for digit in [1, 2, 4, 5, 6, 7, 9] {
            state.eliminate(cell_at(0, 2), digit).unwrap();
            state.eliminate(cell_at(0, 6), digit).unwrap();
        }
        // The hidden pair is already reduced to a naked pair; nothing to do.
        assert_eq!(HiddenPair::new().apply(&mut state).unwrap(), None);
    }

    #[test]
    fn test_idle_on_open_board() {
        let mut state = CandidateState::from_board(&Board::new()).unwrap();
        assert_eq!(HiddenPair::new().apply(&mut state).unwrap(), None);
    }
}
