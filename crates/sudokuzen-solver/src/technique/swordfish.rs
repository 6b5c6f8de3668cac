use sudokuzen_core::{CandidateState, Contradiction, geometry::cell_at};
use tinyvec::ArrayVec;

use super::{BoxedTechnique, Technique, TechniqueKind};
use crate::TraceStep;

/// Swordfish eliminations.
///
/// Three rows whose candidate positions for a digit together span exactly
/// three columns (each row contributing two or three of them) clear that
/// digit from those columns in every other row; the column-based form is
/// symmetric.
#[derive(Debug, Default, Clone, Copy)]
pub struct Swordfish;

impl Swordfish {
    /// Creates a new `Swordfish` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Lines where `digit` occupies two or three slots, as 9-bit slot masks.
fn fish_lines(
    state: &CandidateState,
    digit: u8,
    at: impl Fn(usize, usize) -> usize,
) -> ArrayVec<[(usize, u16); 9]> {
    let mut lines = ArrayVec::new();
    for line in 0..9 {
        let mut mask = 0u16;
        for slot in 0..9 {
            let cell = at(line, slot);
            if state.is_cell_empty(cell) && state.candidates_at(cell).contains(digit) {
                mask |= 1 << slot;
            }
        }
        if (2..=3).contains(&mask.count_ones()) {
            lines.push((line, mask));
        }
    }
    lines
}

fn slots_of(mask: u16) -> impl Iterator<Item = usize> {
    (0..9).filter(move |slot| mask & (1 << slot) != 0)
}

fn join(slots: impl Iterator<Item = usize>) -> String {
    let labels: Vec<String> = slots.map(|slot| (slot + 1).to_string()).collect();
    labels.join(",")
}

impl Technique for Swordfish {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::Swordfish
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    #[expect(clippy::too_many_lines)]
    fn apply(&self, state: &mut CandidateState) -> Result<Option<TraceStep>, Contradiction> {
        // Row-based.
        for digit in 1..=9 {
            let rows = fish_lines(state, digit, cell_at);
            for (i, &(r1, m1)) in rows.iter().enumerate() {
                for (j, &(r2, m2)) in rows.iter().enumerate().skip(i + 1) {
                    for &(r3, m3) in &rows[j + 1..] {
                        let union = m1 | m2 | m3;
                        if union.count_ones() != 3 {
                            continue;
                        }
                        let mut removed = 0;
                        for row in 0..9 {
                            if row == r1 || row == r2 || row == r3 {
                                continue;
                            }
                            for col in slots_of(union) {
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
                                "d{digit} rows {},{},{} cols {} removed {removed}",
                                r1 + 1,
                                r2 + 1,
                                r3 + 1,
                                join(slots_of(union))
                            );
                            return Ok(Some(TraceStep::eliminate(
                                TechniqueKind::Swordfish,
                                detail,
                            )));
                        }
                    }
                }
            }
        }

        // Column-based.
        for digit in 1..=9 {
            let cols = fish_lines(state, digit, |line, slot| cell_at(slot, line));
            for (i, &(c1, m1)) in cols.iter().enumerate() {
                for (j, &(c2, m2)) in cols.iter().enumerate().skip(i + 1) {
                    for &(c3, m3) in &cols[j + 1..] {
                        let union = m1 | m2 | m3;
                        if union.count_ones() != 3 {
                            continue;
                        }
                        let mut removed = 0;
                        for col in 0..9 {
                            if col == c1 || col == c2 || col == c3 {
                                continue;
                            }
                            for row in slots_of(union) {
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
                                "d{digit} cols {},{},{} rows {} removed {removed}",
                                c1 + 1,
                                c2 + 1,
                                c3 + 1,
                                join(slots_of(union))
                            );
                            return Ok(Some(TraceStep::eliminate(
                                TechniqueKind::Swordfish,
                                detail,
                            )));
                        }
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
    fn test_row_swordfish_clears_three_columns() {
        // Digit 2 restricted to columns {0, 4, 8} in rows 1, 4, 7.
        let mut state = CandidateState::from_board(&Board::new()).unwrap();
        for row in [1, 4, 7] {
            for col in 0..9 {
                if col != 0 && col != 4 && col != 8 {
                    state.eliminate(cell_at(row, col), 2).unwrap();
                }
            }
        }

        let step = Swordfish::new().apply(&mut state).unwrap().unwrap();
        assert_eq!(step.technique, TechniqueKind::Swordfish);
        assert!(
            step.detail.starts_with("d2 rows 2,5,8 cols 1,5,9"),
            "{}",
            step.detail
        );

        for row in 0..9 {
            if row == 1 || row == 4 || row == 7 {
                continue;
            }
            for col in [0, 4, 8] {
                assert!(!state.candidates_at(cell_at(row, col)).contains(2));
            }
        }
        assert!(state.candidates_at(cell_at(1, 0)).contains(2));
    }

    #[test]
    fn test_accepts_two_position_rows() {
        // Row 1 carries only two of the three columns; still a swordfish.
        let mut state = CandidateState::from_board(&Board::new()).unwrap();
        for (row, keep) in [(1, [0, 4]), (4, [4, 8]), (7, [0, 8])] {
            for col in 0..9 {
                if !keep.contains(&col) {
                    state.eliminate(cell_at(row, col), 2).unwrap();
                }
            }
        }

        let step = Swordfish::new().apply(&mut state).unwrap().unwrap();
        assert!(step.detail.starts_with("d2 rows 2,5,8"), "{}", step.detail);
        assert!(!state.candidates_at(cell_at(0, 0)).contains(2));
    }

    #[test]
    fn test_idle_on_open_board() {
        let mut state = CandidateState::from_board(&Board::new()).unwrap();
        assert_eq!(Swordfish::new().apply(&mut state).unwrap(), None);
    }
}
