use sudokuzen_core::{CandidateState, Contradiction, geometry::UNITS};

use super::{BoxedTechnique, Technique, TechniqueKind};
use crate::TraceStep;

/// Two cells of a unit carrying the same two-candidate set lock those two
/// digits out of the rest of the unit.
///
/// Equality of candidate sets is a single integer comparison on the cell
/// masks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedPair;

impl NakedPair {
    /// Creates a new `NakedPair` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for NakedPair {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::NakedPair
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, state: &mut CandidateState) -> Result<Option<TraceStep>, Contradiction> {
        for unit in &UNITS {
            for (i, &first) in unit.iter().enumerate() {
                let pair = state.candidates_at(first);
                if state.value_at(first) != 0 || pair.len() != 2 {
                    continue;
                }
                for &second in &unit[i + 1..] {
                    if state.value_at(second) != 0 || state.candidates_at(second) != pair {
                        continue;
                    }
                    // Three cells sharing the pair would make the unit
                    // unsatisfiable; leave that for the cascade to surface.
                    let carriers = unit
                        .iter()
                        .filter(|&&cell| {
                            state.value_at(cell) == 0 && state.candidates_at(cell) == pair
                        })
                        .count();
                    if carriers != 2 {
                        continue;
                    }

                    let mut removed = 0;
                    for &cell in unit {
                        if cell == first || cell == second || state.value_at(cell) != 0 {
                            continue;
                        }
                        for digit in pair {
                            if state.candidates_at(cell).contains(digit) {
                                state.eliminate(cell, digit)?;
                                removed += 1;
                            }
                        }
                    }
                    if removed > 0 {
                        let (a, b) = pair.as_pair().expect("pair has two digits");
                        let detail = format!("pair ({a},{b}) removed {removed}");
                        return Ok(Some(TraceStep::eliminate(TechniqueKind::NakedPair, detail)));
                    }
                }
            }
        }
        Ok(None)
    }
}
