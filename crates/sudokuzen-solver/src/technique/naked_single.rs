use sudokuzen_core::{CandidateState, Contradiction, geometry::CELL_COUNT};

use super::{BoxedTechnique, Technique, TechniqueKind, cell_label};
use crate::TraceStep;

/// Places the digit of a cell whose candidate set has exactly one entry.
///
/// This is the cheapest deduction: the placement itself cascades the
/// elimination of the digit from all 20 peers through the assignment
/// primitive.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedSingle;

impl NakedSingle {
    /// Creates a new `NakedSingle` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for NakedSingle {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::NakedSingle
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, state: &mut CandidateState) -> Result<Option<TraceStep>, Contradiction> {
        for cell in 0..CELL_COUNT {
            if state.is_cell_empty(cell)
                && let Some(digit) = state.candidates_at(cell).as_single()
            {
                state.assign(cell, digit)?;
                let detail = format!("{}={digit}", cell_label(cell));
                return Ok(Some(TraceStep::place(TechniqueKind::NakedSingle, detail)));
            }
        }
        Ok(None)
    }
}
