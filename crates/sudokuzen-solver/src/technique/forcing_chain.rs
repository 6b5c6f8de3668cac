use sudokuzen_core::{CandidateState, Contradiction, geometry::CELL_COUNT};

use super::{
    BoxedTechnique, HiddenSingle, LockedCandidates, NakedSingle, Technique, TechniqueKind,
    cell_label,
};
use crate::TraceStep;

/// Propagation rounds granted to each speculative assignment.
const PROPAGATION_CAP: usize = 200;

/// Forcing-chain fallback (the `aic` tier).
///
/// For every remaining candidate, tentatively assign it on a clone of the
/// state and propagate with the three cheapest techniques (naked single,
/// hidden single, locked candidates) to a fixpoint. A candidate whose
/// assumption collapses into a contradiction is eliminated from the real
/// state. The clone is discarded on every exit path, so speculation never
/// leaks.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForcingChain;

impl ForcingChain {
    /// Creates a new `ForcingChain` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Runs the cheap technique trio to a fixpoint on a speculative state.
///
/// Returns `false` when propagation runs into a contradiction.
fn propagates_cleanly(state: &mut CandidateState) -> bool {
    let trio: [&dyn Technique; 3] = [&NakedSingle, &HiddenSingle, &LockedCandidates];
    for _ in 0..PROPAGATION_CAP {
        let mut progressed = false;
        for technique in trio {
            match technique.apply(state) {
                Err(_) => return false,
                Ok(Some(_)) => {
                    progressed = true;
                    break;
                }
                Ok(None) => {}
            }
        }
        if !progressed {
            break;
        }
    }
    true
}

fn assumption_contradicts(state: &CandidateState, cell: usize, digit: u8) -> bool {
    let mut speculative = state.clone();
    if speculative.assign(cell, digit).is_err() {
        return true;
    }
    !propagates_cleanly(&mut speculative)
}

impl Technique for ForcingChain {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::Aic
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, state: &mut CandidateState) -> Result<Option<TraceStep>, Contradiction> {
        for cell in 0..CELL_COUNT {
            if !state.is_cell_empty(cell) || state.candidates_at(cell).len() <= 1 {
                continue;
            }
            for digit in state.candidates_at(cell) {
                if assumption_contradicts(state, cell, digit) {
                    state.eliminate(cell, digit)?;
                    let detail =
                        format!("forcing contradiction at {}, removed {digit}", cell_label(cell));
                    return Ok(Some(TraceStep::eliminate(TechniqueKind::Aic, detail)));
                }
            }
        }
        Ok(None)
    }
}
