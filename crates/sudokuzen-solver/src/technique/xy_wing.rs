use sudokuzen_core::{
    CandidateState, Contradiction,
    geometry::{CELL_COUNT, PEERS},
};
use tinyvec::ArrayVec;

use super::{BoxedTechnique, Technique, TechniqueKind, cell_label};
use crate::TraceStep;

/// XY-Wing eliminations.
///
/// A pivot cell with candidates `{a, b}` and two peer wings `{a, z}` and
/// `{b, z}` force `z` out of every cell that sees both wings: whichever way
/// the pivot resolves, one wing becomes `z`.
#[derive(Debug, Default, Clone, Copy)]
pub struct XyWing;

impl XyWing {
    /// Creates a new `XyWing` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for XyWing {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::XyWing
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, state: &mut CandidateState) -> Result<Option<TraceStep>, Contradiction> {
        for pivot in 0..CELL_COUNT {
            let pivot_digits = state.candidates_at(pivot);
            if state.value_at(pivot) != 0 {
                continue;
            }
            let Some((a, b)) = pivot_digits.as_pair() else {
                continue;
            };

            let mut wings_a = ArrayVec::<[usize; 20]>::new();
            let mut wings_b = ArrayVec::<[usize; 20]>::new();
            for &peer in &PEERS[pivot] {
                let digits = state.candidates_at(peer);
                if state.value_at(peer) != 0 || digits.len() != 2 {
                    continue;
                }
                if digits.contains(a) && !digits.contains(b) {
                    wings_a.push(peer);
                } else if digits.contains(b) && !digits.contains(a) {
                    wings_b.push(peer);
                }
            }

            for &wing_a in &wings_a {
                let Some(z) = state
                    .candidates_at(wing_a)
                    .difference(pivot_digits)
                    .as_single()
                else {
                    continue;
                };
                for &wing_b in &wings_b {
                    if !state.candidates_at(wing_b).contains(z) {
                        continue;
                    }
                    let mut removed = 0;
                    for &target in &PEERS[wing_a] {
                        if target == pivot || target == wing_b || !PEERS[wing_b].contains(&target)
                        {
                            continue;
                        }
                        if state.is_cell_empty(target) && state.candidates_at(target).contains(z)
                        {
                            state.eliminate(target, z)?;
                            removed += 1;
                        }
                    }
                    if removed > 0 {
                        let detail = format!(
                            "pivot {}, wings {}/{}, z={z}, removed {removed}",
                            cell_label(pivot),
                            cell_label(wing_a),
                            cell_label(wing_b)
                        );
                        return Ok(Some(TraceStep::eliminate(TechniqueKind::XyWing, detail)));
                    }
                }
            }
        }
        Ok(None)
    }
}
