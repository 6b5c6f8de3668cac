//! The deduction trace: an ordered log of solver steps.

use serde::{Deserialize, Serialize};

use crate::technique::TechniqueKind;

/// What a trace step did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A digit was placed in a cell.
    Place,
    /// One or more candidates were removed.
    Eliminate,
}

/// One recorded deduction.
///
/// The technique and action are the tested contract; `detail` is a short
/// human-readable descriptor (cell, digit, pattern coordinates) and its
/// exact text is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    /// The technique that fired.
    pub technique: TechniqueKind,
    /// Whether the step placed a digit or eliminated candidates.
    pub action: Action,
    /// Short descriptor such as `r3c5=7`.
    pub detail: String,
}

impl TraceStep {
    /// Creates a placement step.
    #[must_use]
    pub fn place(technique: TechniqueKind, detail: String) -> Self {
        Self {
            technique,
            action: Action::Place,
            detail,
        }
    }

    /// Creates an elimination step.
    #[must_use]
    pub fn eliminate(technique: TechniqueKind, detail: String) -> Self {
        Self {
            technique,
            action: Action::Eliminate,
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_wire_names() {
        let step = TraceStep::place(TechniqueKind::HiddenSingle, "r1c2=3".to_owned());
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["technique"], "hidden_single");
        assert_eq!(json["action"], "place");
        assert_eq!(json["detail"], "r1c2=3");
    }
}
