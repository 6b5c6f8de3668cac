//! Trace scoring and technique-tier classification.

use std::collections::BTreeMap;

use crate::{
    Action, TraceStep,
    technique::TechniqueKind,
};

/// Per-technique score contributions.
///
/// The default table is the fixed weight table used across the catalog:
/// naked/hidden single 1, locked candidates 2, naked pair 3, hidden pair 4,
/// X-Wing 6, XY-Wing 7, Swordfish 8, AIC 9.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weights {
    table: [u32; TechniqueKind::ALL.len()],
}

impl Default for Weights {
    fn default() -> Self {
        let mut table = [0; TechniqueKind::ALL.len()];
        for (slot, kind) in TechniqueKind::ALL.into_iter().enumerate() {
            table[slot] = kind.weight();
        }
        Self { table }
    }
}

impl Weights {
    /// Returns the weight of a technique.
    #[must_use]
    pub fn get(&self, kind: TechniqueKind) -> u32 {
        let slot = TechniqueKind::ALL
            .into_iter()
            .position(|k| k == kind)
            .expect("kind is in ALL");
        self.table[slot]
    }

    /// Overrides the weight of a technique.
    pub fn set(&mut self, kind: TechniqueKind, weight: u32) {
        let slot = TechniqueKind::ALL
            .into_iter()
            .position(|k| k == kind)
            .expect("kind is in ALL");
        self.table[slot] = weight;
    }
}

/// Aggregate view of a deduction trace.
///
/// The summary depends only on the multiset of (technique, action) pairs:
/// permuting a trace never changes it.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSummary {
    /// Σ weight × count over all techniques in the trace.
    pub score: u32,
    /// The heaviest technique that fired, or `None` for an empty trace.
    pub max_technique: Option<TechniqueKind>,
    /// Fraction of placement steps made by naked/hidden single; 0 when the
    /// trace places nothing.
    pub single_ratio: f64,
    /// Number of steps per technique.
    pub technique_counts: BTreeMap<TechniqueKind, usize>,
}

impl TraceSummary {
    /// Returns the wire name of the heaviest technique (`"none"` for an
    /// empty trace).
    #[must_use]
    pub fn max_technique_name(&self) -> &'static str {
        self.max_technique.map_or("none", TechniqueKind::as_str)
    }
}

/// Scores a trace against a weight table.
#[must_use]
pub fn summarize(trace: &[TraceStep], weights: &Weights) -> TraceSummary {
    let mut technique_counts = BTreeMap::new();
    for step in trace {
        *technique_counts.entry(step.technique).or_insert(0) += 1;
    }

    let score = technique_counts
        .iter()
        .map(|(&kind, &count)| weights.get(kind) * u32::try_from(count).unwrap_or(u32::MAX))
        .sum();

    // Heaviest technique present; equal weights resolve to the cheaper
    // position in cost order.
    let mut max_technique = None;
    let mut max_weight = 0;
    for kind in TechniqueKind::ALL {
        if technique_counts.contains_key(&kind) && weights.get(kind) > max_weight {
            max_weight = weights.get(kind);
            max_technique = Some(kind);
        }
    }

    let placements = trace
        .iter()
        .filter(|step| step.action == Action::Place)
        .count();
    let single_placements = trace
        .iter()
        .filter(|step| {
            step.action == Action::Place
                && matches!(
                    step.technique,
                    TechniqueKind::NakedSingle | TechniqueKind::HiddenSingle
                )
        })
        .count();
    #[expect(clippy::cast_precision_loss)]
    let single_ratio = if placements == 0 {
        0.0
    } else {
        single_placements as f64 / placements as f64
    };

    TraceSummary {
        score,
        max_technique,
        single_ratio,
        technique_counts,
    }
}
