//! The deduction technique library.
//!
//! Each technique scans the candidate state in a fixed order (ascending
//! unit index, cell index, digit) and, on its first qualifying find,
//! applies its changes and reports a single [`TraceStep`]. This ordering is
//! observable: traces and difficulty scores are reproducible.

use std::{fmt::Debug, str::FromStr};

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use sudokuzen_core::{CandidateState, Contradiction};

pub use self::{
    forcing_chain::ForcingChain, hidden_pair::HiddenPair, hidden_single::HiddenSingle,
    locked_candidates::LockedCandidates, naked_pair::NakedPair, naked_single::NakedSingle,
    swordfish::Swordfish, x_wing::XWing, xy_wing::XyWing,
};
use crate::TraceStep;

mod forcing_chain;
mod hidden_pair;
mod hidden_single;
mod locked_candidates;
mod naked_pair;
mod naked_single;
mod swordfish;
mod x_wing;
mod xy_wing;

/// The nine deduction techniques, identified by their wire names.
///
/// Ordering of the `ALL` array is cost order, cheapest first; the logic
/// solver restarts from the front of its list after every progress step so
/// cheap deductions are always re-examined before expensive ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechniqueKind {
    /// A cell whose candidate set has exactly one digit.
    NakedSingle,
    /// A digit possible in exactly one cell of a unit.
    HiddenSingle,
    /// Box/line intersection eliminations (pointing and claiming).
    LockedCandidates,
    /// Two cells of a unit sharing the same two-candidate set.
    NakedPair,
    /// Two digits confined to the same two cells of a unit.
    HiddenPair,
    /// Two rows (or columns) with a digit in the same two columns (rows).
    XWing,
    /// A two-candidate pivot with two wings sharing a third digit.
    XyWing,
    /// Three rows (or columns) whose digit positions span three columns
    /// (rows).
    Swordfish,
    /// Forcing-chain fallback: a candidate whose assumption propagates to a
    /// contradiction is eliminated.
    Aic,
}

impl TechniqueKind {
    /// All techniques in cost order, cheapest first.
    pub const ALL: [Self; 9] = [
        Self::NakedSingle,
        Self::HiddenSingle,
        Self::LockedCandidates,
        Self::NakedPair,
        Self::HiddenPair,
        Self::XWing,
        Self::XyWing,
        Self::Swordfish,
        Self::Aic,
    ];

    /// Returns the wire name of the technique.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NakedSingle => "naked_single",
            Self::HiddenSingle => "hidden_single",
            Self::LockedCandidates => "locked_candidates",
            Self::NakedPair => "naked_pair",
            Self::HiddenPair => "hidden_pair",
            Self::XWing => "x_wing",
            Self::XyWing => "xy_wing",
            Self::Swordfish => "swordfish",
            Self::Aic => "aic",
        }
    }

    /// Returns the fixed difficulty weight of the technique.
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::NakedSingle | Self::HiddenSingle => 1,
            Self::LockedCandidates => 2,
            Self::NakedPair => 3,
            Self::HiddenPair => 4,
            Self::XWing => 6,
            Self::XyWing => 7,
            Self::Swordfish => 8,
            Self::Aic => 9,
        }
    }

    /// Instantiates the technique behind this kind.
    #[must_use]
    pub fn technique(self) -> BoxedTechnique {
        match self {
            Self::NakedSingle => Box::new(NakedSingle::new()),
            Self::HiddenSingle => Box::new(HiddenSingle::new()),
            Self::LockedCandidates => Box::new(LockedCandidates::new()),
            Self::NakedPair => Box::new(NakedPair::new()),
            Self::HiddenPair => Box::new(HiddenPair::new()),
            Self::XWing => Box::new(XWing::new()),
            Self::XyWing => Box::new(XyWing::new()),
            Self::Swordfish => Box::new(Swordfish::new()),
            Self::Aic => Box::new(ForcingChain::new()),
        }
    }
}

impl std::fmt::Display for TechniqueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced when a technique name does not match any wire name.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("unknown technique {name:?}")]
pub struct UnknownTechnique {
    /// The unrecognized name.
    pub name: String,
}

impl FromStr for TechniqueKind {
    type Err = UnknownTechnique;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownTechnique { name: s.to_owned() })
    }
}

/// A deduction technique over the candidate state.
///
/// `apply` mutates the state on its first qualifying find and returns the
/// recorded step; `Ok(None)` means the technique is idle on this state.
pub trait Technique: Debug {
    /// Returns which [`TechniqueKind`] this technique implements.
    fn kind(&self) -> TechniqueKind;

    /// Returns the wire name of the technique.
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Returns a boxed clone of the technique.
    fn clone_box(&self) -> BoxedTechnique;

    /// Scans the state and applies the first qualifying find.
    ///
    /// # Errors
    ///
    /// Returns [`Contradiction`] when applying the find empties a candidate
    /// set; the state may be partially modified in that case and must be
    /// discarded by the caller.
    fn apply(&self, state: &mut CandidateState) -> Result<Option<TraceStep>, Contradiction>;
}

/// A boxed technique.
pub type BoxedTechnique = Box<dyn Technique>;

impl Clone for BoxedTechnique {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Returns all nine techniques in cost order, cheapest first.
#[must_use]
pub fn all_techniques() -> Vec<BoxedTechnique> {
    TechniqueKind::ALL
        .into_iter()
        .map(TechniqueKind::technique)
        .collect()
}

/// Returns techniques for the given kinds, preserving the caller's order.
#[must_use]
pub fn techniques_for(kinds: &[TechniqueKind]) -> Vec<BoxedTechnique> {
    kinds.iter().map(|kind| kind.technique()).collect()
}

pub(crate) fn cell_label(cell: usize) -> String {
    use sudokuzen_core::geometry::{col_of, row_of};
    format!("r{}c{}", row_of(cell) + 1, col_of(cell) + 1)
}
