//! Catalog filtering with per-reason rejection tallies.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use sudokuzen_core::{Board, ParseBoardError, count_solutions};
use sudokuzen_solver::{
    LogicSolver, TechniqueKind, TraceStep, TraceSummary, Weights, summarize,
};

use crate::LevelRecord;

/// Acceptance rules for catalog candidates.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Inclusive lower bound on clue count.
    pub min_clues: usize,
    /// Inclusive upper bound on clue count.
    pub max_clues: usize,
    /// Techniques the solver may apply, in application order.
    pub allowed_techniques: Vec<TechniqueKind>,
    /// Score contributions per technique.
    pub weights: Weights,
    /// Minimum difficulty score.
    pub min_score: u32,
    /// Maximum tolerated singles ratio.
    pub max_single_ratio: f64,
    /// Reject puzzles whose solution count differs from one.
    pub require_unique: bool,
    /// Keep only the top-k candidates; `None` keeps all.
    pub target_count: Option<usize>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_clues: 17,
            max_clues: 19,
            allowed_techniques: TechniqueKind::ALL.to_vec(),
            weights: Weights::default(),
            min_score: 35,
            max_single_ratio: 0.65,
            require_unique: true,
            target_count: None,
        }
    }
}

/// Why a level was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The id already appeared earlier in the catalog.
    DuplicateId,
    /// The record carries no puzzle array.
    MissingPuzzle,
    /// The puzzle array does not hold 81 cells.
    InvalidLength,
    /// The puzzle array holds a value outside 0-9.
    InvalidValue,
    /// The clue count is outside the configured range.
    CluesOutOfRange,
    /// The puzzle is unsatisfiable.
    NoSolution,
    /// The puzzle has more than one solution.
    MultipleSolutions,
    /// The solver stalls below a full solution.
    NotLogicSolvable,
    /// The difficulty score is below the minimum.
    LowScore,
    /// The singles ratio is above the maximum.
    TooManySingles,
    /// The candidate passed but lost the top-k cut.
    TargetTrim,
}

impl RejectReason {
    /// Returns the reason code used in filter reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateId => "duplicate_id",
            Self::MissingPuzzle => "missing_puzzle",
            Self::InvalidLength => "invalid_length",
            Self::InvalidValue => "invalid_value",
            Self::CluesOutOfRange => "clues_out_of_range",
            Self::NoSolution => "no_solution",
            Self::MultipleSolutions => "multiple_solutions",
            Self::NotLogicSolvable => "not_logic_solvable",
            Self::LowScore => "low_score",
            Self::TooManySingles => "too_many_singles",
            Self::TargetTrim => "target_trim",
        }
    }
}

/// A level that cleared every acceptance rule.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Id of the source record.
    pub id: u64,
    /// Display name of the source record.
    pub display_name: String,
    /// Decoded puzzle.
    pub puzzle: Board,
    /// Clue count.
    pub clues: usize,
    /// Solution count under the probe cap, when uniqueness was required.
    pub solution_count: Option<usize>,
    /// Score, heaviest technique, singles ratio, technique counts.
    pub summary: TraceSummary,
    /// The full solve trace.
    pub trace: Vec<TraceStep>,
}

/// A level that was dropped, with its reason code.
#[derive(Debug, Clone)]
pub struct Reject {
    /// Id of the source record.
    pub id: u64,
    /// Display name of the source record.
    pub display_name: String,
    /// Why the level was dropped.
    pub reason: RejectReason,
}

/// The outcome of a filter pass.
#[derive(Debug, Clone, Default)]
pub struct FilterReport {
    /// Accepted candidates in input order.
    pub candidates: Vec<Candidate>,
    /// Dropped levels in input order.
    pub rejects: Vec<Reject>,
    /// Rejection counts by reason.
    pub tallies: BTreeMap<RejectReason, u64>,
    /// Accepted candidates per clue count.
    pub clue_distribution: BTreeMap<usize, usize>,
}

impl FilterReport {
    fn reject(&mut self, record: &LevelRecord, reason: RejectReason) {
        self.rejects.push(Reject {
            id: record.id,
            display_name: record.display_name.clone(),
            reason,
        });
        *self.tallies.entry(reason).or_insert(0) += 1;
    }
}

/// Filters a catalog, tallying every rejection by reason code.
///
/// Checks run cheapest first: identity, puzzle shape, clue range,
/// uniqueness, then the logic solve and its score thresholds. When
/// [`FilterConfig::target_count`] is set, surviving candidates are ranked
/// by (score desc, singles ratio asc, clues asc, id asc) and the rest are
/// trimmed.
#[must_use]
pub fn filter_levels(levels: &[LevelRecord], config: &FilterConfig) -> FilterReport {
    let solver = LogicSolver::with_kinds(&config.allowed_techniques);
    let mut report = FilterReport::default();
    let mut seen_ids = HashSet::new();

    for record in levels {
        if !seen_ids.insert(record.id) {
            report.reject(record, RejectReason::DuplicateId);
            continue;
        }
        if record.puzzle.is_empty() {
            report.reject(record, RejectReason::MissingPuzzle);
            continue;
        }
        let puzzle = match record.board() {
            Ok(board) => board,
            Err(ParseBoardError::BadLength { .. }) => {
                report.reject(record, RejectReason::InvalidLength);
                continue;
            }
            Err(_) => {
                report.reject(record, RejectReason::InvalidValue);
                continue;
            }
        };

        let clues = puzzle.clue_count();
        if clues < config.min_clues || clues > config.max_clues {
            report.reject(record, RejectReason::CluesOutOfRange);
            continue;
        }

        let solution_count = if config.require_unique {
            let count = count_solutions(&puzzle, 2);
            if count != 1 {
                let reason = if count == 0 {
                    RejectReason::NoSolution
                } else {
                    RejectReason::MultipleSolutions
                };
                report.reject(record, reason);
                continue;
            }
            Some(count)
        } else {
            None
        };

        let outcome = solver.solve(&puzzle);
        if !outcome.solved {
            report.reject(record, RejectReason::NotLogicSolvable);
            continue;
        }

        let summary = summarize(&outcome.trace, &config.weights);
        if summary.score < config.min_score {
            report.reject(record, RejectReason::LowScore);
            continue;
        }
        if summary.single_ratio > config.max_single_ratio {
            report.reject(record, RejectReason::TooManySingles);
            continue;
        }

        report.candidates.push(Candidate {
            id: record.id,
            display_name: record.display_name.clone(),
            puzzle,
            clues,
            solution_count,
            summary,
            trace: outcome.trace,
        });
    }

    if let Some(target) = config.target_count
        && report.candidates.len() > target
    {
        trim_to_target(&mut report, target);
    }

    for candidate in &report.candidates {
        *report.clue_distribution.entry(candidate.clues).or_insert(0) += 1;
    }
    log::info!(
        "filter: {} candidates, {} rejects",
        report.candidates.len(),
        report.rejects.len()
    );
    report
}

fn trim_to_target(report: &mut FilterReport, target: usize) {
    let mut ranked: Vec<usize> = (0..report.candidates.len()).collect();
    ranked.sort_by(|&a, &b| {
        let ca = &report.candidates[a];
        let cb = &report.candidates[b];
        cb.summary
            .score
            .cmp(&ca.summary.score)
            .then(
                ca.summary
                    .single_ratio
                    .partial_cmp(&cb.summary.single_ratio)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then(ca.clues.cmp(&cb.clues))
            .then(ca.id.cmp(&cb.id))
    });
    let keep: HashSet<u64> = ranked[..target]
        .iter()
        .map(|&i| report.candidates[i].id)
        .collect();

    let mut kept = Vec::with_capacity(target);
    for candidate in report.candidates.drain(..) {
        if keep.contains(&candidate.id) {
            kept.push(candidate);
        } else {
            report.rejects.push(Reject {
                id: candidate.id,
                display_name: candidate.display_name.clone(),
                reason: RejectReason::TargetTrim,
            });
            *report.tallies.entry(RejectReason::TargetTrim).or_insert(0) += 1;
        }
    }
    report.candidates = kept;
}
