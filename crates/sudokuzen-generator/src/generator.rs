//! Seeded puzzle generation and pool-based batch selection.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use sudokuzen_core::Board;
use sudokuzen_solver::{LogicSolver, TraceSummary, Weights, summarize};

use crate::{
    DigParams, PuzzleSeed, UniquenessCache,
    dig::dig_puzzle,
    solution::shuffled_solution,
};

/// Thresholds a scored puzzle must clear to be accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Acceptance {
    /// Minimum difficulty score.
    pub min_score: u32,
    /// Maximum tolerated singles ratio.
    pub max_single_ratio: f64,
}

impl Default for Acceptance {
    fn default() -> Self {
        Self {
            min_score: 35,
            max_single_ratio: 0.65,
        }
    }
}

/// Pool sizing for batch generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolParams {
    /// Pool size per clue target = `max(min_per_clue, count * multiplier)`.
    pub multiplier: usize,
    /// Lower bound on the pool size per clue target.
    pub min_per_clue: usize,
    /// Hard cap on dig attempts per clue target.
    pub max_attempts: usize,
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            multiplier: 25,
            min_per_clue: 30,
            max_attempts: 120_000,
        }
    }
}

/// Why a generated or scored puzzle was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GenReject {
    /// The two-stage dig never reached the target clue count.
    DigFailed,
    /// The puzzle fingerprint already exists in the known catalog.
    DuplicateExisting,
    /// The puzzle was generated twice within this batch.
    DuplicateGenerated,
    /// The final uniqueness probe failed.
    NotUnique,
    /// The logic solver stalled below a full solution.
    NotLogicSolvable,
    /// The difficulty score fell below the acceptance minimum.
    LowScore,
    /// The singles ratio exceeded the acceptance maximum.
    TooManySingles,
    /// The puzzle passed but lost the top-k cut.
    OverTargetTrim,
}

impl GenReject {
    /// Returns the reason code used in generation reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DigFailed => "stage1_dig_failed",
            Self::DuplicateExisting => "stage1_duplicate_existing",
            Self::DuplicateGenerated => "stage1_duplicate_generated",
            Self::NotUnique => "stage1_not_unique",
            Self::NotLogicSolvable => "stage2_not_logic_solvable",
            Self::LowScore => "stage2_low_score",
            Self::TooManySingles => "stage2_too_many_singles",
            Self::OverTargetTrim => "stage2_over_target_trim",
        }
    }
}

/// One synthesized puzzle with its provenance and scoring.
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    /// The dug puzzle.
    pub puzzle: Board,
    /// The solved grid it was dug from.
    pub solution: Board,
    /// Seed of the run that produced it.
    pub seed: PuzzleSeed,
    /// Number of clues in the puzzle.
    pub clues: usize,
    /// Trace summary, absent when the logic solver stalls on the puzzle.
    pub summary: Option<TraceSummary>,
}

/// How many puzzles of a clue count a batch wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRequest {
    /// Target clue count.
    pub target_clues: usize,
    /// Number of accepted puzzles wanted.
    pub count: usize,
}

/// Outcome of a batch run: accepted puzzles plus per-reason tallies.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Accepted puzzles across all clue targets, best first per target.
    pub accepted: Vec<GeneratedPuzzle>,
    /// Rejection tallies by reason code.
    pub rejects: BTreeMap<GenReject, u64>,
    /// Dig attempts per clue target.
    pub attempts: BTreeMap<usize, usize>,
    /// Unique pool sizes per clue target.
    pub pool_sizes: BTreeMap<usize, usize>,
    /// Uniqueness-cache hits over the whole batch.
    pub cache_hits: u64,
    /// Uniqueness-cache misses over the whole batch.
    pub cache_misses: u64,
}

impl BatchReport {
    fn tally(&mut self, reason: GenReject) {
        *self.rejects.entry(reason).or_insert(0) += 1;
    }
}

/// Two-stage puzzle synthesizer.
///
/// Stage 1 digs unique puzzles from shuffled full solutions; stage 2 scores
/// them with the borrowed [`LogicSolver`] and keeps the best under the
/// acceptance thresholds.
///
/// # Examples
///
/// ```no_run
/// use sudokuzen_generator::{PuzzleGenerator, PuzzleSeed};
/// use sudokuzen_solver::LogicSolver;
///
/// let solver = LogicSolver::with_all_techniques();
/// let generator = PuzzleGenerator::new(&solver);
///
/// let puzzle = generator
///     .generate_with_seed(PuzzleSeed::from_u64(42), 24)
///     .expect("dig failed");
/// assert_eq!(puzzle.clues, 24);
/// ```
#[derive(Debug)]
pub struct PuzzleGenerator<'a> {
    solver: &'a LogicSolver,
    weights: Weights,
    dig: DigParams,
}

impl<'a> PuzzleGenerator<'a> {
    /// Creates a generator with default weights and dig parameters.
    #[must_use]
    pub fn new(solver: &'a LogicSolver) -> Self {
        Self {
            solver,
            weights: Weights::default(),
            dig: DigParams::default(),
        }
    }

    /// Replaces the dig parameters.
    #[must_use]
    pub fn with_dig_params(mut self, dig: DigParams) -> Self {
        self.dig = dig;
        self
    }

    /// Replaces the scoring weights.
    #[must_use]
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Generates one unique puzzle at the target clue count.
    ///
    /// The run is a pure function of `(seed, target_clues, params)`;
    /// repeating it reproduces the same puzzle and the same summary.
    /// Returns `None` when every dig restart exhausts its budget — the
    /// caller retries with a fresh seed.
    #[must_use]
    pub fn generate_with_seed(
        &self,
        seed: PuzzleSeed,
        target_clues: usize,
    ) -> Option<GeneratedPuzzle> {
        let mut rng = seed.rng();
        let mut cache = UniquenessCache::new();
        let solution = shuffled_solution(&mut rng);
        let puzzle = dig_puzzle(&solution, target_clues, &mut rng, &mut cache, &self.dig)?;
        Some(self.finish(puzzle, solution, seed))
    }

    /// Generates one unique puzzle from OS entropy.
    #[must_use]
    pub fn generate(&self, target_clues: usize) -> Option<GeneratedPuzzle> {
        self.generate_with_seed(PuzzleSeed::random(), target_clues)
    }

    fn finish(&self, puzzle: Board, solution: Board, seed: PuzzleSeed) -> GeneratedPuzzle {
        let outcome = self.solver.solve(&puzzle);
        let summary = outcome
            .solved
            .then(|| summarize(&outcome.trace, &self.weights));
        GeneratedPuzzle {
            clues: puzzle.clue_count(),
            puzzle,
            solution,
            seed,
            summary,
        }
    }

    /// Collects pools of unique puzzles per clue target, scores them, and
    /// keeps the top `count` of each under the acceptance thresholds.
    ///
    /// `known_fingerprints` carries the already-published catalog; puzzles
    /// colliding with it (or with each other) are rejected, and every
    /// rejection lands in the report tallies.
    #[must_use]
    pub fn generate_batch(
        &self,
        requests: &[BatchRequest],
        seed: PuzzleSeed,
        pool: &PoolParams,
        acceptance: &Acceptance,
        known_fingerprints: &HashSet<String>,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        let mut rng = seed.rng();
        let mut cache = UniquenessCache::new();
        let mut seen = HashSet::new();
        let mut pools: BTreeMap<usize, Vec<(Board, Board)>> = BTreeMap::new();

        // Stage 1: unique pools.
        for request in requests {
            let target_pool = pool.min_per_clue.max(request.count * pool.multiplier);
            let mut attempts = 0;
            let mut members = Vec::new();
            while members.len() < target_pool && attempts < pool.max_attempts {
                attempts += 1;
                match self.dig_once(request.target_clues, &mut rng, &mut cache) {
                    None => report.tally(GenReject::DigFailed),
                    Some((puzzle, solution)) => {
                        let key = puzzle.fingerprint();
                        if known_fingerprints.contains(&key) {
                            report.tally(GenReject::DuplicateExisting);
                        } else if !seen.insert(key) {
                            report.tally(GenReject::DuplicateGenerated);
                        } else if !cache.is_unique(&puzzle) {
                            report.tally(GenReject::NotUnique);
                        } else {
                            members.push((puzzle, solution));
                        }
                    }
                }
            }
            log::info!(
                "stage 1: clues {} pool {}/{} after {attempts} attempts",
                request.target_clues,
                members.len(),
                target_pool
            );
            report.attempts.insert(request.target_clues, attempts);
            report.pool_sizes.insert(request.target_clues, members.len());
            pools.insert(request.target_clues, members);
        }

        // Stage 2: score and select.
        for request in requests {
            let members = pools.remove(&request.target_clues).unwrap_or_default();
            let mut passing = Vec::new();
            for (puzzle, solution) in members {
                let generated = self.finish(puzzle, solution, seed);
                let Some(summary) = &generated.summary else {
                    report.tally(GenReject::NotLogicSolvable);
                    continue;
                };
                if summary.score < acceptance.min_score {
                    report.tally(GenReject::LowScore);
                    continue;
                }
                if summary.single_ratio > acceptance.max_single_ratio {
                    report.tally(GenReject::TooManySingles);
                    continue;
                }
                passing.push(generated);
            }

            passing.sort_by(|a, b| {
                let sa = a.summary.as_ref().expect("passing entries are scored");
                let sb = b.summary.as_ref().expect("passing entries are scored");
                sb.score.cmp(&sa.score).then(
                    sa.single_ratio
                        .partial_cmp(&sb.single_ratio)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
            });

            if passing.len() > request.count {
                for _ in request.count..passing.len() {
                    report.tally(GenReject::OverTargetTrim);
                }
                passing.truncate(request.count);
            }
            report.accepted.extend(passing);
        }

        report.cache_hits = cache.hits();
        report.cache_misses = cache.misses();
        report
    }

    fn dig_once<R: Rng>(
        &self,
        target_clues: usize,
        rng: &mut R,
        cache: &mut UniquenessCache,
    ) -> Option<(Board, Board)> {
        let solution = shuffled_solution(rng);
        let puzzle = dig_puzzle(&solution, target_clues, rng, cache, &self.dig)?;
        Some((puzzle, solution))
    }
}
