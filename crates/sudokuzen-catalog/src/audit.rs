//! Catalog audit analytics: repetition runs, curve spikes, fake-hard
//! detection.

use std::collections::BTreeMap;

use sudokuzen_solver::{LogicSolver, TechniqueKind, Weights, summarize};

use crate::LevelRecord;

/// Score recorded for entries the solver fails to finish.
pub const SOLVER_FAILURE_SCORE: u32 = 999;

/// Thresholds for the audit detectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Minimum length of a contiguous near-identical run.
    pub min_run: usize,
    /// Fixed floor of the curve-spike threshold.
    pub spike_threshold: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            min_run: 4,
            spike_threshold: 24,
        }
    }
}

/// A contiguous run of near-identical entries within a star tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepetitionRun {
    /// Star tier of the run.
    pub stars: u8,
    /// Ids of the entries forming the run, in catalog order.
    pub ids: Vec<u64>,
    /// The shared heaviest technique.
    pub max_technique: String,
}

/// An adjacent pair whose score jump exceeds the dynamic threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSpike {
    /// Star tier of the pair.
    pub stars: u8,
    /// Id of the earlier entry.
    pub from_id: u64,
    /// Id of the later entry.
    pub to_id: u64,
    /// Score of the earlier entry.
    pub from_score: u32,
    /// Score of the later entry.
    pub to_score: u32,
    /// Signed score change.
    pub delta: i64,
    /// Median |Δscore| of the tier's valid adjacencies.
    pub baseline: f64,
    /// The threshold the pair was compared against.
    pub threshold_used: u32,
}

/// An entry advertising a high score with a cheap technique ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeHard {
    /// Id of the flagged entry.
    pub id: u64,
    /// Star tier of the flagged entry.
    pub stars: u8,
    /// Advertised difficulty score.
    pub score: u32,
    /// Wire name of its heaviest technique.
    pub max_technique: String,
    /// Singles ratio of the entry.
    pub single_ratio: f64,
    /// Clue count of the entry.
    pub clues: usize,
}

/// Everything the audit pass flags.
#[derive(Debug, Clone, Default)]
pub struct AuditFindings {
    /// Repetition runs per star tier.
    pub repetition: Vec<RepetitionRun>,
    /// Curve spikes per star tier.
    pub curve_spikes: Vec<CurveSpike>,
    /// Fake-hard candidates across the whole catalog.
    pub fake_hard: Vec<FakeHard>,
}

/// Backfills scoring fields on a record that lacks them.
///
/// Runs the logic solver on the puzzle: solvable entries get their real
/// score, heaviest technique and singles ratio; unsolvable ones get the
/// [`SOLVER_FAILURE_SCORE`] sentinel with technique `unknown`. Records that
/// already carry all scoring fields are left untouched.
pub fn ensure_metrics(record: &mut LevelRecord, solver: &LogicSolver, weights: &Weights) {
    if record.difficulty_score.is_some()
        && record.max_technique.is_some()
        && record.single_ratio.is_some()
    {
        return;
    }
    let scored = record
        .board()
        .ok()
        .map(|board| solver.solve(&board))
        .filter(|outcome| outcome.solved)
        .map(|outcome| summarize(&outcome.trace, weights));
    match scored {
        Some(summary) => {
            record.difficulty_score = Some(summary.score);
            record.max_technique = Some(summary.max_technique_name().to_owned());
            record.single_ratio = Some(summary.single_ratio);
            record.logic_solvable = Some(true);
        }
        None => {
            record.difficulty_score = Some(SOLVER_FAILURE_SCORE);
            record.max_technique = Some("unknown".to_owned());
            record.single_ratio = Some(1.0);
            record.logic_solvable = Some(false);
        }
    }
}

fn score_of(record: &LevelRecord) -> u32 {
    record.difficulty_score.unwrap_or(SOLVER_FAILURE_SCORE)
}

fn technique_of(record: &LevelRecord) -> &str {
    record.max_technique.as_deref().unwrap_or("unknown")
}

fn median(mut values: Vec<i64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    #[expect(clippy::cast_precision_loss)]
    if values.len() % 2 == 1 {
        values[mid] as f64
    } else {
        (values[mid - 1] + values[mid]) as f64 / 2.0
    }
}

/// Runs all three detectors over a catalog.
///
/// Entries are grouped by star tier in catalog order; records missing
/// scoring fields are treated as solver failures (see [`ensure_metrics`]
/// for backfilling them properly first).
#[must_use]
pub fn audit_catalog(levels: &[LevelRecord], config: &AuditConfig) -> AuditFindings {
    let mut by_stars: BTreeMap<u8, Vec<&LevelRecord>> = BTreeMap::new();
    for record in levels {
        by_stars.entry(record.stars).or_default().push(record);
    }

    let mut findings = AuditFindings::default();
    for (&stars, tier) in &by_stars {
        find_repetition(stars, tier, config.min_run, &mut findings.repetition);
        find_spikes(stars, tier, config.spike_threshold, &mut findings.curve_spikes);
    }
    findings.fake_hard = find_fake_hard(levels);
    findings
}

/// Merges contiguous near-identical entries into runs of length ≥
/// `min_run`: neighbors must agree on the heaviest technique and differ by
/// at most 4 in score and 1 in clue count.
fn find_repetition(
    stars: u8,
    tier: &[&LevelRecord],
    min_run: usize,
    out: &mut Vec<RepetitionRun>,
) {
    if tier.len() < min_run {
        return;
    }
    let mut start = 0;
    while start < tier.len() {
        let mut end = start;
        while end + 1 < tier.len() {
            let a = tier[end];
            let b = tier[end + 1];
            let near = technique_of(a) == technique_of(b)
                && (i64::from(score_of(a)) - i64::from(score_of(b))).abs() <= 4
                && a.clue_count().abs_diff(b.clue_count()) <= 1;
            if !near {
                break;
            }
            end += 1;
        }
        if end - start + 1 >= min_run {
            out.push(RepetitionRun {
                stars,
                ids: tier[start..=end].iter().map(|r| r.id).collect(),
                max_technique: technique_of(tier[start]).to_owned(),
            });
        }
        start = end + 1;
    }
}

/// Flags adjacencies whose |Δscore| reaches `max(threshold, 3 × median)`.
///
/// Pairs where either side carries a solver-failure score (≥ 900) are
/// excluded from both the baseline and the flagging.
fn find_spikes(stars: u8, tier: &[&LevelRecord], threshold: u32, out: &mut Vec<CurveSpike>) {
    let valid = |record: &LevelRecord| score_of(record) < 900;

    let deltas: Vec<i64> = tier
        .windows(2)
        .filter(|pair| valid(pair[0]) && valid(pair[1]))
        .map(|pair| (i64::from(score_of(pair[1])) - i64::from(score_of(pair[0]))).abs())
        .collect();
    let baseline = median(deltas);
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let dynamic = threshold.max((baseline * 3.0) as u32);

    for pair in tier.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        if !valid(prev) || !valid(cur) {
            continue;
        }
        let delta = i64::from(score_of(cur)) - i64::from(score_of(prev));
        if delta.unsigned_abs() >= u64::from(dynamic) {
            out.push(CurveSpike {
                stars,
                from_id: prev.id,
                to_id: cur.id,
                from_score: score_of(prev),
                to_score: score_of(cur),
                delta,
                baseline,
                threshold_used: dynamic,
            });
        }
    }
}

/// Flags entries scoring ≥ 85 whose technique ceiling is cheap
/// (locked candidates, naked pair, hidden pair), unless their advanced tag
/// marks them verified.
fn find_fake_hard(levels: &[LevelRecord]) -> Vec<FakeHard> {
    const CHEAP: [TechniqueKind; 3] = [
        TechniqueKind::LockedCandidates,
        TechniqueKind::NakedPair,
        TechniqueKind::HiddenPair,
    ];

    let mut flagged = Vec::new();
    for record in levels {
        let tag = record.advanced_tag.as_deref().unwrap_or("");
        if tag.to_lowercase().contains("verified") {
            continue;
        }
        let score = score_of(record);
        let cheap_ceiling = CHEAP
            .iter()
            .any(|kind| kind.as_str() == technique_of(record));
        if score >= 85 && cheap_ceiling {
            flagged.push(FakeHard {
                id: record.id,
                stars: record.stars,
                score,
                max_technique: technique_of(record).to_owned(),
                single_ratio: record.single_ratio.unwrap_or(1.0),
                clues: record.clue_count(),
            });
        }
    }
    flagged
}
