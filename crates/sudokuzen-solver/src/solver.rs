//! The logic solver loop.

use derive_more::Display;
use sudokuzen_core::{Board, CandidateState};

use crate::{
    TraceStep,
    technique::{BoxedTechnique, TechniqueKind, all_techniques, techniques_for},
};

/// Hard cap on loop iterations, guarding against livelock.
const MAX_ITERATIONS: usize = 10_000;

/// Why the solver stopped without a verdict from the techniques.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum SolveHalt {
    /// The board failed validation before any technique ran.
    #[display("invalid_board")]
    InvalidBoard,
    /// A deduction emptied a candidate set.
    #[display("contradiction")]
    Contradiction,
}

/// The result of a logic-solver run.
///
/// `solved == false` with `halt == None` means the board is merely beyond
/// the enabled techniques; callers treat that as "below the technique
/// ceiling", not as an error.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Whether the board ended fully filled.
    pub solved: bool,
    /// The final board state.
    pub board: Board,
    /// All recorded steps, in execution order.
    pub trace: Vec<TraceStep>,
    /// Set when the run stopped on a structural failure.
    pub halt: Option<SolveHalt>,
}

/// Applies an ordered technique list until the board is solved, no
/// technique fires, or a contradiction surfaces.
///
/// After every successful step the loop restarts from the cheapest
/// technique, so expensive scans only run on states the cheap ones have
/// exhausted.
///
/// # Examples
///
/// ```
/// use sudokuzen_core::Board;
/// use sudokuzen_solver::LogicSolver;
///
/// let board: Board =
///     "000000010400000000020000000000050407008000300001090000300400200050100000000806000"
///         .parse()?;
///
/// let solver = LogicSolver::with_all_techniques();
/// let outcome = solver.solve(&board);
/// assert!(outcome.solved);
/// # Ok::<(), sudokuzen_core::ParseBoardError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LogicSolver {
    techniques: Vec<BoxedTechnique>,
}

impl Default for LogicSolver {
    fn default() -> Self {
        Self::with_all_techniques()
    }
}

impl LogicSolver {
    /// Creates a solver with an explicit technique list.
    ///
    /// Techniques are tried in the order given; the caller is responsible
    /// for putting cheap ones first if it wants the usual cost ordering.
    #[must_use]
    pub fn new(techniques: Vec<BoxedTechnique>) -> Self {
        Self { techniques }
    }

    /// Creates a solver with all nine techniques in cost order.
    #[must_use]
    pub fn with_all_techniques() -> Self {
        Self::new(all_techniques())
    }

    /// Creates a solver for a subset of techniques, preserving their order.
    #[must_use]
    pub fn with_kinds(kinds: &[TechniqueKind]) -> Self {
        Self::new(techniques_for(kinds))
    }

    /// Returns the configured techniques in application order.
    #[must_use]
    pub fn techniques(&self) -> &[BoxedTechnique] {
        &self.techniques
    }

    /// Runs the logic loop on a puzzle.
    #[must_use]
    pub fn solve(&self, board: &Board) -> SolveOutcome {
        let mut state = match CandidateState::from_board(board) {
            Ok(state) => state,
            Err(_) => {
                return SolveOutcome {
                    solved: false,
                    board: *board,
                    trace: Vec::new(),
                    halt: Some(SolveHalt::InvalidBoard),
                };
            }
        };

        let mut trace = Vec::new();
        let mut iterations = 0;
        while !state.is_solved() && iterations < MAX_ITERATIONS {
            iterations += 1;
            let mut progressed = false;
            for technique in &self.techniques {
                match technique.apply(&mut state) {
                    Err(_) => {
                        return SolveOutcome {
                            solved: false,
                            board: *state.board(),
                            trace,
                            halt: Some(SolveHalt::Contradiction),
                        };
                    }
                    Ok(Some(step)) => {
                        trace.push(step);
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

        SolveOutcome {
            solved: state.is_solved(),
            board: state.into_board(),
            trace,
            halt: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use sudokuzen_core::{count_solutions, geometry::cell_at};

    use super::*;
    use crate::{Action, technique::TechniqueKind};

    const CLASSIC_17: &str =
        "000000010400000000020000000000050407008000300001090000300400200050100000000806000";

    fn full_grid() -> Board {
        let mut board = Board::new();
        for row in 0..9 {
            for col in 0..9 {
                let value = ((3 * row + row / 3 + col) % 9 + 1) as u8;
                board.set(cell_at(row, col), value);
            }
        }
        board
    }

    #[test]
    fn test_complete_board_yields_empty_trace() {
        let outcome = LogicSolver::with_all_techniques().solve(&full_grid());
        assert!(outcome.solved);
        assert!(outcome.trace.is_empty());
        assert_eq!(outcome.halt, None);
    }

    #[test]
    fn test_one_missing_cell_is_a_naked_single() {
        let mut board = full_grid();
        board.set(cell_at(3, 3), 0);

        let outcome = LogicSolver::with_all_techniques().solve(&board);
        assert!(outcome.solved);
        assert_eq!(outcome.trace.len(), 1);
        assert_eq!(outcome.trace[0].technique, TechniqueKind::NakedSingle);
        assert_eq!(outcome.trace[0].action, Action::Place);
        assert_eq!(outcome.board, full_grid());
    }

    #[test]
    fn test_invalid_board_halts_before_solving() {
        let mut board = Board::new();
        board.set(cell_at(2, 0), 8);
        board.set(cell_at(2, 5), 8);

        let outcome = LogicSolver::with_all_techniques().solve(&board);
        assert!(!outcome.solved);
        assert!(outcome.trace.is_empty());
        assert_eq!(outcome.halt, Some(SolveHalt::InvalidBoard));
    }

    #[test]
    fn test_singles_alone_stall_on_classic_17() {
        let board: Board = CLASSIC_17.parse().unwrap();
        let solver = LogicSolver::with_kinds(&[
            TechniqueKind::NakedSingle,
            TechniqueKind::HiddenSingle,
        ]);
        let outcome = solver.solve(&board);
        assert!(!outcome.solved);
        assert_eq!(outcome.halt, None);
    }

    #[test]
    fn test_full_list_solves_classic_17() {
        let board: Board = CLASSIC_17.parse().unwrap();
        let outcome = LogicSolver::with_all_techniques().solve(&board);
        assert!(outcome.solved, "classic 17-clue should be logic-solvable");
        assert!(outcome.board.is_solved());
        // Solver soundness agrees with the counter.
        assert_eq!(count_solutions(&board, 2), 1);
        // At least one step beyond the singles tier.
        assert!(
            outcome
                .trace
                .iter()
                .any(|step| step.technique.weight() > 1),
            "expected a non-single step"
        );
    }

    #[test]
    fn test_traces_are_reproducible() {
        let board: Board = CLASSIC_17.parse().unwrap();
        let solver = LogicSolver::with_all_techniques();
        let first = solver.solve(&board);
        let second = solver.solve(&board);
        assert_eq!(first.trace, second.trace);
        assert_eq!(first.board, second.board);
    }
}
