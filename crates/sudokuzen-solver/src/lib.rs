//! Technique-based Sudoku logic solving for the Sudokuzen catalog toolkit.
//!
//! The solver applies a cost-ordered list of deduction techniques to a
//! puzzle and records every step in a [`trace`](TraceStep). The trace is
//! the contract difficulty scoring is built on: [`summarize`] folds it into
//! a score, the heaviest technique used, the singles ratio, and
//! per-technique counts.
//!
//! # Examples
//!
//! ```
//! use sudokuzen_core::Board;
//! use sudokuzen_solver::{LogicSolver, Weights, summarize};
//!
//! let board: Board =
//!     "000000010400000000020000000000050407008000300001090000300400200050100000000806000"
//!         .parse()?;
//!
//! let outcome = LogicSolver::with_all_techniques().solve(&board);
//! assert!(outcome.solved);
//!
//! let summary = summarize(&outcome.trace, &Weights::default());
//! assert!(summary.score > 0);
//! # Ok::<(), sudokuzen_core::ParseBoardError>(())
//! ```

pub mod score;
pub mod solver;
pub mod technique;
pub mod trace;

pub use self::{
    score::{TraceSummary, Weights, summarize},
    solver::{LogicSolver, SolveHalt, SolveOutcome},
    technique::{BoxedTechnique, Technique, TechniqueKind, UnknownTechnique},
    trace::{Action, TraceStep},
};
