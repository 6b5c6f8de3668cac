//! Core data structures for the Sudokuzen catalog toolkit.
//!
//! This crate provides the board model and the state the analysis engine
//! runs on:
//!
//! - [`geometry`]: compile-time tables of the 27 units and per-cell peers
//! - [`DigitSet`]: candidate digits 1-9 as a 16-bit mask
//! - [`Board`]: 81 row-major cell values with the 81-character text form
//! - [`CandidateState`]: per-cell candidate sets with the assignment and
//!   elimination primitives that all deduction techniques build on
//! - [`count_solutions`]: capped backtracking solution counter, the
//!   uniqueness oracle for puzzle synthesis
//!
//! # Examples
//!
//! ```
//! use sudokuzen_core::{Board, CandidateState, count_solutions};
//!
//! let board: Board =
//!     "000000010400000000020000000000050407008000300001090000300400200050100000000806000"
//!         .parse()?;
//!
//! assert_eq!(board.clue_count(), 17);
//! assert_eq!(count_solutions(&board, 2), 1);
//!
//! let state = CandidateState::from_board(&board)?;
//! assert!(!state.is_solved());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod board;
pub mod candidates;
pub mod counter;
pub mod digit_set;
pub mod geometry;

pub use self::{
    board::{Board, ParseBoardError},
    candidates::{BoardError, CandidateState, Contradiction},
    counter::count_solutions,
    digit_set::{DigitSet, DigitSetIter},
};
