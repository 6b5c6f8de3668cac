//! Seedable Sudoku puzzle synthesis for the Sudokuzen catalog toolkit.
//!
//! Generation is a pipeline:
//!
//! 1. [`shuffled_solution`](solution::shuffled_solution) turns the canonical
//!    base pattern into a uniformly varied complete grid by
//!    symmetry-preserving shuffles;
//! 2. [`dig_puzzle`](dig::dig_puzzle) removes clues while preserving
//!    uniqueness — greedy down to a bridge clue count, then bounded
//!    backtracking — with every probe memoized by [`UniquenessCache`];
//! 3. [`PuzzleGenerator`] scores results with a borrowed logic solver and,
//!    in batch mode, keeps the best candidates per clue target under the
//!    caller's acceptance thresholds.
//!
//! All randomness flows from a [`PuzzleSeed`], so any run can be replayed
//! from its reported seed.

pub mod cache;
pub mod dig;
pub mod generator;
pub mod seed;
pub mod solution;

pub use self::{
    cache::UniquenessCache,
    dig::DigParams,
    generator::{
        Acceptance, BatchReport, BatchRequest, GenReject, GeneratedPuzzle, PoolParams,
        PuzzleGenerator,
    },
    seed::{ParseSeedError, PuzzleSeed},
};
