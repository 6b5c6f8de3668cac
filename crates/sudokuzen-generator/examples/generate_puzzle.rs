//! Example demonstrating seeded puzzle generation.
//!
//! Generates one unique 24-clue puzzle, prints the puzzle, its solution,
//! and the seed needed to reproduce the run.
//!
//! # Usage
//!
//! ```sh
//! cargo run --release --example generate_puzzle
//! ```

use sudokuzen_generator::{PuzzleGenerator, PuzzleSeed};
use sudokuzen_solver::LogicSolver;

fn main() {
    env_logger::init();

    let solver = LogicSolver::with_all_techniques();
    let generator = PuzzleGenerator::new(&solver);

    let seed = PuzzleSeed::random();
    let Some(generated) = generator.generate_with_seed(seed, 24) else {
        eprintln!("dig exhausted its budget; rerun for a fresh seed");
        std::process::exit(1);
    };

    println!("Seed:");
    println!("  {seed}");
    println!();
    println!("Puzzle ({} clues):", generated.clues);
    println!("{:#}", generated.puzzle);
    println!("Solution:");
    println!("{:#}", generated.solution);
    if let Some(summary) = &generated.summary {
        println!("Score: {}", summary.score);
        println!("Max technique: {}", summary.max_technique_name());
        println!("Singles ratio: {:.2}", summary.single_ratio);
    } else {
        println!("Not solvable by the enabled techniques.");
    }
}
