//! Ripple is a solver for Ripple Effect logic puzzles.
//!
//! A Ripple Effect grid is partitioned into irregular connected regions.
//! Each cell is empty or holds a clue; a solution fills every empty cell
//! with a value from `1..=N` (`N` being the size of the cell's region) such
//! that:
//!
//! - no value repeats within a region, and
//! - two equal values in the same row or column are separated by strictly
//!   more cells than the value itself (two 3s need at least three cells
//!   between them).
//!
//! # Core Concepts
//!
//! - **[`Puzzle`]**: the grid, its region partition, and the placement
//!   protocol (`try_place`/`undo`) both searches drive.
//! - **[`Solver`]**: the strategy seam. [`BruteForceSolver`] walks cells in
//!   raster order; [`HeuristicSolver`] always branches on the cell with the
//!   fewest remaining candidates (minimum remaining values).
//! - **[`compare`]**: runs several solvers against independent copies of
//!   one puzzle and reports wall-clock time and search-step counts.
//!
//! # Example: solving a 2x2 puzzle
//!
//! ```
//! use ripple::puzzle::parse::parse_str;
//! use ripple::solver::{
//!     brute_force::BruteForceSolver, heuristic::HeuristicSolver, Solver,
//! };
//!
//! let puzzle = parse_str(
//!     "2 2\n\
//!      +-+-+\n\
//!      |. .|\n\
//!      +-+-+\n\
//!      |. .|\n\
//!      +-+-+\n",
//! )
//! .unwrap();
//!
//! let (solution, stats) = HeuristicSolver::new().solve(puzzle.clone()).unwrap();
//! let solution = solution.expect("this puzzle is solvable");
//! assert_eq!(solution.empty_slots_left(), 0);
//! assert!(stats.backtracks <= stats.calls);
//!
//! // The brute-force search agrees cell for cell.
//! let (brute, _) = BruteForceSolver::new().solve(puzzle).unwrap();
//! let brute = brute.unwrap();
//! assert_eq!(brute.to_string(), solution.to_string());
//! ```
//!
//! [`Puzzle`]: puzzle::state::Puzzle
//! [`Solver`]: solver::Solver
//! [`BruteForceSolver`]: solver::brute_force::BruteForceSolver
//! [`HeuristicSolver`]: solver::heuristic::HeuristicSolver
//! [`compare`]: solver::compare::compare

pub mod error;
pub mod puzzle;
pub mod solver;
