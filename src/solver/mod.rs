//! The two backtracking searches and their shared reporting machinery.

pub mod brute_force;
pub mod compare;
pub mod heuristic;
pub mod order;
pub mod stats;

use crate::{error::Result, puzzle::state::Puzzle, solver::stats::SearchStats};

/// A backtracking search strategy.
///
/// A solver consumes the puzzle copy the caller provides — callers that want
/// to keep their unsolved state clone it explicitly, so two solvers compared
/// against the same puzzle never observe each other's placements.
pub trait Solver {
    /// Short name used in reports.
    fn name(&self) -> &str;

    /// Runs the search to completion.
    ///
    /// Returns the solved puzzle, or `None` once the decision tree is
    /// exhausted. Exhaustion is a normal outcome, not an error; `Err` is
    /// reserved for precondition violations such as a cell with no region.
    fn solve(&self, puzzle: Puzzle) -> Result<(Option<Puzzle>, SearchStats)>;
}
