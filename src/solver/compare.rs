use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::{
    error::Result,
    puzzle::state::Puzzle,
    solver::{stats::SearchStats, Solver},
};

/// The outcome of one solver run inside the comparison harness.
#[derive(Debug, Serialize)]
pub struct SolverReport {
    pub solver: String,
    pub solved: bool,
    pub stats: SearchStats,
    pub elapsed: Duration,
    #[serde(skip)]
    pub solution: Option<Puzzle>,
}

/// Runs each solver against its own independent copy of `puzzle`, measuring
/// wall-clock time and search-step counts.
///
/// The caller's puzzle is never mutated; each run gets a fresh clone, so no
/// solver observes another's placements.
pub fn compare(puzzle: &Puzzle, solvers: &[&dyn Solver]) -> Result<Vec<SolverReport>> {
    let mut reports = Vec::with_capacity(solvers.len());
    for solver in solvers {
        let start = Instant::now();
        let (solution, stats) = solver.solve(puzzle.clone())?;
        let elapsed = start.elapsed();
        debug!(
            solver = solver.name(),
            ?elapsed,
            calls = stats.calls,
            solved = solution.is_some(),
            "solver finished"
        );
        reports.push(SolverReport {
            solver: solver.name().to_string(),
            solved: solution.is_some(),
            stats,
            elapsed,
            solution,
        });
    }
    Ok(reports)
}
