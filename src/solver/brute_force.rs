use tracing::debug;

use crate::{
    error::{PuzzleError, Result},
    puzzle::state::Puzzle,
    solver::{stats::SearchStats, Solver},
};

/// Raster-order depth-first backtracking.
///
/// Cells are visited left to right, top to bottom. Clue cells are skipped;
/// at an empty cell every value `1..=len` of the cell's region is tried in
/// ascending order, recursing after each committed placement and undoing it
/// when the subtree is exhausted. Validity is enforced at placement time,
/// so an invalid partial assignment prunes its whole subtree immediately —
/// which is what keeps brute force tractable at all.
pub struct BruteForceSolver;

impl BruteForceSolver {
    pub fn new() -> Self {
        Self
    }

    fn search(
        &self,
        puzzle: &mut Puzzle,
        row: usize,
        col: usize,
        stats: &mut SearchStats,
    ) -> Result<bool> {
        stats.calls += 1;
        if puzzle.is_solved() {
            return Ok(true);
        }

        let (row, col) = if col >= puzzle.width() {
            (row + 1, 0)
        } else {
            (row, col)
        };
        if row >= puzzle.height() {
            // Past the last cell: the assignment is complete, solved or not.
            return Ok(puzzle.is_solved());
        }

        if !puzzle.get((row, col)).is_empty() {
            return self.search(puzzle, row, col + 1, stats);
        }

        let (_, region) = puzzle
            .region_of((row, col))
            .ok_or(PuzzleError::MissingRegion { row, col })?;
        let max = u8::try_from(region.len()).unwrap_or(u8::MAX);
        for value in 1..=max {
            if puzzle.try_place(row, col, value) {
                if self.search(puzzle, row, col + 1, stats)? {
                    return Ok(true);
                }
                puzzle.undo(row, col);
                stats.backtracks += 1;
            }
        }
        Ok(false)
    }
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for BruteForceSolver {
    fn name(&self) -> &str {
        "brute force"
    }

    fn solve(&self, mut puzzle: Puzzle) -> Result<(Option<Puzzle>, SearchStats)> {
        let mut stats = SearchStats::default();
        let solved = self.search(&mut puzzle, 0, 0, &mut stats)?;
        debug!(
            calls = stats.calls,
            backtracks = stats.backtracks,
            solved,
            "brute force search finished"
        );
        Ok((solved.then_some(puzzle), stats))
    }
}
