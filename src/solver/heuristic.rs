use im::OrdSet;
use tracing::debug;

use crate::{
    error::{PuzzleError, Result},
    puzzle::{region::RegionId, state::Puzzle, Coord},
    solver::{
        order::{AscendingValues, ValueOrdering},
        stats::SearchStats,
        Solver,
    },
};

/// One unsolved cell together with the values still open to it.
#[derive(Debug, Clone)]
struct WorkItem {
    cell: Coord,
    candidates: OrdSet<u8>,
}

/// Minimum-remaining-values backtracking.
///
/// Before the search, every empty cell gets a candidate set derived from its
/// region's unused values and the separation rule against the clues in its
/// row and column. The search then always branches on the cell with the
/// fewest candidates (ties broken by row-major coordinate, so runs are
/// reproducible), narrowing the remaining cells' sets after each placement.
///
/// Each recursion level receives a freshly narrowed, re-sorted copy of the
/// work list rather than mutating shared state, which makes backtracking a
/// plain return. The candidate sets are persistent [`OrdSet`]s, so a level's
/// copy shares structure with its parent and the per-level rebuild stays
/// cheap.
pub struct HeuristicSolver {
    value_order: Box<dyn ValueOrdering>,
}

impl HeuristicSolver {
    pub fn new() -> Self {
        Self {
            value_order: Box::new(AscendingValues),
        }
    }

    /// Replaces the default ascending order in which one cell's candidate
    /// values are attempted.
    pub fn with_value_order(value_order: Box<dyn ValueOrdering>) -> Self {
        Self { value_order }
    }

    /// Builds the initial work list: per-region remaining values, seeded
    /// into each empty cell, pruned against every clue within separation
    /// distance along the cell's row and column, then sorted by candidate
    /// count.
    fn initial_work_list(puzzle: &Puzzle) -> Result<Vec<WorkItem>> {
        let mut region_remaining: Vec<OrdSet<u8>> = Vec::with_capacity(puzzle.regions().len());
        for region in puzzle.regions().iter() {
            let max = u8::try_from(region.len()).unwrap_or(u8::MAX);
            let mut remaining: OrdSet<u8> = (1..=max).collect();
            for &cell in region.cells() {
                if let Some(value) = puzzle.get(cell).value() {
                    remaining.remove(&value);
                }
            }
            region_remaining.push(remaining);
        }

        let mut items = Vec::with_capacity(puzzle.empty_slots_left());
        for ((row, col), cell) in puzzle.iter() {
            if !cell.is_empty() {
                continue;
            }
            let region_id = puzzle
                .regions()
                .id_of((row, col))
                .ok_or(PuzzleError::MissingRegion { row, col })?;
            let mut candidates = region_remaining[region_id].clone();
            for c in 0..puzzle.width() {
                if c == col {
                    continue;
                }
                if let Some(value) = puzzle.get((row, c)).value() {
                    if col.abs_diff(c) <= value as usize {
                        candidates.remove(&value);
                    }
                }
            }
            for r in 0..puzzle.height() {
                if r == row {
                    continue;
                }
                if let Some(value) = puzzle.get((r, col)).value() {
                    if row.abs_diff(r) <= value as usize {
                        candidates.remove(&value);
                    }
                }
            }
            items.push(WorkItem {
                cell: (row, col),
                candidates,
            });
        }
        sort_work_list(&mut items);
        Ok(items)
    }

    /// Derives the next level's work list after `value` was placed at
    /// `cell`: the value is dropped from any cell within separation
    /// distance in the same row or column, and from every cell of the same
    /// region, then the list is re-sorted.
    fn narrowed(
        rest: &[WorkItem],
        (row, col): Coord,
        value: u8,
        region_id: RegionId,
        puzzle: &Puzzle,
    ) -> Vec<WorkItem> {
        let mut next = Vec::with_capacity(rest.len());
        for item in rest {
            let (r, c) = item.cell;
            let mut candidates = item.candidates.clone();
            let near_in_row = r == row && col.abs_diff(c) <= value as usize;
            let near_in_col = c == col && row.abs_diff(r) <= value as usize;
            let shares_region = puzzle.regions().id_of(item.cell) == Some(region_id);
            if near_in_row || near_in_col || shares_region {
                candidates.remove(&value);
            }
            next.push(WorkItem {
                cell: item.cell,
                candidates,
            });
        }
        sort_work_list(&mut next);
        next
    }

    fn search(
        &self,
        puzzle: &mut Puzzle,
        work: &[WorkItem],
        stats: &mut SearchStats,
    ) -> Result<bool> {
        stats.calls += 1;
        if puzzle.is_solved() {
            return Ok(true);
        }
        // The most constrained cell. A head with no candidates falls
        // straight through the loop and fails this level.
        let Some(head) = work.first() else {
            return Ok(false);
        };
        let (row, col) = head.cell;
        let region_id = puzzle
            .regions()
            .id_of(head.cell)
            .ok_or(PuzzleError::MissingRegion { row, col })?;
        for value in self.value_order.order_values(head.cell, &head.candidates) {
            if puzzle.try_place(row, col, value) {
                let next = Self::narrowed(&work[1..], head.cell, value, region_id, puzzle);
                if self.search(puzzle, &next, stats)? {
                    return Ok(true);
                }
                puzzle.undo(row, col);
                stats.backtracks += 1;
            }
        }
        Ok(false)
    }
}

impl Default for HeuristicSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for HeuristicSolver {
    fn name(&self) -> &str {
        "minimum remaining values"
    }

    fn solve(&self, mut puzzle: Puzzle) -> Result<(Option<Puzzle>, SearchStats)> {
        let work = Self::initial_work_list(&puzzle)?;
        let mut stats = SearchStats::default();
        let solved = self.search(&mut puzzle, &work, &mut stats)?;
        debug!(
            calls = stats.calls,
            backtracks = stats.backtracks,
            solved,
            "heuristic search finished"
        );
        Ok((solved.then_some(puzzle), stats))
    }
}

fn sort_work_list(items: &mut [WorkItem]) {
    items.sort_by_key(|item| (item.candidates.len(), item.cell));
}
