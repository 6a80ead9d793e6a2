use std::{collections::HashMap, fmt, sync::Arc};

use tracing::debug;

use crate::{
    error::{PuzzleError, Result},
    puzzle::{
        cell::Cell,
        region::{Region, RegionId, RegionSet},
        Coord,
    },
};

/// A Ripple Effect puzzle: the cell grid plus its region partition.
///
/// The grid is owned exclusively by the `Puzzle` and, during search, is
/// mutated only through the placement protocol ([`try_place`] /
/// [`undo`]). The region partition is computed once and shared behind an
/// `Arc`, so cloning a `Puzzle` — which every solver run does to get an
/// independent copy — copies only the cells.
///
/// [`try_place`]: Puzzle::try_place
/// [`undo`]: Puzzle::undo
#[derive(Debug, Clone)]
pub struct Puzzle {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    regions: Arc<RegionSet>,
    empty_slots_left: usize,
    solved: bool,
}

impl Puzzle {
    /// Wraps a row-major cell grid and its region partition.
    ///
    /// Fails if the grid size disagrees with the partition, or if a clue
    /// lies outside `1..=len` for its region. The partition itself was
    /// already validated by [`RegionSet::new`].
    pub fn new(cells: Vec<Cell>, regions: Arc<RegionSet>) -> Result<Self> {
        let width = regions.width();
        let height = regions.height();
        if cells.len() != width * height {
            return Err(PuzzleError::Malformed(format!(
                "expected {} cells for a {height}x{width} grid, got {}",
                width * height,
                cells.len()
            ))
            .into());
        }
        for (idx, cell) in cells.iter().enumerate() {
            let (row, col) = (idx / width, idx % width);
            if let Cell::Filled(value) = cell {
                let (_, region) = regions
                    .region_of((row, col))
                    .ok_or(PuzzleError::MissingRegion { row, col })?;
                if *value == 0 || *value as usize > region.len() {
                    return Err(PuzzleError::ClueOutOfRange {
                        row,
                        col,
                        value: *value,
                        max: region.len(),
                    }
                    .into());
                }
            }
        }
        let empty_slots_left = cells.iter().filter(|cell| cell.is_empty()).count();
        debug!(
            width,
            height,
            regions = regions.len(),
            empty = empty_slots_left,
            "constructed puzzle"
        );
        Ok(Self {
            width,
            height,
            cells,
            regions,
            empty_slots_left,
            solved: false,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The number of cells currently empty.
    pub fn empty_slots_left(&self) -> usize {
        self.empty_slots_left
    }

    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    fn index(&self, (row, col): Coord) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row * self.width + col
    }

    /// The value at `cell`, or [`Cell::Empty`].
    pub fn get(&self, cell: Coord) -> Cell {
        self.cells[self.index(cell)]
    }

    /// The region owning `cell`. Every in-bounds cell of a well-formed
    /// puzzle has one.
    pub fn region_of(&self, cell: Coord) -> Option<(RegionId, &Region)> {
        self.regions.region_of(cell)
    }

    /// Stages `value` into `(row, col)` and checks the row, the column, and
    /// the cell's region. A valid placement is committed and `true` is
    /// returned; an invalid one is rolled back to the previous value.
    ///
    /// This is the single mutation entry point during search.
    pub fn try_place(&mut self, row: usize, col: usize, value: u8) -> bool {
        let idx = self.index((row, col));
        let prev = self.cells[idx];
        self.cells[idx] = Cell::Filled(value);
        if self.is_row_col_valid(row, col, true) {
            if prev.is_empty() {
                self.empty_slots_left -= 1;
            }
            true
        } else {
            self.cells[idx] = prev;
            false
        }
    }

    /// Resets `(row, col)` to empty, undoing the immediately preceding
    /// successful placement there. Callers only undo their own placements;
    /// that discipline is the search's, not this type's.
    pub fn undo(&mut self, row: usize, col: usize) {
        let idx = self.index((row, col));
        debug_assert!(!self.cells[idx].is_empty());
        self.cells[idx] = Cell::Empty;
        self.empty_slots_left += 1;
    }

    /// Checks the separation rule along the row `row` and the column `col`:
    /// any two equal values at positions `p1 < p2` on the line must satisfy
    /// `p2 - p1 > value`. With `check_region`, the region at `(row, col)`
    /// must also be free of duplicates.
    pub fn is_row_col_valid(&self, row: usize, col: usize, check_region: bool) -> bool {
        if !Self::line_is_valid((0..self.width).map(|c| self.get((row, c)))) {
            return false;
        }
        if !Self::line_is_valid((0..self.height).map(|r| self.get((r, col)))) {
            return false;
        }
        if !check_region {
            return true;
        }
        self.region_of((row, col))
            .is_some_and(|(_, region)| self.is_region_valid(region))
    }

    /// One pass over a line: remember every position at which each value has
    /// appeared, and reject a repeat whose gap to any earlier occurrence is
    /// at most the value itself.
    fn line_is_valid<I: Iterator<Item = Cell>>(line: I) -> bool {
        let mut seen: HashMap<u8, Vec<usize>> = HashMap::new();
        for (pos, cell) in line.enumerate() {
            if let Some(value) = cell.value() {
                let positions = seen.entry(value).or_default();
                if positions
                    .iter()
                    .any(|&earlier| pos - earlier <= value as usize)
                {
                    return false;
                }
                positions.push(pos);
            }
        }
        true
    }

    /// A region is valid while no value appears twice among its filled
    /// cells. Partial fills are fine here; fullness is [`is_solved`]'s job.
    ///
    /// [`is_solved`]: Puzzle::is_solved
    pub fn is_region_valid(&self, region: &Region) -> bool {
        let mut seen = [false; u8::MAX as usize + 1];
        for &cell in region.cells() {
            if let Some(value) = self.get(cell).value() {
                if seen[value as usize] {
                    return false;
                }
                seen[value as usize] = true;
            }
        }
        true
    }

    /// A fully filled region must hold exactly the values `1..=len`.
    fn region_is_permutation(&self, region: &Region) -> bool {
        let len = region.len();
        let mut seen = vec![false; len + 1];
        for &cell in region.cells() {
            match self.get(cell).value() {
                Some(value) if value as usize >= 1 && value as usize <= len => {
                    if seen[value as usize] {
                        return false;
                    }
                    seen[value as usize] = true;
                }
                _ => return false,
            }
        }
        true
    }

    /// True once every cell is filled, every row and column satisfies the
    /// separation rule, and every region holds a permutation of `1..=len`.
    ///
    /// The verification runs even when no empty cells remain, so a full but
    /// invalid arrangement reads as unsolved. A `true` result is cached:
    /// cells only change through `try_place`/`undo` during active search,
    /// and a complete valid assignment is never mutated again.
    pub fn is_solved(&mut self) -> bool {
        if self.solved {
            return true;
        }
        if self.empty_slots_left > 0 {
            return false;
        }
        for row in 0..self.height {
            if !Self::line_is_valid((0..self.width).map(|c| self.get((row, c)))) {
                return false;
            }
        }
        for col in 0..self.width {
            if !Self::line_is_valid((0..self.height).map(|r| self.get((r, col)))) {
                return false;
            }
        }
        let regions = Arc::clone(&self.regions);
        for region in regions.iter() {
            if !self.region_is_permutation(region) {
                return false;
            }
        }
        self.solved = true;
        true
    }

    /// Row-major iterator over `(coord, cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| ((idx / width, idx % width), *cell))
    }

    fn same_region(&self, a: Coord, b: Coord) -> bool {
        self.regions.id_of(a) == self.regions.id_of(b)
    }
}

/// Renders the grid in the same wall-art notation the text format uses,
/// with walls derived from region adjacency.
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.height {
            write!(f, "+")?;
            for col in 0..self.width {
                let open = row > 0 && self.same_region((row - 1, col), (row, col));
                write!(f, "{}+", if open { ' ' } else { '-' })?;
            }
            writeln!(f)?;
            for col in 0..self.width {
                let open = col > 0 && self.same_region((row, col - 1), (row, col));
                write!(f, "{}{}", if open { ' ' } else { '|' }, self.get((row, col)))?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+")?;
        for _ in 0..self.width {
            write!(f, "-+")?;
        }
        Ok(())
    }
}
