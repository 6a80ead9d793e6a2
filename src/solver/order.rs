//! Strategies for the order in which a cell's candidate values are tried.
//!
//! The order never decides whether a solution exists, only which of several
//! solutions is found first and the exact call counts.

use im::OrdSet;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::puzzle::Coord;

/// A value-ordering strategy for the heuristic solver.
pub trait ValueOrdering {
    /// Returns the candidate values for `cell` in the order to try them.
    fn order_values(&self, cell: Coord, candidates: &OrdSet<u8>) -> Vec<u8>;
}

/// The candidate set's natural ascending order. The default.
pub struct AscendingValues;

impl ValueOrdering for AscendingValues {
    fn order_values(&self, _cell: Coord, candidates: &OrdSet<u8>) -> Vec<u8> {
        candidates.iter().copied().collect()
    }
}

/// A per-cell shuffle derived from a fixed seed.
///
/// The same seed and cell always produce the same order, so a run remains
/// reproducible end to end.
pub struct ShuffledValues {
    seed: u64,
}

impl ShuffledValues {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl ValueOrdering for ShuffledValues {
    fn order_values(&self, (row, col): Coord, candidates: &OrdSet<u8>) -> Vec<u8> {
        let mut values: Vec<u8> = candidates.iter().copied().collect();
        let cell_seed = self.seed ^ (((row as u64) << 32) | col as u64);
        values.shuffle(&mut ChaCha8Rng::seed_from_u64(cell_seed));
        values
    }
}
