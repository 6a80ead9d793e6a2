//! The on-disk puzzle text format.
//!
//! A puzzle file starts with a `<height> <width>` header line, followed by
//! `2 * height + 1` lines of wall art, each `2 * width + 1` characters wide.
//! Cell characters sit at odd (row, col) positions: `.` for an empty cell or
//! a digit `1..=9` for a clue. Between two adjacent cells, a space means the
//! cells share a region; any other character is a wall.
//!
//! ```text
//! 2 2
//! +-+-+
//! |. .|
//! +-+-+
//! |1 .|
//! +-+-+
//! ```

use std::{fs, path::Path, sync::Arc};

use tracing::debug;

use crate::{
    error::{PuzzleError, Result},
    puzzle::{
        cell::Cell,
        region::{extract_regions, RegionSet},
        state::Puzzle,
    },
};

/// Parses a puzzle from its textual representation.
pub fn parse_str(input: &str) -> Result<Puzzle> {
    let mut lines = input.lines();
    let header = lines
        .next()
        .ok_or_else(|| PuzzleError::Malformed("empty input".to_string()))?;
    let mut parts = header.split_whitespace();
    let height = parse_dimension(parts.next(), "height")?;
    let width = parse_dimension(parts.next(), "width")?;

    let art: Vec<&str> = lines.collect();
    let expected = 2 * height + 1;
    if art.len() < expected {
        return Err(PuzzleError::Malformed(format!(
            "expected {expected} art lines for height {height}, got {}",
            art.len()
        ))
        .into());
    }
    for extra in &art[expected..] {
        if !extra.trim().is_empty() {
            return Err(PuzzleError::Malformed(format!(
                "unexpected trailing line: {extra:?}"
            ))
            .into());
        }
    }
    let grid: Vec<Vec<char>> = art[..expected].iter().map(|l| l.chars().collect()).collect();
    for (i, line) in grid.iter().enumerate() {
        if line.len() != 2 * width + 1 {
            return Err(PuzzleError::Malformed(format!(
                "art line {i} is {} characters wide, expected {}",
                line.len(),
                2 * width + 1
            ))
            .into());
        }
    }

    let mut cells = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let ch = grid[2 * row + 1][2 * col + 1];
            let cell = match ch {
                '.' => Cell::Empty,
                '1'..='9' => Cell::Filled(ch as u8 - b'0'),
                other => {
                    return Err(PuzzleError::Malformed(format!(
                        "invalid cell character {other:?} at ({row}, {col})"
                    ))
                    .into())
                }
            };
            cells.push(cell);
        }
    }

    // Two adjacent cells are connected when the art character between them
    // is a space.
    let regions = extract_regions(width, height, |a, b| {
        grid[a.0 + b.0 + 1][a.1 + b.1 + 1] == ' '
    });
    debug!(width, height, regions = regions.len(), "extracted regions");
    let set = RegionSet::new(width, height, regions)?;
    Puzzle::new(cells, Arc::new(set))
}

/// Reads and parses a puzzle file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Puzzle> {
    debug!(path = %path.as_ref().display(), "loading puzzle file");
    let raw = fs::read_to_string(path)?;
    parse_str(&raw)
}

fn parse_dimension(token: Option<&str>, name: &str) -> Result<usize> {
    let value: usize = token
        .ok_or_else(|| PuzzleError::Malformed(format!("missing {name} in header")))?
        .parse()
        .map_err(|_| PuzzleError::Malformed(format!("invalid {name} in header")))?;
    if value == 0 {
        return Err(PuzzleError::Malformed(format!("{name} must be positive")).into());
    }
    Ok(value)
}
