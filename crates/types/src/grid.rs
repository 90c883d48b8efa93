//! Grid module - the rectangular cell array of a board
//!
//! Cells hold `0` for empty or the positive id of the piece occupying them.
//! Dimensions are fixed at construction and all rows have equal length.
//! Coordinates: (x, y) with y increasing downward, row 0 at the top.

use serde::{Deserialize, Serialize};

/// The board's cell rectangle, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<i32>>,
}

impl Grid {
    /// Create an all-empty grid of the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rows: vec![vec![0; width]; height],
        }
    }

    pub fn width(&self) -> i32 {
        self.rows.first().map_or(0, |row| row.len() as i32)
    }

    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    /// Cell value at (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<i32> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows.get(y as usize)?.get(x as usize).copied()
    }

    /// Write a cell value
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, value: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// True iff row `y` exists and has no empty cell
    pub fn is_full_row(&self, y: i32) -> bool {
        if y < 0 {
            return false;
        }
        self.rows
            .get(y as usize)
            .is_some_and(|row| row.iter().all(|&cell| cell != 0))
    }

    /// Remove the given rows and close the gaps
    ///
    /// Rows below the removed set keep their position; retained rows above
    /// slide down in order, and the freed rows at the top are reset to empty.
    pub fn compact(&mut self, removed: &[i32]) {
        if removed.is_empty() {
            return;
        }
        let width = self.rows.first().map_or(0, Vec::len);
        let mut write = self.rows.len() as i32 - 1;

        // Walk bottom to top, sliding retained rows down over removed ones.
        for read in (0..self.rows.len() as i32).rev() {
            if removed.contains(&read) {
                continue;
            }
            if write != read {
                self.rows[write as usize] = std::mem::take(&mut self.rows[read as usize]);
            }
            write -= 1;
        }

        for y in 0..=write {
            self.rows[y as usize] = vec![0; width];
        }
    }

    /// The raw rows, top to bottom
    pub fn cells(&self) -> &[Vec<i32>] {
        &self.rows
    }

    /// Create from literal rows for testing
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Self {
        assert!(rows.iter().all(|row| row.len() == rows[0].len()));
        Self { rows }
    }
}
