//! Solved grid of variant indices
//!
//! An [`OutputGrid`] only exists for a fully collapsed, contradiction-free
//! wave; the executor never hands out a partial one.

use crate::algorithm::compatibility::CompatibilityTable;
use crate::spatial::direction::{Direction, Topology};
use ndarray::Array2;

/// A finished `height x width` assignment of variant (or pattern) indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputGrid {
    /// Variant index per cell, indexed (row, col)
    pub cells: Array2<usize>,
    /// Whether the grid was solved with wrapping neighbors
    pub periodic: bool,
    /// Seed of the attempt that succeeded
    pub seed: u64,
    /// Number of attempts used, including the successful one
    pub attempts: usize,
}

impl OutputGrid {
    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Variant at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        self.cells.get((row, col)).copied()
    }

    /// Topology the grid was solved on
    pub fn topology(&self) -> Topology {
        Topology::new(self.height(), self.width(), self.periodic)
    }

    /// Every adjacent pair that violates `table`
    ///
    /// Returns `(cell, direction, neighbor)` triples of flat indices; empty
    /// for any grid produced by a successful solve.
    pub fn violations(&self, table: &CompatibilityTable) -> Vec<(usize, Direction, usize)> {
        let topology = self.topology();
        let flat: Vec<usize> = self.cells.iter().copied().collect();
        let mut violations = Vec::new();

        for (cell, &variant) in flat.iter().enumerate() {
            for direction in Direction::ALL {
                let Some(neighbor) = topology.neighbor(cell, direction) else {
                    continue;
                };
                let Some(&other) = flat.get(neighbor) else {
                    continue;
                };
                if !table.allows(variant, direction, other) {
                    violations.push((cell, direction, neighbor));
                }
            }
        }

        violations
    }
}
