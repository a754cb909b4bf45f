//! Superposition state of one attempt
//!
//! Each cell keeps a bitset of still-possible variants and the running sums
//! needed to update its Shannon entropy in O(1) per removal. A cell with one
//! possibility is decided; a cell with none is a contradiction.

use crate::algorithm::bitset::PatternBitset;
use crate::math::probability::{shannon_entropy, weight_log_weight};
use crate::spatial::direction::Topology;

/// Per-cell entropy bookkeeping
#[derive(Debug, Clone, Copy, PartialEq)]
struct CellEntropy {
    remaining: usize,
    sum_of_weights: f64,
    sum_of_weight_log_weights: f64,
    entropy: f64,
}

/// Result of removing one variant from a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The variant was already impossible
    Unchanged,
    /// The variant was removed and others remain
    Narrowed,
    /// The variant was the last one: the cell is now a contradiction
    Emptied,
}

/// Possibility sets and entropy for every cell of the grid
#[derive(Debug, Clone)]
pub struct Wave {
    topology: Topology,
    weights: Vec<f64>,
    weight_log_weights: Vec<f64>,
    possible: Vec<PatternBitset>,
    cells: Vec<CellEntropy>,
}

impl Wave {
    /// Create a wave where every cell can still be any variant
    pub fn new(topology: Topology, weights: &[f64]) -> Self {
        let weight_log_weights: Vec<f64> = weights.iter().map(|&w| weight_log_weight(w)).collect();
        let sum_of_weights: f64 = weights.iter().sum();
        let sum_of_weight_log_weights: f64 = weight_log_weights.iter().sum();
        let initial = CellEntropy {
            remaining: weights.len(),
            sum_of_weights,
            sum_of_weight_log_weights,
            entropy: shannon_entropy(sum_of_weights, sum_of_weight_log_weights),
        };

        let cell_count = topology.cell_count();
        Self {
            topology,
            weights: weights.to_vec(),
            weight_log_weights,
            possible: vec![PatternBitset::all(weights.len()); cell_count],
            cells: vec![initial; cell_count],
        }
    }

    /// Grid geometry this wave covers
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of variants
    pub fn pattern_count(&self) -> usize {
        self.weights.len()
    }

    /// Sampling weights of all variants
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Whether `pattern` is still possible at `cell`
    pub fn is_possible(&self, cell: usize, pattern: usize) -> bool {
        self.possible
            .get(cell)
            .is_some_and(|set| set.contains(pattern))
    }

    /// Possibility set of a cell
    pub fn possibilities(&self, cell: usize) -> Option<&PatternBitset> {
        self.possible.get(cell)
    }

    /// Number of variants still possible at `cell`
    pub fn remaining(&self, cell: usize) -> usize {
        self.cells.get(cell).map_or(0, |c| c.remaining)
    }

    /// Shannon entropy of the cell's remaining weights
    pub fn entropy(&self, cell: usize) -> f64 {
        self.cells.get(cell).map_or(0.0, |c| c.entropy)
    }

    /// The single remaining variant of a decided cell
    pub fn decided(&self, cell: usize) -> Option<usize> {
        if self.remaining(cell) != 1 {
            return None;
        }
        self.possible.get(cell)?.iter().next()
    }

    /// Whether every cell holds exactly one variant
    pub fn is_fully_decided(&self) -> bool {
        self.cells.iter().all(|c| c.remaining == 1)
    }

    /// Remove `pattern` from `cell` and update the entropy memo
    pub fn remove(&mut self, cell: usize, pattern: usize) -> Removal {
        let Some(set) = self.possible.get_mut(cell) else {
            return Removal::Unchanged;
        };
        if !set.remove(pattern) {
            return Removal::Unchanged;
        }

        let weight = self.weights.get(pattern).copied().unwrap_or(0.0);
        let weight_log_weight = self.weight_log_weights.get(pattern).copied().unwrap_or(0.0);
        let Some(state) = self.cells.get_mut(cell) else {
            return Removal::Unchanged;
        };
        state.remaining = state.remaining.saturating_sub(1);
        state.sum_of_weights -= weight;
        state.sum_of_weight_log_weights -= weight_log_weight;
        state.entropy = if state.remaining <= 1 {
            0.0
        } else {
            shannon_entropy(state.sum_of_weights, state.sum_of_weight_log_weights)
        };

        if state.remaining == 0 {
            Removal::Emptied
        } else {
            Removal::Narrowed
        }
    }
}
