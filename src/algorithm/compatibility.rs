//! Precomputed adjacency lookup shared read-only by every attempt
//!
//! For each variant and direction the table stores which variants may sit
//! next to it, both as a bitset for O(1) membership and as a list for the
//! propagation loop. Rules are always recorded in both directions, so
//! `allows(a, d, b) == allows(b, d.opposite(), a)` holds by construction.

use crate::algorithm::bitset::PatternBitset;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::direction::Direction;

/// Collects adjacency rules before freezing them into a table
#[derive(Debug, Clone)]
pub struct CompatibilityBuilder {
    masks: Vec<[PatternBitset; Direction::COUNT]>,
}

impl CompatibilityBuilder {
    /// Start with no rules for `patterns` variants
    pub fn new(patterns: usize) -> Self {
        Self {
            masks: (0..patterns)
                .map(|_| std::array::from_fn(|_| PatternBitset::new(patterns)))
                .collect(),
        }
    }

    /// Allow `neighbor` next to `pattern` in `direction`, and the reverse
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either index is out of range
    pub fn allow(&mut self, pattern: usize, direction: Direction, neighbor: usize) -> Result<()> {
        let patterns = self.masks.len();
        for index in [pattern, neighbor] {
            if index >= patterns {
                return Err(invalid_parameter(
                    "pattern",
                    &index,
                    &format!("only {patterns} patterns exist"),
                ));
            }
        }

        if let Some(mask) = self
            .masks
            .get_mut(pattern)
            .and_then(|m| m.get_mut(direction.index()))
        {
            mask.insert(neighbor);
        }
        if let Some(mask) = self
            .masks
            .get_mut(neighbor)
            .and_then(|m| m.get_mut(direction.opposite().index()))
        {
            mask.insert(pattern);
        }
        Ok(())
    }

    /// Freeze the rules
    pub fn build(self) -> CompatibilityTable {
        let lists = self
            .masks
            .iter()
            .map(|per_direction: &[PatternBitset; Direction::COUNT]| {
                std::array::from_fn(|d| {
                    per_direction
                        .get(d)
                        .map_or_else(Vec::new, PatternBitset::to_vec)
                })
            })
            .collect();
        CompatibilityTable {
            masks: self.masks,
            lists,
        }
    }
}

/// Read-only adjacency table indexed by variant and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityTable {
    masks: Vec<[PatternBitset; Direction::COUNT]>,
    lists: Vec<[Vec<usize>; Direction::COUNT]>,
}

impl CompatibilityTable {
    /// Number of variants the table covers
    pub fn pattern_count(&self) -> usize {
        self.masks.len()
    }

    /// Whether `neighbor` may sit next to `pattern` in `direction`
    pub fn allows(&self, pattern: usize, direction: Direction, neighbor: usize) -> bool {
        self.mask(pattern, direction)
            .is_some_and(|mask| mask.contains(neighbor))
    }

    /// Bitset of variants allowed next to `pattern` in `direction`
    pub fn mask(&self, pattern: usize, direction: Direction) -> Option<&PatternBitset> {
        self.masks.get(pattern)?.get(direction.index())
    }

    /// Variants allowed next to `pattern` in `direction`, ascending
    pub fn neighbors(&self, pattern: usize, direction: Direction) -> &[usize] {
        self.lists
            .get(pattern)
            .and_then(|l| l.get(direction.index()))
            .map_or(&[], Vec::as_slice)
    }

    /// How many variants support `pattern` from the cell on its `direction` side
    ///
    /// This is the initial support count the propagator starts from.
    pub fn support_count(&self, pattern: usize, direction: Direction) -> usize {
        self.neighbors(pattern, direction.opposite()).len()
    }
}
