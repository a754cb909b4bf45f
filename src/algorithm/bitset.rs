use bitvec::prelude::*;

/// Fixed-size bitset over pattern (or variant) indices
///
/// Indices are zero-based and match the solver's dense variant ids.
/// Provides O(1) membership testing and ascending iteration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatternBitset {
    bits: BitVec,
}

impl PatternBitset {
    /// Create a bitset with no patterns present
    pub fn new(len: usize) -> Self {
        Self {
            bits: bitvec![0; len],
        }
    }

    /// Create a bitset containing every pattern
    pub fn all(len: usize) -> Self {
        Self {
            bits: bitvec![1; len],
        }
    }

    /// Insert a pattern index; out-of-range indices are ignored
    pub fn insert(&mut self, pattern: usize) {
        if pattern < self.bits.len() {
            self.bits.set(pattern, true);
        }
    }

    /// Remove a pattern index, returning whether it was present
    pub fn remove(&mut self, pattern: usize) -> bool {
        let present = self.contains(pattern);
        if present {
            self.bits.set(pattern, false);
        }
        present
    }

    /// Test pattern membership
    pub fn contains(&self, pattern: usize) -> bool {
        self.bits.get(pattern).as_deref() == Some(&true)
    }

    /// Iterate over present pattern indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all pattern indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}
