//! Mathematical utilities

/// Entropy helpers and weighted sampling
pub mod probability;
