//! Solver core: possibility sets, propagation, selection and the retry loop

/// Fixed-length bitsets over variant indices
pub mod bitset;
/// Read-only adjacency table shared by every attempt
pub mod compatibility;
/// Attempt state machine, retries and multi-sample generation
pub mod executor;
/// Support-count propagation of removals
pub mod propagation;
/// Cell selection heuristics and seeded variant choice
pub mod selection;
/// Per-attempt superposition state with entropy memo
pub mod wave;
