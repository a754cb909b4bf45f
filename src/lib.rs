//! Wave function collapse generation of tile maps and textures
//!
//! Two front ends build the same solver input. Simple-tiled mode expands
//! declared tiles and neighbor pairs through each tile's symmetry class;
//! overlapping mode samples N×N patterns from an example and derives
//! adjacency from their overlaps. The solver then collapses a wave of
//! possibility sets cell by cell, retrying on contradiction, and the
//! solved grid is rendered back into content.

#![forbid(unsafe_code)]

/// Solver core including propagation, selection and the retry loop
pub mod algorithm;
/// Rule extraction from tilesets and sample images
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Entropy and probability helpers
pub mod math;
/// Grid geometry, symmetry and tile data
pub mod spatial;

pub use io::error::{Result, WfcError};
