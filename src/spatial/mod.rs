//! Grid geometry, tile data and output materialization
//!
//! This module contains spatial-related functionality including:
//! - Directions and periodic or clamped neighbor lookup
//! - Symmetry classes and dihedral transforms
//! - The tile registry and solved output grids

/// Cardinal directions and grid topology
pub mod direction;
/// Solved grids of variant indices
pub mod grid;
/// Rendering solved grids back into content
pub mod materialize;
/// Symmetry tags, orientations and 2D transforms
pub mod symmetry;
/// Tile registry and oriented variants
pub mod tiles;

pub use grid::OutputGrid;
