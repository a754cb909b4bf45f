//! Rule extraction from declared tiles or sampled images

/// Overlapping mode: N×N patterns sampled from an example
pub mod overlapping;
/// Raster images converted to label grids
pub mod patterns;
/// Simple-tiled mode: declared tiles and neighbor pairs
pub mod simple_tiled;
