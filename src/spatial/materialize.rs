//! Turning solved grids of variant indices back into concrete content

use crate::io::error::{Result, WfcError, invalid_source};
use crate::spatial::grid::OutputGrid;
use crate::spatial::symmetry::{Orientable, OrientedTile};
use crate::spatial::tiles::TileRegistry;
use ndarray::Array2;
use std::hash::Hash;

/// A simple-tiled solve with its placements and rendered content
#[derive(Debug, Clone, PartialEq)]
pub struct TiledOutput<T> {
    /// Solved variant indices
    pub grid: OutputGrid,
    /// Base tile and orientation per cell
    pub placements: Array2<OrientedTile>,
    /// Tile contents stitched together, `tile_size` times larger than the grid
    pub content: Array2<T>,
}

/// An overlapping solve with its rendered content
#[derive(Debug, Clone, PartialEq)]
pub struct SampledOutput<T> {
    /// Solved pattern indices
    pub grid: OutputGrid,
    /// Output pixels or symbols
    pub content: Array2<T>,
}

/// Base tile and orientation of every cell
///
/// # Errors
///
/// Returns `InvalidSourceData` if the grid names a variant the registry
/// does not know
pub fn placements<T>(grid: &OutputGrid, registry: &TileRegistry<T>) -> Result<Array2<OrientedTile>> {
    let variants = registry.variants();
    let cells = grid
        .cells
        .iter()
        .map(|&index| {
            variants
                .get(index)
                .map(|variant| OrientedTile {
                    tile: variant.tile,
                    orientation: variant.orientation,
                })
                .ok_or_else(|| unknown_index(index, variants.len()))
        })
        .collect::<Result<Vec<_>>>()?;

    Array2::from_shape_vec(grid.cells.dim(), cells)
        .map_err(|e| invalid_source(&format!("placement grid: {e}")))
}

/// Stitch the oriented content of every cell into one buffer
///
/// # Errors
///
/// Returns `InvalidSourceData` if the grid names an unknown variant or the
/// registry is empty
pub fn render_tiles<T: Orientable + Eq + Hash>(
    grid: &OutputGrid,
    registry: &TileRegistry<T>,
) -> Result<Array2<T>> {
    let size = registry
        .tile_size()
        .ok_or_else(|| invalid_source(&"no tiles registered"))?;
    let contents: Vec<Array2<T>> = (0..registry.variants().len())
        .filter_map(|variant| registry.variant_content(variant))
        .collect();

    let (rows, cols) = grid.cells.dim();
    let mut pixels = Vec::with_capacity(rows * cols * size * size);
    for y in 0..rows * size {
        for x in 0..cols * size {
            let index = grid.get(y / size, x / size).unwrap_or(usize::MAX);
            let pixel = contents
                .get(index)
                .and_then(|content| content.get((y % size, x % size)))
                .ok_or_else(|| unknown_index(index, contents.len()))?;
            pixels.push(pixel.clone());
        }
    }

    Array2::from_shape_vec((rows * size, cols * size), pixels)
        .map_err(|e| invalid_source(&format!("rendered tiles: {e}")))
}

/// Paint an overlapping-mode grid from its pattern table
///
/// A periodic grid paints each pattern's top-left value, so the output
/// matches the grid size. A clamped grid is `pattern_size - 1` larger in
/// each dimension: the last row and column of patterns paint their whole
/// footprint.
///
/// # Errors
///
/// Returns `InvalidSourceData` if the grid names an unknown pattern or a
/// pattern is smaller than `pattern_size`
pub fn render_patterns<T: Clone>(
    grid: &OutputGrid,
    patterns: &[Array2<T>],
    pattern_size: usize,
) -> Result<Array2<T>> {
    let (rows, cols) = grid.cells.dim();
    let margin = if grid.periodic {
        0
    } else {
        pattern_size.saturating_sub(1)
    };
    let (height, width) = (rows + margin, cols + margin);

    let mut pixels = Vec::with_capacity(height * width);
    for y in 0..height {
        for x in 0..width {
            let (row, col) = (y.min(rows.saturating_sub(1)), x.min(cols.saturating_sub(1)));
            let index = grid.get(row, col).unwrap_or(usize::MAX);
            let pixel = patterns
                .get(index)
                .and_then(|pattern| pattern.get((y - row, x - col)))
                .ok_or_else(|| unknown_index(index, patterns.len()))?;
            pixels.push(pixel.clone());
        }
    }

    Array2::from_shape_vec((height, width), pixels)
        .map_err(|e| invalid_source(&format!("rendered patterns: {e}")))
}

fn unknown_index(index: usize, known: usize) -> WfcError {
    invalid_source(&format!("grid refers to variant {index}, only {known} exist"))
}
