//! JSON tileset declarations for simple-tiled mode
//!
//! ```json
//! {
//!   "palette": [[255, 255, 255, 255], [0, 0, 0, 255]],
//!   "tiles": [
//!     { "name": "empty", "symmetry": "X", "content": [[0, 0], [0, 0]] },
//!     { "name": "line", "symmetry": "I", "weight": 2.0, "content": [[0, 1], [0, 1]] }
//!   ],
//!   "neighbors": [
//!     { "left": "empty", "right": "line", "right_orientation": 1 }
//!   ]
//! }
//! ```
//!
//! Content cells are palette indices. Weight and orientations default to 1
//! and 0.

use crate::analysis::simple_tiled::Neighbor;
use crate::io::error::{Result, WfcError, invalid_source};
use crate::spatial::tiles::Tile;
use ndarray::Array2;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TilesetRaw {
    palette: Vec<[u8; 4]>,
    tiles: Vec<TileRaw>,
    #[serde(default)]
    neighbors: Vec<NeighborRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TileRaw {
    name: String,
    symmetry: String,
    #[serde(default = "default_weight")]
    weight: f64,
    content: Vec<Vec<usize>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NeighborRaw {
    left: String,
    right: String,
    #[serde(default)]
    left_orientation: usize,
    #[serde(default)]
    right_orientation: usize,
}

const fn default_weight() -> f64 {
    1.0
}

/// Declared tiles, neighbor pairs and the palette their content indexes
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset {
    /// RGBA color for each content label
    pub palette: Vec<[u8; 4]>,
    /// Declared tiles in file order
    pub tiles: Vec<Tile<usize>>,
    /// Declared horizontal neighbor pairs
    pub neighbors: Vec<Neighbor>,
}

impl Tileset {
    /// Read a tileset from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - The JSON does not match the tileset layout
    /// - A tile has an unknown symmetry tag, ragged rows or labels outside the palette
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| WfcError::FileSystem {
            path: path.to_path_buf(),
            operation: "open tileset",
            source: e,
        })?;
        let raw: TilesetRaw =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| WfcError::TilesetParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::from_raw(raw)
    }

    /// Parse a tileset from JSON text
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`], with `<inline>` as the path of parse errors
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: TilesetRaw = serde_json::from_str(text).map_err(|e| WfcError::TilesetParse {
            path: "<inline>".into(),
            source: e,
        })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: TilesetRaw) -> Result<Self> {
        let palette = raw.palette;
        let tiles = raw
            .tiles
            .into_iter()
            .map(|tile| {
                let content = content_grid(&tile.name, tile.content, palette.len())?;
                Tile::with_tag(tile.name, content, &tile.symmetry, tile.weight)
            })
            .collect::<Result<Vec<_>>>()?;
        let neighbors = raw
            .neighbors
            .into_iter()
            .map(|n| {
                Neighbor::new(n.left, n.right).with_orientations(n.left_orientation, n.right_orientation)
            })
            .collect();

        Ok(Self {
            palette,
            tiles,
            neighbors,
        })
    }
}

fn content_grid(name: &str, rows: Vec<Vec<usize>>, colors: usize) -> Result<Array2<usize>> {
    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != width) {
        return Err(invalid_source(&format!("tile '{name}' has rows of different lengths")));
    }
    let cells: Vec<usize> = rows.into_iter().flatten().collect();
    if let Some(label) = cells.iter().find(|&&label| label >= colors) {
        return Err(invalid_source(&format!(
            "tile '{name}' uses label {label}, palette holds {colors}"
        )));
    }
    Array2::from_shape_vec((height, width), cells)
        .map_err(|e| invalid_source(&format!("tile '{name}': {e}")))
}
