//! Tile registry and oriented variant expansion
//!
//! Tiles are registered in input order and receive dense ids. Each tile
//! expands into the oriented variants its symmetry class allows, and the
//! solver works purely on variant indices.

use crate::io::error::{Result, WfcError, invalid_parameter, invalid_source};
use crate::spatial::symmetry::{Orientable, Orientation, Symmetry};
use ndarray::Array2;
use std::collections::HashMap;
use std::hash::Hash;

/// A declared tile: square content with a symmetry class and sampling weight
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<T> {
    /// Name neighbor rules refer to
    pub name: String,
    /// Square block of symbols or colors
    pub content: Array2<T>,
    /// Which orientations are distinct
    pub symmetry: Symmetry,
    /// Relative sampling frequency
    pub weight: f64,
}

impl<T> Tile<T> {
    /// Create a tile from an already parsed symmetry class
    pub fn new(name: impl Into<String>, content: Array2<T>, symmetry: Symmetry, weight: f64) -> Self {
        Self {
            name: name.into(),
            content,
            symmetry,
            weight,
        }
    }

    /// Create a tile from a symmetry letter
    ///
    /// # Errors
    ///
    /// Returns `InvalidSymmetryTag` if `tag` is not a known symmetry letter
    pub fn with_tag(
        name: impl Into<String>,
        content: Array2<T>,
        tag: &str,
        weight: f64,
    ) -> Result<Self> {
        Ok(Self::new(name, content, tag.parse()?, weight))
    }
}

/// One oriented variant of a registered tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    /// Id of the base tile
    pub tile: usize,
    /// Index of this variant among its tile's variants
    pub orientation_index: usize,
    /// Transform taking the base content to this variant
    pub orientation: Orientation,
}

/// Catalog of tiles and their oriented variants
#[derive(Debug, Clone)]
pub struct TileRegistry<T> {
    tiles: Vec<Tile<T>>,
    names: HashMap<String, usize>,
    by_content: HashMap<Array2<T>, usize>,
    variants: Vec<Variant>,
    variant_ids: Vec<Vec<usize>>,
}

impl<T> Default for TileRegistry<T> {
    fn default() -> Self {
        Self {
            tiles: Vec::new(),
            names: HashMap::new(),
            by_content: HashMap::new(),
            variants: Vec::new(),
            variant_ids: Vec::new(),
        }
    }
}

impl<T: Orientable + Eq + Hash> TileRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every tile in order
    ///
    /// # Errors
    ///
    /// Propagates the first registration error
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile<T>>) -> Result<Self> {
        let mut registry = Self::new();
        for tile in tiles {
            registry.register(tile)?;
        }
        Ok(registry)
    }

    /// Add a tile and return its id
    ///
    /// A tile whose content matches an earlier one is merged into it: its
    /// name becomes an alias and its weight is added to the original.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The weight is not a positive finite number
    /// - The content is empty or not square
    /// - The content size differs from previously registered tiles
    /// - The name is already used by a tile with different content
    pub fn register(&mut self, tile: Tile<T>) -> Result<usize> {
        if !(tile.weight.is_finite() && tile.weight > 0.0) {
            return Err(invalid_parameter(
                "weight",
                &tile.weight,
                &format!("tile '{}' needs a positive finite weight", tile.name),
            ));
        }

        let (rows, cols) = tile.content.dim();
        if rows == 0 || rows != cols {
            return Err(invalid_source(&format!(
                "tile '{}' is {rows}x{cols}, tiles must be non-empty squares",
                tile.name
            )));
        }
        if let Some(size) = self.tile_size() {
            if size != rows {
                return Err(invalid_source(&format!(
                    "tile '{}' is {rows}x{rows} but earlier tiles are {size}x{size}",
                    tile.name
                )));
            }
        }

        if let Some(&existing) = self.by_content.get(&tile.content) {
            if let Some(&named) = self.names.get(&tile.name) {
                if named != existing {
                    return Err(duplicate_name(&tile.name));
                }
            }
            if let Some(original) = self.tiles.get_mut(existing) {
                log::debug!(
                    "tile '{}' duplicates '{}', merging weights",
                    tile.name,
                    original.name
                );
                original.weight += tile.weight;
            }
            self.names.insert(tile.name, existing);
            return Ok(existing);
        }

        if self.names.contains_key(&tile.name) {
            return Err(duplicate_name(&tile.name));
        }

        let id = self.tiles.len();
        let mut ids = Vec::with_capacity(tile.symmetry.variant_count());
        for orientation_index in 0..tile.symmetry.variant_count() {
            let orientation = tile
                .symmetry
                .orientation(orientation_index)
                .unwrap_or(Orientation::IDENTITY);
            ids.push(self.variants.len());
            self.variants.push(Variant {
                tile: id,
                orientation_index,
                orientation,
            });
        }
        self.variant_ids.push(ids);
        self.names.insert(tile.name.clone(), id);
        self.by_content.insert(tile.content.clone(), id);
        self.tiles.push(tile);
        Ok(id)
    }

    /// Id of a tile by name or alias
    ///
    /// # Errors
    ///
    /// Returns `UnknownTileReference` if no tile carries that name
    pub fn id_of(&self, name: &str) -> Result<usize> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| WfcError::UnknownTileReference {
                name: name.to_string(),
            })
    }

    /// Concrete content of a variant
    pub fn variant_content(&self, variant: usize) -> Option<Array2<T>> {
        let v = self.variants.get(variant)?;
        let tile = self.tiles.get(v.tile)?;
        Some(v.orientation.apply(&tile.content))
    }
}

impl<T> TileRegistry<T> {
    /// All registered tiles in id order
    pub fn tiles(&self) -> &[Tile<T>] {
        &self.tiles
    }

    /// Tile by id
    pub fn tile(&self, id: usize) -> Option<&Tile<T>> {
        self.tiles.get(id)
    }

    /// All oriented variants in index order
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Variant indices belonging to a base tile
    pub fn variants_of(&self, tile: usize) -> &[usize] {
        self.variant_ids.get(tile).map_or(&[], Vec::as_slice)
    }

    /// Variant index for a base tile in a given orientation index
    pub fn variant_id(&self, tile: usize, orientation_index: usize) -> Option<usize> {
        self.variant_ids.get(tile)?.get(orientation_index).copied()
    }

    /// Sampling weight of every variant, inherited from its base tile
    pub fn variant_weights(&self) -> Vec<f64> {
        self.variants
            .iter()
            .map(|v| self.tiles.get(v.tile).map_or(0.0, |t| t.weight))
            .collect()
    }

    /// Side length shared by all tiles, if any are registered
    pub fn tile_size(&self) -> Option<usize> {
        self.tiles.first().map(|t| t.content.nrows())
    }

    /// Number of base tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tiles are registered
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

fn duplicate_name(name: &str) -> WfcError {
    invalid_source(&format!(
        "tile name '{name}' is declared twice with different content"
    ))
}
