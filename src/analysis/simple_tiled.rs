//! Rule extraction from explicitly declared tiles and neighbor pairs
//!
//! A declared pair says the right tile, in its given orientation, may sit
//! immediately right of the left tile in its orientation. Turning and
//! mirroring the whole pair through the eight dihedral actions yields the
//! rules for the other directions and orientation combinations.

use crate::algorithm::compatibility::{CompatibilityBuilder, CompatibilityTable};
use crate::algorithm::executor::{GenerationParams, Solver};
use crate::io::error::{Result, WfcError, invalid_parameter, invalid_source};
use crate::spatial::direction::{Direction, Topology};
use crate::spatial::materialize::{TiledOutput, placements, render_tiles};
use crate::spatial::symmetry::{DIHEDRAL_ACTIONS, Orientable, transform_direction};
use crate::spatial::tiles::{Tile, TileRegistry};
use std::hash::Hash;

/// A declared horizontal adjacency between two named tiles
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Neighbor {
    /// Tile on the left
    pub left: String,
    /// Orientation index of the left tile
    pub left_orientation: usize,
    /// Tile on the right
    pub right: String,
    /// Orientation index of the right tile
    pub right_orientation: usize,
}

impl Neighbor {
    /// Pair two tiles in their base orientation
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            left_orientation: 0,
            right: right.into(),
            right_orientation: 0,
        }
    }

    /// Set the orientation index of each side
    #[must_use]
    pub const fn with_orientations(mut self, left: usize, right: usize) -> Self {
        self.left_orientation = left;
        self.right_orientation = right;
        self
    }
}

/// Tile registry plus the compatibility table derived from its neighbors
#[derive(Debug, Clone)]
pub struct SimpleTiledModel<T> {
    registry: TileRegistry<T>,
    table: CompatibilityTable,
    weights: Vec<f64>,
}

impl<T: Orientable + Eq + Hash> SimpleTiledModel<T> {
    /// Register `tiles` and expand `neighbors` into a compatibility table
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tile is declared
    /// - A tile fails registration (bad weight, size or duplicate name)
    /// - A neighbor names an undeclared tile
    /// - An orientation index exceeds its tile's variant count
    pub fn new(tiles: impl IntoIterator<Item = Tile<T>>, neighbors: &[Neighbor]) -> Result<Self> {
        let registry = TileRegistry::from_tiles(tiles)?;
        if registry.is_empty() {
            return Err(WfcError::EmptyInput {
                reason: "no tiles declared".to_string(),
            });
        }

        let mut builder = CompatibilityBuilder::new(registry.variants().len());
        for neighbor in neighbors {
            expand_neighbor(&registry, &mut builder, neighbor)?;
        }
        let table = builder.build();
        let weights = registry.variant_weights();

        log::debug!(
            "simple-tiled model: {} tiles, {} variants, {} neighbor declarations",
            registry.len(),
            weights.len(),
            neighbors.len()
        );

        Ok(Self {
            registry,
            table,
            weights,
        })
    }

    /// Solve and materialize every requested sample
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for bad parameters and `GenerationFailed`
    /// if a sample exhausts its attempts
    pub fn generate(&self, params: &GenerationParams) -> Result<Vec<TiledOutput<T>>> {
        self.generate_with_progress(params, &|_| {})
    }

    /// [`Self::generate`], reporting each finished sample index
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`]
    pub fn generate_with_progress(
        &self,
        params: &GenerationParams,
        on_sample: &(dyn Fn(usize) + Sync),
    ) -> Result<Vec<TiledOutput<T>>> {
        let solver = self.solver(params)?;
        let grids = solver.run_samples(
            params.nb_samples,
            params.max_attempts,
            params.seed,
            on_sample,
        )?;

        grids
            .into_iter()
            .map(|grid| {
                Ok(TiledOutput {
                    placements: placements(&grid, &self.registry)?,
                    content: render_tiles(&grid, &self.registry)?,
                    grid,
                })
            })
            .collect()
    }
}

impl<T> SimpleTiledModel<T> {
    /// Solver over this model's rules for the requested output
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `params` fail validation
    pub fn solver(&self, params: &GenerationParams) -> Result<Solver<'_>> {
        params.validate()?;
        let topology = Topology::new(params.height, params.width, params.periodic_output);
        Ok(Solver::new(&self.table, &self.weights, topology)?
            .with_selection(params.heuristic, params.tie_break))
    }

    /// Registered tiles and their variants
    pub const fn registry(&self) -> &TileRegistry<T> {
        &self.registry
    }

    /// Expanded adjacency rules
    pub const fn table(&self) -> &CompatibilityTable {
        &self.table
    }

    /// Sampling weight per variant
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

fn expand_neighbor<T>(
    registry: &TileRegistry<T>,
    builder: &mut CompatibilityBuilder,
    neighbor: &Neighbor,
) -> Result<()>
where
    T: Orientable + Eq + Hash,
{
    let left = registry.id_of(&neighbor.left)?;
    let right = registry.id_of(&neighbor.right)?;
    let left_actions = orientation_actions(registry, left, neighbor.left_orientation)?;
    let right_actions = orientation_actions(registry, right, neighbor.right_orientation)?;

    for action in 0..DIHEDRAL_ACTIONS {
        let direction = transform_direction(Direction::Right, action);
        let (Some(&left_index), Some(&right_index)) =
            (left_actions.get(action), right_actions.get(action))
        else {
            continue;
        };
        let first = registry
            .variant_id(left, left_index)
            .ok_or_else(|| invalid_source(&format!("tile '{}' lost a variant", neighbor.left)))?;
        let second = registry
            .variant_id(right, right_index)
            .ok_or_else(|| invalid_source(&format!("tile '{}' lost a variant", neighbor.right)))?;
        builder.allow(first, direction, second)?;
    }
    Ok(())
}

// Orientation index reached from `orientation` under each dihedral action
fn orientation_actions<T>(
    registry: &TileRegistry<T>,
    tile: usize,
    orientation: usize,
) -> Result<Vec<usize>> {
    let symmetry = registry
        .tile(tile)
        .map(|t| t.symmetry)
        .ok_or_else(|| invalid_source(&format!("tile id {tile} is not registered")))?;
    if orientation >= symmetry.variant_count() {
        return Err(invalid_parameter(
            "orientation",
            &orientation,
            &format!(
                "symmetry {symmetry} has only {} orientations",
                symmetry.variant_count()
            ),
        ));
    }

    Ok(symmetry
        .action_map()
        .iter()
        .map(|map| map.get(orientation).copied().unwrap_or(orientation))
        .collect())
}
