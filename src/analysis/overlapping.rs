//! Rule extraction by sampling N×N patterns from an example grid
//!
//! Every window of the sample (and, depending on the symmetry level, its
//! rotations and mirrors) becomes a pattern weighted by how often it occurs.
//! Two patterns may be neighbors when they agree on their overlap after
//! shifting one cell in that direction.

use crate::algorithm::compatibility::{CompatibilityBuilder, CompatibilityTable};
use crate::algorithm::executor::{Constraints, GenerationParams, Solver};
use crate::io::configuration::{
    DEFAULT_PATTERN_SIZE, DEFAULT_SYMMETRY, MAX_GRID_DIMENSION, MAX_SYMMETRY_LEVEL,
};
use crate::io::error::{Result, WfcError, invalid_parameter, invalid_source};
use crate::spatial::direction::{Direction, Topology};
use crate::spatial::materialize::{SampledOutput, render_patterns};
use crate::spatial::symmetry::{Orientable, dihedral_images};
use ndarray::Array2;
use std::collections::HashMap;
use std::hash::Hash;

/// Sampling flags for overlapping mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlappingOptions {
    /// Side length N of sampled patterns
    pub pattern_size: usize,
    /// Whether windows wrap around the sample edges
    pub periodic_input: bool,
    /// Pin the bottom-center pattern to the output's bottom row
    pub ground: bool,
    /// How many of the eight dihedral images of each window to keep
    pub symmetry: usize,
}

impl Default for OverlappingOptions {
    fn default() -> Self {
        Self {
            pattern_size: DEFAULT_PATTERN_SIZE,
            periodic_input: false,
            ground: false,
            symmetry: DEFAULT_SYMMETRY,
        }
    }
}

impl OverlappingOptions {
    /// Check pattern size and symmetry level
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero or oversized pattern size, or
    /// a symmetry level outside `1..=8`
    pub fn validate(&self) -> Result<()> {
        if self.pattern_size == 0 || self.pattern_size > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "pattern_size",
                &self.pattern_size,
                &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
            ));
        }
        if !(1..=MAX_SYMMETRY_LEVEL).contains(&self.symmetry) {
            return Err(invalid_parameter(
                "symmetry",
                &self.symmetry,
                &format!("must be between 1 and {MAX_SYMMETRY_LEVEL}"),
            ));
        }
        Ok(())
    }
}

/// Patterns, their weights and the overlap-derived compatibility table
#[derive(Debug, Clone)]
pub struct OverlappingModel<T> {
    options: OverlappingOptions,
    patterns: Vec<Array2<T>>,
    weights: Vec<f64>,
    table: CompatibilityTable,
    ground: Option<usize>,
}

impl<T: Orientable + Eq + Hash> OverlappingModel<T> {
    /// Extract patterns and rules from `sample`
    ///
    /// With `symmetry > 1` the rotated and mirrored windows are added as
    /// patterns too, so the model can produce arrangements that never occur
    /// literally in the sample.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `options` fail validation
    /// - The sample is empty, or smaller than N×N without periodic input
    /// - `ground` is set and the bottom-center window cannot be located
    pub fn new(sample: &Array2<T>, options: OverlappingOptions) -> Result<Self> {
        options.validate()?;
        let (height, width) = sample.dim();
        let n = options.pattern_size;
        if height == 0 || width == 0 {
            return Err(WfcError::EmptyInput {
                reason: "sample has no cells".to_string(),
            });
        }
        if !options.periodic_input && (height < n || width < n) {
            return Err(WfcError::EmptyInput {
                reason: format!(
                    "{width}x{height} sample holds no {n}x{n} window without periodic input"
                ),
            });
        }

        let (rows, cols) = if options.periodic_input {
            (height, width)
        } else {
            (height - n + 1, width - n + 1)
        };

        let mut index: HashMap<Array2<T>, usize> = HashMap::new();
        let mut patterns = Vec::new();
        let mut weights: Vec<f64> = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                let window = extract_window(sample, row, col, n);
                for image in dihedral_images(&window).into_iter().take(options.symmetry) {
                    if let Some(&id) = index.get(&image) {
                        if let Some(weight) = weights.get_mut(id) {
                            *weight += 1.0;
                        }
                    } else {
                        index.insert(image.clone(), patterns.len());
                        patterns.push(image);
                        weights.push(1.0);
                    }
                }
            }
        }

        let ground = if options.ground {
            let window = ground_window(sample, &options);
            let id = index.get(&window).copied().ok_or_else(|| {
                invalid_source(&"bottom-center window is not among the sampled patterns")
            })?;
            Some(id)
        } else {
            None
        };

        let table = overlap_table(&patterns, n)?;
        log::debug!(
            "overlapping model: {} patterns of size {n} from {width}x{height} sample",
            patterns.len()
        );

        Ok(Self {
            options,
            patterns,
            weights,
            table,
            ground,
        })
    }

    /// Solve and render every requested sample
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for bad parameters and `GenerationFailed`
    /// if a sample exhausts its attempts
    pub fn generate(&self, params: &GenerationParams) -> Result<Vec<SampledOutput<T>>> {
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
    ) -> Result<Vec<SampledOutput<T>>> {
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
                Ok(SampledOutput {
                    content: render_patterns(&grid, &self.patterns, self.options.pattern_size)?,
                    grid,
                })
            })
            .collect()
    }
}

impl<T> OverlappingModel<T> {
    /// Wave geometry for an output of the requested size
    ///
    /// A clamped output needs one pattern per N×N window, so its wave is
    /// `N - 1` smaller in each dimension than the output.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a clamped output is smaller than N×N
    pub fn wave_topology(&self, params: &GenerationParams) -> Result<Topology> {
        if params.periodic_output {
            return Ok(Topology::new(params.height, params.width, true));
        }
        let n = self.options.pattern_size;
        for (parameter, value) in [("width", params.width), ("height", params.height)] {
            if value < n {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("non-periodic output must be at least the pattern size {n}"),
                ));
            }
        }
        Ok(Topology::new(
            params.height - n + 1,
            params.width - n + 1,
            false,
        ))
    }

    /// Ground restrictions for a wave of the given geometry
    ///
    /// The ground pattern is fixed along the bottom row and forbidden
    /// everywhere else; without a ground pattern nothing is restricted.
    pub fn constraints(&self, topology: Topology) -> Constraints {
        let Some(ground) = self.ground else {
            return Constraints::default();
        };
        let bottom = topology.height.saturating_sub(1);
        let mut constraints = Constraints::default();
        for row in 0..topology.height {
            for col in 0..topology.width {
                let cell = topology.index_of(row, col);
                if row == bottom {
                    constraints.fixed.push((cell, ground));
                } else {
                    constraints.forbidden.push((cell, ground));
                }
            }
        }
        constraints
    }

    /// Solver over this model's rules for the requested output
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `params` fail validation or the output
    /// is too small for a clamped wave
    pub fn solver(&self, params: &GenerationParams) -> Result<Solver<'_>> {
        params.validate()?;
        let topology = self.wave_topology(params)?;
        Ok(Solver::new(&self.table, &self.weights, topology)?
            .with_constraints(self.constraints(topology))
            .with_selection(params.heuristic, params.tie_break))
    }

    /// Sampled patterns, indexed as in solved grids
    pub fn patterns(&self) -> &[Array2<T>] {
        &self.patterns
    }

    /// Occurrence count per pattern
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Overlap-derived adjacency rules
    pub const fn table(&self) -> &CompatibilityTable {
        &self.table
    }

    /// Pattern pinned to the bottom row, if ground is enabled
    pub const fn ground_pattern(&self) -> Option<usize> {
        self.ground
    }

    /// Options the model was built with
    pub const fn options(&self) -> &OverlappingOptions {
        &self.options
    }
}

/// Whether `second`, shifted by `offset` relative to `first`, matches it on their overlap
///
/// `offset` is (row delta, column delta); both patterns are `n x n`.
pub fn agrees<T: PartialEq>(first: &Array2<T>, second: &Array2<T>, offset: (isize, isize), n: usize) -> bool {
    let (dy, dx) = offset;
    let size = n as isize;
    let rows = dy.max(0)..(size + dy).min(size);
    let cols = dx.max(0)..(size + dx).min(size);

    for y in rows {
        for x in cols.clone() {
            let a = first.get((y as usize, x as usize));
            let b = second.get(((y - dy) as usize, (x - dx) as usize));
            if a.is_none() || a != b {
                return false;
            }
        }
    }
    true
}

fn overlap_table<T: PartialEq>(patterns: &[Array2<T>], n: usize) -> Result<CompatibilityTable> {
    let mut builder = CompatibilityBuilder::new(patterns.len());
    for (first_id, first) in patterns.iter().enumerate() {
        for (second_id, second) in patterns.iter().enumerate() {
            for direction in [Direction::Right, Direction::Down] {
                if agrees(first, second, direction.offset(), n) {
                    builder.allow(first_id, direction, second_id)?;
                }
            }
        }
    }
    Ok(builder.build())
}

// Wrapping keeps every index in range for any window position
#[allow(clippy::indexing_slicing)]
fn extract_window<T: Clone>(sample: &Array2<T>, row: usize, col: usize, n: usize) -> Array2<T> {
    let (height, width) = sample.dim();
    Array2::from_shape_fn((n, n), |(dy, dx)| {
        sample[((row + dy) % height, (col + dx) % width)].clone()
    })
}

fn ground_window<T: Clone>(sample: &Array2<T>, options: &OverlappingOptions) -> Array2<T> {
    let (height, width) = sample.dim();
    let n = options.pattern_size;
    let (row, col) = if options.periodic_input {
        (height - 1, width / 2)
    } else {
        (height - n, (width / 2).min(width - n))
    };
    extract_window(sample, row, col, n)
}
