//! Attempt state machine, retry loop and multi-sample generation
//!
//! An [`Attempt`] owns a fresh wave and propagator and moves through
//! `Uninitialized -> Propagating <-> WaitingForCollapse -> {Solved,
//! Contradiction}`. The [`Solver`] shares one read-only compatibility table
//! across attempts and samples; a contradiction throws the attempt away and
//! starts a new one with the next seed from the sample's seed stream.

use crate::algorithm::bitset::PatternBitset;
use crate::algorithm::compatibility::CompatibilityTable;
use crate::algorithm::propagation::{Conflict, Propagator};
use crate::algorithm::selection::{
    Heuristic, RandomSelector, TieBreak, choose_variant, select_cell,
};
use crate::algorithm::wave::Wave;
use crate::io::configuration::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_SIZE, DEFAULT_SAMPLES, DEFAULT_SEED, MAX_GRID_DIMENSION,
};
use crate::io::error::{Contradiction, Result, WfcError, invalid_parameter};
use crate::spatial::direction::Topology;
use crate::spatial::grid::OutputGrid;
use ndarray::Array2;

/// Generation parameters shared by both rule extraction modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationParams {
    /// Output width in cells (pixels in overlapping mode)
    pub width: usize,
    /// Output height in cells (pixels in overlapping mode)
    pub height: usize,
    /// Whether the output wraps around its edges
    pub periodic_output: bool,
    /// Seed of the first sample; sample `k` uses `seed + k`
    pub seed: u64,
    /// Attempts per sample before giving up
    pub max_attempts: usize,
    /// Number of independent solves
    pub nb_samples: usize,
    /// Cell ranking used to pick the next collapse
    pub heuristic: Heuristic,
    /// Ordering among equally ranked cells
    pub tie_break: TieBreak,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_OUTPUT_SIZE,
            height: DEFAULT_OUTPUT_SIZE,
            periodic_output: true,
            seed: DEFAULT_SEED,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            nb_samples: DEFAULT_SAMPLES,
            heuristic: Heuristic::default(),
            tie_break: TieBreak::default(),
        }
    }
}

impl GenerationParams {
    /// Check dimensions and budgets
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero or oversized dimension, a zero
    /// attempt budget or a zero sample count
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if self.max_attempts == 0 {
            return Err(invalid_parameter(
                "max_attempts",
                &self.max_attempts,
                &"at least one attempt is required",
            ));
        }
        if self.nb_samples == 0 {
            return Err(invalid_parameter(
                "nb_samples",
                &self.nb_samples,
                &"at least one sample is required",
            ));
        }
        Ok(())
    }
}

/// Restrictions applied to the wave before the first collapse
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Constraints {
    /// (cell, pattern) pairs the cell is forced to
    pub fixed: Vec<(usize, usize)>,
    /// (cell, pattern) pairs removed from the cell
    pub forbidden: Vec<(usize, usize)>,
}

/// Lifecycle of a single attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptState {
    /// Wave allocated but no constraint applied yet
    Uninitialized,
    /// Removals queued and not yet propagated
    Propagating,
    /// Stable wave with undecided cells left
    WaitingForCollapse,
    /// Every cell decided without contradiction
    Solved,
    /// Some cell ran out of variants
    Contradiction(Contradiction),
}

/// One disposable solve of the wave
#[derive(Debug, Clone)]
pub struct Attempt<'a> {
    wave: Wave,
    propagator: Propagator<'a>,
    selector: RandomSelector,
    constraints: &'a Constraints,
    heuristic: Heuristic,
    tie_break: TieBreak,
    state: AttemptState,
    index: usize,
    steps: usize,
}

impl<'a> Attempt<'a> {
    /// Allocate a fresh wave for attempt number `index`
    pub fn new(solver: &'a Solver<'a>, index: usize, seed: u64) -> Self {
        Self {
            wave: Wave::new(solver.topology, solver.weights),
            propagator: Propagator::new(solver.table, solver.topology),
            selector: RandomSelector::new(seed),
            constraints: &solver.constraints,
            heuristic: solver.heuristic,
            tie_break: solver.tie_break,
            state: AttemptState::Uninitialized,
            index,
            steps: 0,
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> AttemptState {
        self.state
    }

    /// Current wave
    pub const fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Collapses performed so far
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Apply constraints and unsupported-variant removal, then propagate
    ///
    /// # Errors
    ///
    /// Returns a [`Contradiction`] if the constraints alone are unsatisfiable
    pub fn initialize(&mut self) -> std::result::Result<(), Contradiction> {
        self.state = AttemptState::Propagating;
        let seeded = self.apply_constraints();
        self.settle(seeded)
    }

    /// Collapse one cell and propagate
    ///
    /// Returns `Ok(true)` while undecided cells remain and `Ok(false)` once
    /// the wave is solved.
    ///
    /// # Errors
    ///
    /// Returns a [`Contradiction`] if propagation empties a cell
    pub fn step(&mut self) -> std::result::Result<bool, Contradiction> {
        match self.state {
            AttemptState::Uninitialized => {
                self.initialize()?;
                return Ok(self.state == AttemptState::WaitingForCollapse);
            }
            AttemptState::Solved => return Ok(false),
            AttemptState::Contradiction(failure) => return Err(failure),
            AttemptState::Propagating | AttemptState::WaitingForCollapse => {}
        }

        let Some(cell) = select_cell(&self.wave, self.heuristic, self.tie_break, &mut self.selector)
        else {
            self.state = AttemptState::Solved;
            return Ok(false);
        };
        let Some(pattern) = choose_variant(&self.wave, cell, &mut self.selector) else {
            return Err(self.fail(cell));
        };

        self.steps += 1;
        self.state = AttemptState::Propagating;
        let collapsed = self.propagator.collapse(&mut self.wave, cell, pattern);
        self.settle(collapsed)?;
        Ok(self.state == AttemptState::WaitingForCollapse)
    }

    /// Run to completion
    ///
    /// # Errors
    ///
    /// Returns the [`Contradiction`] that ended the attempt
    pub fn run(mut self) -> std::result::Result<Array2<usize>, Contradiction> {
        while self.step()? {}
        let topology = self.wave.topology();
        let mut cells = Array2::zeros((topology.height, topology.width));
        for ((row, col), slot) in cells.indexed_iter_mut() {
            let cell = topology.index_of(row, col);
            *slot = self.wave.decided(cell).ok_or_else(|| self.fail(cell))?;
        }
        Ok(cells)
    }

    fn apply_constraints(&mut self) -> std::result::Result<(), Conflict> {
        let constraints = self.constraints;
        for &(cell, pattern) in &constraints.fixed {
            self.propagator.collapse(&mut self.wave, cell, pattern)?;
        }
        for &(cell, pattern) in &constraints.forbidden {
            self.propagator.ban(&mut self.wave, cell, pattern)?;
        }
        self.propagator.ban_unsupported(&mut self.wave)
    }

    fn settle(
        &mut self,
        seeded: std::result::Result<(), Conflict>,
    ) -> std::result::Result<(), Contradiction> {
        let outcome = seeded.and_then(|()| self.propagator.propagate(&mut self.wave));
        match outcome {
            Ok(()) => {
                self.state = if self.wave.is_fully_decided() {
                    AttemptState::Solved
                } else {
                    AttemptState::WaitingForCollapse
                };
                Ok(())
            }
            Err(conflict) => Err(self.fail(conflict.cell)),
        }
    }

    // Ends the attempt; later calls to `step` report the same contradiction
    fn fail(&mut self, cell: usize) -> Contradiction {
        let failure = Contradiction {
            attempt: self.index,
            step: self.steps,
            cell: self.wave.topology().position_of(cell),
        };
        self.state = AttemptState::Contradiction(failure);
        failure
    }
}

/// Retry driver over a fixed compatibility table
#[derive(Debug, Clone)]
pub struct Solver<'a> {
    table: &'a CompatibilityTable,
    weights: &'a [f64],
    topology: Topology,
    constraints: Constraints,
    heuristic: Heuristic,
    tie_break: TieBreak,
}

impl<'a> Solver<'a> {
    /// Create a solver for a grid described by `topology`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The table covers no variants
    /// - `weights` does not have one entry per variant
    /// - Any weight is not a positive finite number
    /// - The grid has no cells
    pub fn new(
        table: &'a CompatibilityTable,
        weights: &'a [f64],
        topology: Topology,
    ) -> Result<Self> {
        if table.pattern_count() == 0 {
            return Err(WfcError::EmptyInput {
                reason: "no tile variants or patterns to place".to_string(),
            });
        }
        if weights.len() != table.pattern_count() {
            return Err(invalid_parameter(
                "weights",
                &weights.len(),
                &format!("expected one weight per variant ({})", table.pattern_count()),
            ));
        }
        if let Some(bad) = weights.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
            return Err(invalid_parameter(
                "weights",
                bad,
                &"weights must be positive and finite",
            ));
        }
        if topology.cell_count() == 0 {
            return Err(invalid_parameter(
                "size",
                &format!("{}x{}", topology.width, topology.height),
                &"grid must contain at least one cell",
            ));
        }

        Ok(Self {
            table,
            weights,
            topology,
            constraints: Constraints::default(),
            heuristic: Heuristic::default(),
            tie_break: TieBreak::default(),
        })
    }

    /// Restrict cells before solving
    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Choose selection heuristic and tie-break
    #[must_use]
    pub const fn with_selection(mut self, heuristic: Heuristic, tie_break: TieBreak) -> Self {
        self.heuristic = heuristic;
        self.tie_break = tie_break;
        self
    }

    /// Grid geometry being solved
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Solve once, retrying on contradiction
    ///
    /// Attempt seeds are drawn from a generator seeded with `seed`, so the
    /// whole sequence, and therefore the result, is reproducible.
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` if all `max_attempts` attempts contradict
    pub fn run(&self, max_attempts: usize, seed: u64) -> Result<OutputGrid> {
        let mut seeds = RandomSelector::new(seed);
        let mut last_contradiction = None;

        for index in 0..max_attempts {
            let attempt_seed = seeds.next_seed();
            match Attempt::new(self, index, attempt_seed).run() {
                Ok(cells) => {
                    log::info!(
                        "solved {}x{} grid on attempt {} (seed {seed})",
                        self.topology.width,
                        self.topology.height,
                        index + 1
                    );
                    return Ok(OutputGrid {
                        cells,
                        periodic: self.topology.periodic,
                        seed: attempt_seed,
                        attempts: index + 1,
                    });
                }
                Err(contradiction) => {
                    log::debug!("contradiction: {contradiction}");
                    last_contradiction = Some(contradiction);
                }
            }
        }

        log::warn!("no solution within {max_attempts} attempts (seed {seed})");
        Err(WfcError::GenerationFailed {
            attempts: max_attempts,
            last_contradiction,
        })
    }

    /// Solve `nb_samples` independent grids, sample `k` seeded with `seed + k`
    ///
    /// Samples run on scoped worker threads; `on_sample` is called with the
    /// sample index as each one finishes. Results are returned in sample
    /// order and match a sequential run exactly.
    ///
    /// # Errors
    ///
    /// Returns the error of the lowest-numbered sample that failed
    pub fn run_samples(
        &self,
        nb_samples: usize,
        max_attempts: usize,
        seed: u64,
        on_sample: &(dyn Fn(usize) + Sync),
    ) -> Result<Vec<OutputGrid>> {
        let solve = |sample: usize| {
            let result = self.run(max_attempts, seed.wrapping_add(sample as u64));
            on_sample(sample);
            result
        };

        let workers = std::thread::available_parallelism()
            .map_or(1, std::num::NonZeroUsize::get)
            .min(nb_samples);
        if workers <= 1 {
            return (0..nb_samples).map(solve).collect();
        }

        let mut results: Vec<(usize, Result<OutputGrid>)> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let solve = &solve;
                    scope.spawn(move || {
                        (worker..nb_samples)
                            .step_by(workers)
                            .map(|sample| (sample, solve(sample)))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        });

        results.sort_by_key(|(sample, _)| *sample);
        results.into_iter().map(|(_, result)| result).collect()
    }
}

/// Possibility set per cell after applying `constraints` and propagating
///
/// Useful for inspecting what a rule set allows before committing to a
/// full solve; `None` if the constraints are contradictory.
pub fn constrained_possibilities(solver: &Solver<'_>) -> Option<Vec<PatternBitset>> {
    let mut attempt = Attempt::new(solver, 0, 0);
    attempt.initialize().ok()?;
    let cells = solver.topology.cell_count();
    (0..cells)
        .map(|cell| attempt.wave().possibilities(cell).cloned())
        .collect()
}
