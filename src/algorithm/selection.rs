//! Cell selection heuristics and seeded weighted variant choice

use crate::algorithm::wave::Wave;
use crate::math::probability::weighted_index;
use rand::{Rng, SeedableRng, rngs::StdRng};

// Noise stays far below any real entropy gap between two cells
const TIE_BREAK_NOISE: f64 = 1e-6;

// Running entropy sums drift by a few ulps with removal order
const SCORE_TOLERANCE: f64 = 1e-12;

/// How the next cell to collapse is ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Lowest Shannon entropy over remaining weights
    #[default]
    Entropy,
    /// Fewest remaining variants
    Remaining,
}

/// How equally ranked cells are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// First minimum in row-major scan order
    #[default]
    ScanOrder,
    /// Seeded noise added to each score before comparing
    Noise,
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in [0, 1)
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Fresh 64-bit value, used to derive per-attempt seeds
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random::<u64>()
    }

    /// Weighted random selection over `weights`
    ///
    /// Returns `None` when every weight is zero
    pub fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        let uniform = self.uniform();
        weighted_index(weights, uniform)
    }
}

/// Pick the undecided cell with the lowest score
///
/// Returns `None` once every cell holds at most one variant. Cells with
/// zero variants never reach selection because propagation reports them
/// first.
pub fn select_cell(
    wave: &Wave,
    heuristic: Heuristic,
    tie_break: TieBreak,
    selector: &mut RandomSelector,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for cell in 0..wave.topology().cell_count() {
        let remaining = wave.remaining(cell);
        if remaining <= 1 {
            continue;
        }

        let mut score = match heuristic {
            Heuristic::Entropy => wave.entropy(cell),
            Heuristic::Remaining => remaining as f64,
        };
        if tie_break == TieBreak::Noise {
            score += TIE_BREAK_NOISE * selector.uniform();
        }

        if best.is_none_or(|(_, lowest)| is_strictly_lower(score, lowest)) {
            best = Some((cell, score));
        }
    }

    best.map(|(cell, _)| cell)
}

/// Whether `score` beats `lowest` by more than accumulated rounding
fn is_strictly_lower(score: f64, lowest: f64) -> bool {
    score < lowest - SCORE_TOLERANCE * lowest.abs().max(1.0)
}

/// Draw one of the cell's remaining variants proportionally to weight
pub fn choose_variant(wave: &Wave, cell: usize, selector: &mut RandomSelector) -> Option<usize> {
    let possibilities = wave.possibilities(cell)?;
    let candidates: Vec<usize> = possibilities.iter().collect();
    let weights: Vec<f64> = candidates
        .iter()
        .map(|&pattern| wave.weights().get(pattern).copied().unwrap_or(0.0))
        .collect();

    let picked = selector.weighted_choice(&weights)?;
    candidates.get(picked).copied()
}
