use crate::{
    algorithm::bitset::TileBitset,
    math::probability::{cumulative_distribution, sample_cumulative, weighted_entropy},
    spatial::grid::{Grid, Position},
    spatial::tiles::VariantId,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Outcome of scanning the grid for the next cell to collapse
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// Undetermined cell with the lowest entropy, and that entropy
    Cell {
        /// Selected position
        position: Position,
        /// Entropy heuristic of its domain
        entropy: f64,
    },
    /// A cell with an empty domain was found
    Contradiction(Position),
    /// Every cell is collapsed
    Exhausted,
}

/// Entropy heuristic of a domain using catalog weights directly
pub fn cell_entropy(domain: &TileBitset, weights: &[f64]) -> f64 {
    weighted_entropy(
        domain
            .iter()
            .map(|variant| weights.get(variant).copied().unwrap_or(0.0)),
    )
}

/// Find the undetermined cell with strictly minimum entropy
///
/// Cells are scanned in row-major order; on ties the first one scanned wins.
/// A contradictory cell short-circuits the scan.
pub fn select_min_entropy(grid: &Grid, weights: &[f64]) -> Selection {
    let mut best: Option<(Position, f64)> = None;

    for (position, cell) in grid.iter() {
        if cell.is_contradictory() {
            return Selection::Contradiction(position);
        }
        if !cell.is_undetermined() {
            continue;
        }

        let entropy = cell_entropy(cell.domain(), weights);
        if best.is_none_or(|(_, lowest)| entropy < lowest) {
            best = Some((position, entropy));
        }
    }

    best.map_or(Selection::Exhausted, |(position, entropy)| Selection::Cell {
        position,
        entropy,
    })
}

/// Seeded or injected random source for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector<R = StdRng> {
    rng: R,
}

impl RandomSelector<StdRng> {
    /// Create a deterministic selector from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomSelector<R> {
    /// Wrap an existing random source
    pub const fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Weighted random selection of an index
    ///
    /// Draws a uniform value in `[0, 1)` and returns the first index whose
    /// normalised cumulative weight exceeds it. `None` if no weight is positive.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        let cumulative = cumulative_distribution(weights);
        if cumulative.is_empty() {
            return None;
        }
        let draw = self.rng.random::<f64>();
        sample_cumulative(&cumulative, draw)
    }

    /// Draw one variant of a domain with probability proportional to its weight
    ///
    /// Variants are visited in ascending id order so a fixed seed always
    /// produces the same choice.
    pub fn choose_variant(&mut self, domain: &TileBitset, weights: &[f64]) -> Option<VariantId> {
        let candidates = domain.to_vec();
        let candidate_weights: Vec<f64> = candidates
            .iter()
            .map(|&variant| weights.get(variant).copied().unwrap_or(0.0))
            .collect();

        self.weighted_choice(&candidate_weights)
            .and_then(|index| candidates.get(index).copied())
    }
}
