//! Restart-based recovery from contradictions
//!
//! The solver never backtracks. When a run ends in a contradiction the grid is
//! thrown away and generation starts again with the next seed.

use crate::{
    algorithm::executor::{GenerationStats, Solver, SolverState},
    io::error::{AlgorithmError, Result},
    spatial::adjacency::AdjacencyIndex,
    spatial::grid::Grid,
    spatial::tiles::TileCatalog,
};

/// How many contradictions to tolerate before giving up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Keep restarting until a run completes
    Forever,
    /// Make at most this many attempts in total
    Attempts(usize),
}

impl RetryPolicy {
    /// Whether another attempt is allowed after `made` attempts
    pub const fn allows(self, made: usize) -> bool {
        match self {
            Self::Forever => true,
            Self::Attempts(limit) => made < limit,
        }
    }
}

/// A completed grid and how it was reached
#[derive(Debug, Clone)]
pub struct Generation {
    /// The fully collapsed grid
    pub grid: Grid,
    /// Number of attempts made, including the successful one
    pub attempts: usize,
    /// Seed of the successful attempt
    pub seed: u64,
    /// Counters from the successful attempt
    pub stats: GenerationStats,
}

/// Seed used for the given 0-based attempt
pub const fn attempt_seed(seed: u64, attempt: usize) -> u64 {
    seed.wrapping_add(attempt as u64)
}

/// Hooks into a multi-attempt generation run
///
/// Every method has an empty default, so implementors pick what they need.
pub trait GenerationObserver {
    /// Adjust a fresh solver before its first step, e.g. to pin cells
    ///
    /// Runs once per attempt, so pinned cells hold across restarts.
    ///
    /// # Errors
    ///
    /// An error aborts the whole generation without further attempts
    fn prepare_attempt(&mut self, _solver: &mut Solver<'_>) -> Result<()> {
        Ok(())
    }

    /// A fresh solver is about to run with `seed`
    fn attempt_started(&mut self, _attempt: usize, _seed: u64) {}

    /// The solver finished one step
    fn step_completed(&mut self, _solver: &Solver<'_>) {}

    /// The attempt ended in `Complete` or `Contradiction`
    fn attempt_finished(&mut self, _attempt: usize, _solver: &Solver<'_>) {}
}

impl GenerationObserver for () {}

/// Generate a complete grid, restarting with a fresh seed after contradictions
///
/// Attempt `k` (0-based) is seeded with `seed + k`, so a run is reproducible
/// from its first seed alone.
///
/// # Errors
///
/// Returns an error if:
/// - The dimensions are invalid for a solver
/// - Every attempt allowed by the policy ends in a contradiction
pub fn generate(
    catalog: &TileCatalog,
    adjacency: &AdjacencyIndex,
    width: usize,
    height: usize,
    seed: u64,
    policy: RetryPolicy,
) -> Result<Generation> {
    generate_observed(catalog, adjacency, width, height, seed, policy, &mut ())
}

/// Like [`generate`], reporting attempts and steps to `observer`
///
/// # Errors
///
/// Returns an error if:
/// - The dimensions are invalid for a solver
/// - The observer fails to prepare an attempt
/// - Every attempt allowed by the policy ends in a contradiction
pub fn generate_observed<O: GenerationObserver + ?Sized>(
    catalog: &TileCatalog,
    adjacency: &AdjacencyIndex,
    width: usize,
    height: usize,
    seed: u64,
    policy: RetryPolicy,
    observer: &mut O,
) -> Result<Generation> {
    let mut attempt = 0;
    while policy.allows(attempt) {
        let attempt_seed = attempt_seed(seed, attempt);
        let mut solver = Solver::with_seed(catalog, adjacency, width, height, attempt_seed)?;
        observer.prepare_attempt(&mut solver)?;
        observer.attempt_started(attempt, attempt_seed);

        while solver.step() == SolverState::Running {
            observer.step_completed(&solver);
        }
        observer.step_completed(&solver);
        observer.attempt_finished(attempt, &solver);
        attempt += 1;

        if solver.state() == SolverState::Complete {
            tracing::info!(attempts = attempt, seed = attempt_seed, "generation complete");
            let stats = solver.stats();
            return Ok(Generation {
                grid: solver.into_grid(),
                attempts: attempt,
                seed: attempt_seed,
                stats,
            });
        }

        tracing::info!(
            attempt,
            seed = attempt_seed,
            "contradiction, restarting with next seed"
        );
    }

    Err(AlgorithmError::AttemptsExhausted { attempts: attempt })
}
