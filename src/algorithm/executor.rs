use crate::{
    algorithm::bitset::TileBitset,
    algorithm::propagation::{Propagation, PropagationQueue, PropagationStats},
    algorithm::selection::{RandomSelector, Selection, select_min_entropy},
    io::configuration::MAX_GRID_DIMENSION,
    io::error::{Result, invalid_parameter},
    io::snapshot::GridSnapshot,
    spatial::adjacency::AdjacencyIndex,
    spatial::grid::{Grid, Position},
    spatial::tiles::{TileCatalog, VariantId},
};
use rand::{Rng, rngs::StdRng};

/// Lifecycle of a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Undetermined cells remain and no domain is empty
    Running,
    /// Every cell is collapsed and all neighbours are compatible
    Complete,
    /// Some domain became empty; the run must be re-initialized to retry
    Contradiction,
}

impl SolverState {
    /// Whether no further step can change the grid
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Counters accumulated over a generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Calls to `step` that did work
    pub steps: usize,
    /// Cells committed to a single variant by random choice
    pub collapses: usize,
    /// Cells popped from the propagation queue
    pub propagated_cells: usize,
    /// Candidates removed by propagation
    pub eliminated_candidates: usize,
}

impl GenerationStats {
    fn absorb(&mut self, propagation: PropagationStats) {
        self.propagated_cells += propagation.visited;
        self.eliminated_candidates += propagation.eliminated;
    }
}

/// Wave function collapse solver over a single grid
///
/// Borrows the catalog and adjacency index read-only, so several solvers can
/// share them across threads while each owns its grid and random source.
/// Driven one [`Solver::step`] at a time or with [`Solver::run_to_completion`].
pub struct Solver<'a, R = StdRng> {
    catalog: &'a TileCatalog,
    adjacency: &'a AdjacencyIndex,
    grid: Grid,
    state: SolverState,
    selector: RandomSelector<R>,
    queue: PropagationQueue,
    stats: GenerationStats,
    contradiction: Option<Position>,
    last_collapse: Option<(Position, VariantId)>,
}

impl<'a> Solver<'a, StdRng> {
    /// Create a solver with a seeded standard random source
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions exceed `MAX_GRID_DIMENSION` or the
    /// adjacency index was built from a different catalog
    pub fn with_seed(
        catalog: &'a TileCatalog,
        adjacency: &'a AdjacencyIndex,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<Self> {
        Self::from_selector(catalog, adjacency, width, height, RandomSelector::new(seed))
    }
}

impl<'a, R: Rng> Solver<'a, R> {
    /// Create a solver drawing from the given random source
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions exceed `MAX_GRID_DIMENSION` or the
    /// adjacency index was built from a different catalog
    pub fn new(
        catalog: &'a TileCatalog,
        adjacency: &'a AdjacencyIndex,
        width: usize,
        height: usize,
        rng: R,
    ) -> Result<Self> {
        Self::from_selector(
            catalog,
            adjacency,
            width,
            height,
            RandomSelector::from_rng(rng),
        )
    }

    fn from_selector(
        catalog: &'a TileCatalog,
        adjacency: &'a AdjacencyIndex,
        width: usize,
        height: usize,
        selector: RandomSelector<R>,
    ) -> Result<Self> {
        if adjacency.variant_count() != catalog.len() {
            return Err(invalid_parameter(
                "adjacency",
                &adjacency.variant_count(),
                &format!("index covers a catalog of {} variants", catalog.len()),
            ));
        }
        validate_dimensions(width, height)?;

        Ok(Self {
            catalog,
            adjacency,
            grid: Grid::initialize(width, height, catalog.len()),
            state: SolverState::Running,
            selector,
            queue: PropagationQueue::new(),
            stats: GenerationStats::default(),
            contradiction: None,
            last_collapse: None,
        })
    }

    /// Discard all progress and start over on a fresh grid
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions exceed `MAX_GRID_DIMENSION`
    pub fn initialize(&mut self, width: usize, height: usize) -> Result<()> {
        validate_dimensions(width, height)?;
        self.grid = Grid::initialize(width, height, self.catalog.len());
        self.state = SolverState::Running;
        self.queue.clear();
        self.stats = GenerationStats::default();
        self.contradiction = None;
        self.last_collapse = None;
        Ok(())
    }

    /// Start over on a fresh grid of the current size
    pub fn reset(&mut self) {
        self.grid = Grid::initialize(self.grid.width(), self.grid.height(), self.catalog.len());
        self.state = SolverState::Running;
        self.queue.clear();
        self.stats = GenerationStats::default();
        self.contradiction = None;
        self.last_collapse = None;
    }

    /// Perform one select, collapse and propagate cycle
    ///
    /// Does nothing once the solver is `Complete` or `Contradiction`.
    ///
    /// # Panics
    ///
    /// Panics if the selected cell cannot be collapsed, which means the
    /// solver's own bookkeeping is broken.
    pub fn step(&mut self) -> SolverState {
        if self.state != SolverState::Running {
            return self.state;
        }
        self.stats.steps += 1;

        let position = match select_min_entropy(&self.grid, self.catalog.weights()) {
            Selection::Exhausted => {
                if self.stats.propagated_cells == 0 {
                    // Cells that started collapsed were never checked against each other
                    let positions: Vec<Position> =
                        self.grid.iter().map(|(position, _)| position).collect();
                    for position in positions {
                        self.queue.push(position);
                    }
                    self.propagate();
                } else {
                    self.state = SolverState::Complete;
                    tracing::debug!(steps = self.stats.steps, "grid complete");
                }
                return self.state;
            }
            Selection::Contradiction(position) => {
                self.mark_contradiction(position);
                return self.state;
            }
            Selection::Cell { position, entropy } => {
                tracing::trace!(
                    row = position[0],
                    col = position[1],
                    entropy,
                    "selected cell"
                );
                position
            }
        };

        let variant = self.collapse(position);
        self.stats.collapses += 1;
        self.last_collapse = Some((position, variant));
        tracing::debug!(
            row = position[0],
            col = position[1],
            variant = self.catalog.name(variant).unwrap_or("?"),
            "collapsed cell"
        );

        self.queue.push(position);
        self.propagate();
        self.state
    }

    /// Step until the solver reaches `Complete` or `Contradiction`
    ///
    /// Each productive step collapses one more cell, so this terminates after
    /// at most one step per cell plus one.
    pub fn run_to_completion(&mut self) -> SolverState {
        while self.step() == SolverState::Running {}
        self.state
    }

    /// Restrict a cell to the given variants and propagate the consequences
    ///
    /// Used to pre-seed parts of a design before generation. The domain only
    /// ever shrinks; a restriction that empties it ends the run in
    /// `Contradiction`. Has no effect once the solver has finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the grid or the bitset was
    /// sized for a different catalog
    pub fn constrain(&mut self, position: Position, allowed: &TileBitset) -> Result<SolverState> {
        if !self.grid.contains(position) {
            return Err(invalid_parameter(
                "position",
                &format!("{position:?}"),
                &format!(
                    "outside the {}x{} grid",
                    self.grid.width(),
                    self.grid.height()
                ),
            ));
        }
        if allowed.capacity() != self.catalog.len() {
            return Err(invalid_parameter(
                "allowed",
                &allowed.capacity(),
                &format!("bitset must cover {} variants", self.catalog.len()),
            ));
        }
        if self.state != SolverState::Running {
            return Ok(self.state);
        }

        let removed = self
            .grid
            .get_mut(position)
            .map_or(0, |cell| cell.restrict(allowed));
        if removed == 0 {
            return Ok(self.state);
        }
        self.stats.eliminated_candidates += removed;

        if self.grid.get(position).is_some_and(|cell| cell.is_contradictory()) {
            self.mark_contradiction(position);
            return Ok(self.state);
        }

        self.queue.push(position);
        self.propagate();
        Ok(self.state)
    }

    /// Restrict a cell to a single variant named in the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown or the position is outside
    /// the grid
    pub fn constrain_named(&mut self, position: Position, name: &str) -> Result<SolverState> {
        let variant = self.catalog.id_of(name)?;
        let allowed = TileBitset::singleton(self.catalog.len(), variant);
        self.constrain(position, &allowed)
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// The grid being generated
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consume the solver and keep its grid
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// The catalog this solver draws variants from
    pub const fn catalog(&self) -> &'a TileCatalog {
        self.catalog
    }

    /// The adjacency index constraining neighbours
    pub const fn adjacency(&self) -> &'a AdjacencyIndex {
        self.adjacency
    }

    /// Counters for the current run
    pub const fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// Cell whose domain emptied, once in `Contradiction`
    pub const fn contradiction(&self) -> Option<Position> {
        self.contradiction
    }

    /// Most recent random commitment
    pub const fn last_collapse(&self) -> Option<(Position, VariantId)> {
        self.last_collapse
    }

    /// Renderer-facing view of every cell
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::from_grid(&self.grid)
    }

    #[allow(clippy::panic)]
    fn collapse(&mut self, position: Position) -> VariantId {
        let catalog = self.catalog;
        let weights = catalog.weights();
        let variant_count = catalog.len();

        let Some(cell) = self.grid.get_mut(position) else {
            panic!("selected position {position:?} is outside the grid");
        };
        if cell.is_contradictory() {
            panic!("attempted to collapse cell {position:?} with an empty domain");
        }
        let Some(variant) = self.selector.choose_variant(cell.domain(), weights) else {
            panic!("cell {position:?} has no variant with positive weight");
        };

        cell.restrict(&TileBitset::singleton(variant_count, variant));
        variant
    }

    fn propagate(&mut self) {
        let mut propagation = PropagationStats::default();
        let outcome = self
            .queue
            .propagate(&mut self.grid, self.adjacency, &mut propagation);
        self.stats.absorb(propagation);

        match outcome {
            Propagation::Contradiction(position) => self.mark_contradiction(position),
            Propagation::Stable => {
                tracing::trace!(
                    visited = propagation.visited,
                    eliminated = propagation.eliminated,
                    "propagation stable"
                );
                if self.grid.undetermined_count() == 0 {
                    self.state = SolverState::Complete;
                    tracing::debug!(steps = self.stats.steps, "grid complete");
                }
            }
        }
    }

    fn mark_contradiction(&mut self, position: Position) {
        self.state = SolverState::Contradiction;
        self.contradiction = Some(position);
        tracing::warn!(
            row = position[0],
            col = position[1],
            steps = self.stats.steps,
            "contradiction: cell domain is empty"
        );
    }
}

fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    for (parameter, value) in [("width", width), ("height", height)] {
        if value > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                parameter,
                &value,
                &format!("must not exceed {MAX_GRID_DIMENSION}"),
            ));
        }
    }
    Ok(())
}
