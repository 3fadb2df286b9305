use crate::{
    spatial::adjacency::AdjacencyIndex,
    spatial::grid::{Grid, Position},
};
use std::collections::VecDeque;

/// Result of draining the propagation queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// No further removal is possible
    Stable,
    /// A cell's domain became empty
    Contradiction(Position),
}

/// Counters gathered while propagating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Cells popped from the queue
    pub visited: usize,
    /// Candidates removed from neighbour domains
    pub eliminated: usize,
}

/// FIFO queue of positions whose domains changed and must be re-examined
///
/// The queue holds positions only; each pop re-resolves the position against
/// the grid, so no reference into the grid outlives a single access.
#[derive(Debug, Default)]
pub struct PropagationQueue {
    pending: VecDeque<Position>,
}

impl PropagationQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Queue a position for propagation
    pub fn push(&mut self, position: Position) {
        self.pending.push_back(position);
    }

    /// Take the oldest queued position
    pub fn pop(&mut self) -> Option<Position> {
        self.pending.pop_front()
    }

    /// Number of queued positions
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every queued position
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Drain the queue, removing unsupported variants from neighbours
    ///
    /// For each popped cell C and each in-bounds neighbour N on side `s`, a
    /// variant survives in N only if some variant of C allows it on `s`. Any
    /// neighbour that loses at least one variant is queued again, since a
    /// partial shrink can still tighten cells further away. Stops at the
    /// first empty domain and leaves the remaining queue cleared.
    pub fn propagate(
        &mut self,
        grid: &mut Grid,
        adjacency: &AdjacencyIndex,
        stats: &mut PropagationStats,
    ) -> Propagation {
        while let Some(position) = self.pop() {
            stats.visited += 1;

            let Some(domain) = grid.get(position).map(|cell| cell.domain().clone()) else {
                continue;
            };
            let neighbors: Vec<_> = grid.neighbors(position).collect();

            for (side, neighbor) in neighbors {
                let support = adjacency.supported_by(&domain, side);
                let Some(cell) = grid.get_mut(neighbor) else {
                    continue;
                };

                let removed = cell.restrict(&support);
                if removed == 0 {
                    continue;
                }
                stats.eliminated += removed;

                if cell.is_contradictory() {
                    self.clear();
                    return Propagation::Contradiction(neighbor);
                }
                self.push(neighbor);
            }
        }

        Propagation::Stable
    }
}
