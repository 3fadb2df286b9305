//! Consistency checks on finished grids

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::adjacency::AdjacencyIndex;
use crate::spatial::grid::{Grid, Position};
use crate::spatial::side::Side;
use crate::spatial::tiles::{TileCatalog, VariantId};

/// Two collapsed neighbours whose edges do not match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyViolation {
    /// The cell on the near side
    pub position: Position,
    /// Its variant
    pub variant: VariantId,
    /// Side of `position` facing the neighbour
    pub side: Side,
    /// The neighbouring cell
    pub neighbor: Position,
    /// The neighbour's variant
    pub neighbor_variant: VariantId,
}

/// List every incompatible pair of collapsed neighbours
///
/// Each pair is reported once, from the cell on its top or left. Cells that
/// are not collapsed are skipped, so a partially solved grid only reports
/// violations among its committed cells.
pub fn find_adjacency_violations(
    grid: &Grid,
    adjacency: &AdjacencyIndex,
) -> Vec<AdjacencyViolation> {
    let mut violations = Vec::new();

    for (position, cell) in grid.iter() {
        let Some(variant) = cell.collapsed_variant() else {
            continue;
        };

        for side in [Side::Right, Side::Bottom] {
            let Some(neighbor) = grid.neighbor(position, side) else {
                continue;
            };
            let Some(neighbor_variant) = grid.get(neighbor).and_then(|c| c.collapsed_variant())
            else {
                continue;
            };

            if !adjacency.is_allowed(variant, side, neighbor_variant) {
                violations.push(AdjacencyViolation {
                    position,
                    variant,
                    side,
                    neighbor,
                    neighbor_variant,
                });
            }
        }
    }

    violations
}

/// Fail if a grid holds any incompatible pair of collapsed neighbours
///
/// # Errors
///
/// Returns `AdjacencyViolation` naming the first mismatched pair in row-major
/// order together with the total number of mismatches
pub fn verify_adjacency(
    grid: &Grid,
    adjacency: &AdjacencyIndex,
    catalog: &TileCatalog,
) -> Result<()> {
    let violations = find_adjacency_violations(grid, adjacency);
    let Some(first) = violations.first() else {
        return Ok(());
    };

    let name = |id: VariantId| catalog.name(id).map_or_else(|| format!("#{id}"), str::to_string);
    Err(AlgorithmError::AdjacencyViolation {
        position: first.position,
        side: first.side,
        variant: name(first.variant),
        neighbor: name(first.neighbor_variant),
        count: violations.len(),
    })
}
