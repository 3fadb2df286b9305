//! Wave function collapse over edge-labelled tiles
//!
//! Base tiles with a symmetry class and four edge labels are expanded into
//! rotation variants, and a grid of cells is collapsed one minimum-entropy
//! cell at a time while propagation keeps every neighbour's edges matching.

#![forbid(unsafe_code)]

/// Solver core: candidate sets, selection, propagation and retry
pub mod algorithm;
/// Placement statistics and adjacency checks of generated grids
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Entropy and weighted sampling utilities
pub mod math;
/// Sides, tile catalog, adjacency index and grid
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
