//! Spatial data structures and tile definitions
//!
//! This module contains spatial-related functionality including:
//! - Tile sides and their rotation
//! - Tile definitions and rotation expansion
//! - Adjacency rules derived from edge labels
//! - Grid and cell domain state

/// Compatibility rules derived from edge labels
pub mod adjacency;
/// Grid and cell domain state
pub mod grid;
/// Tile sides and their cyclic ordering
pub mod side;
/// Tile definitions and rotation expansion
pub mod tiles;

pub use grid::Grid;
