//! Analysis of generated grids

/// Observed versus expected placement shares
pub mod statistics;
/// Adjacency verification of collapsed neighbours
pub mod validation;
