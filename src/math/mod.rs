//! Mathematical utilities for the algorithm

/// Entropy heuristic and weighted sampling distributions
pub mod probability;
