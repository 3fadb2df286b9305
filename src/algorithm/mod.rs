/// Fixed-size bitset used for cell domains and adjacency entries
pub mod bitset;
/// Solver state machine driving selection, collapse and propagation
pub mod executor;
/// Queue-driven constraint propagation
pub mod propagation;
/// Restart-based recovery from contradictions
pub mod retry;
/// Minimum-entropy cell selection and weighted variant choice
pub mod selection;
