//! Error types for tile set construction, loading and export

use std::fmt;
use std::path::PathBuf;

use crate::spatial::side::Side;

/// Main error type for all tile set and generation operations
///
/// A contradiction reached while solving is not an error. It is reported as
/// [`crate::algorithm::executor::SolverState::Contradiction`] and recovered from
/// by re-initializing the solver.
#[derive(Debug)]
pub enum AlgorithmError {
    /// A tile declared a symmetry class outside `I`, `L`, `T`, `X`
    UnknownSymmetryClass {
        /// Name of the offending tile
        tile: String,
        /// The class as written
        class: String,
    },

    /// A side had no edge label, even after inheriting from symmetric sides
    MissingEdgeLabel {
        /// Name of the offending tile
        tile: String,
        /// First side without a label
        side: Side,
    },

    /// Tile weight is not a finite positive number
    InvalidWeight {
        /// Name of the offending tile
        tile: String,
        /// The weight as declared
        weight: f64,
    },

    /// Two tiles (or generated rotation variants) share a name
    DuplicateTile {
        /// The colliding name
        name: String,
    },

    /// The tile set contains no tiles
    EmptyCatalog,

    /// A tile name lookup failed
    UnknownTile {
        /// The name that was looked up
        name: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The tile set file could not be parsed
    TilesetParse {
        /// Path to the tile set file
        path: PathBuf,
        /// Description of the problem
        reason: String,
    },

    /// Failed to load a tile image
    TileImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Every generation attempt ended in a contradiction
    AttemptsExhausted {
        /// Number of attempts made
        attempts: usize,
    },

    /// A finished grid holds two neighbours whose facing edges differ
    AdjacencyViolation {
        /// Row and column of the cell on the near side
        position: [usize; 2],
        /// Side of that cell facing the neighbour
        side: Side,
        /// Variant placed at `position`
        variant: String,
        /// Variant placed on the neighbouring cell
        neighbor: String,
        /// Total number of mismatched pairs in the grid
        count: usize,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSymmetryClass { tile, class } => {
                write!(f, "Tile '{tile}' has unknown symmetry class '{class}'")
            }
            Self::MissingEdgeLabel { tile, side } => {
                write!(f, "Tile '{tile}' has no edge label for side '{side}'")
            }
            Self::InvalidWeight { tile, weight } => {
                write!(f, "Tile '{tile}' has invalid weight {weight} (must be positive)")
            }
            Self::DuplicateTile { name } => write!(f, "Duplicate tile name '{name}'"),
            Self::EmptyCatalog => write!(f, "Tile set contains no tiles"),
            Self::UnknownTile { name } => write!(f, "Unknown tile '{name}'"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::TilesetParse { path, reason } => {
                write!(f, "Failed to parse tile set '{}': {reason}", path.display())
            }
            Self::TileImageLoad { path, source } => {
                write!(f, "Failed to load tile image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::AttemptsExhausted { attempts } => {
                write!(
                    f,
                    "Generation ended in a contradiction on all {attempts} attempts"
                )
            }
            Self::AdjacencyViolation {
                position: [row, col],
                side,
                variant,
                neighbor,
                count,
            } => {
                write!(
                    f,
                    "Generated grid breaks {count} adjacency rule(s), first at ({row}, {col}): \
                     '{variant}' cannot have '{neighbor}' on its {side}"
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TileImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for an operation on a path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> AlgorithmError {
    AlgorithmError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
