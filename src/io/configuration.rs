//! Generation constants and runtime configuration defaults

/// Weight given to tiles that do not declare one
pub const DEFAULT_TILE_WEIGHT: f64 = 1.0;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid width or height
pub const MAX_GRID_DIMENSION: usize = 1_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 16;

/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 16;

/// Default number of generation attempts before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Side length in pixels of palette tiles when no tile images are given
pub const DEFAULT_TILE_PIXELS: u32 = 16;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_generated";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;

/// Fill colour for cells whose domain is empty
pub const CONTRADICTION_COLOR: [u8; 4] = [255, 0, 255, 255];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
