//! Command-line interface for generating a grid from an XML tile set

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;

use crate::algorithm::executor::Solver;
use crate::algorithm::retry::{GenerationObserver, RetryPolicy, generate_observed};
use crate::analysis::statistics::PlacementStatistics;
use crate::analysis::validation::verify_adjacency;
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED, DEFAULT_TILE_PIXELS, DEFAULT_WIDTH,
    GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX,
};
use crate::io::error::{AlgorithmError, Result};
use crate::io::image::{TileImages, export_snapshot_as_png};
use crate::io::progress::ProgressManager;
use crate::io::snapshot::GridSnapshot;
use crate::io::tileset::load_tileset;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::adjacency::AdjacencyIndex;
use crate::spatial::grid::Position;
use crate::spatial::tiles::TileCatalog;

#[derive(Parser)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Generate tile grids with wave function collapse"
)]
/// Command-line arguments for the tile grid generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// XML tile set describing tiles, symmetry and edge labels
    #[arg(value_name = "TILESET")]
    pub tileset: PathBuf,

    /// Directory holding one `<tile name>.png` per tile
    #[arg(short = 'i', long, value_name = "DIR")]
    pub images: Option<PathBuf>,

    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Attempts before giving up (0 retries forever)
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: usize,

    /// Output PNG path (defaults to `<tileset>_generated.png`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Tile size in pixels when no images are given
    #[arg(long, default_value_t = DEFAULT_TILE_PIXELS)]
    pub tile_pixels: u32,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Print the grid as text to standard output
    #[arg(short, long)]
    pub text: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Fix a cell to a variant before every attempt, e.g. `0,3=corner 90`
    #[arg(short, long = "pin", value_name = "ROW,COL=VARIANT", value_parser = parse_pin)]
    pub pins: Vec<Pin>,
}

/// A cell fixed to one named variant before generation starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    /// Row and column of the cell
    pub position: Position,
    /// Variant name as listed in the catalog
    pub variant: String,
}

/// Parse a `ROW,COL=VARIANT` pin
///
/// # Errors
///
/// Returns a description of the problem if the text is not of that form
pub fn parse_pin(text: &str) -> std::result::Result<Pin, String> {
    let (cell, variant) = text
        .split_once('=')
        .ok_or_else(|| format!("expected ROW,COL=VARIANT, got '{text}'"))?;
    let (row, col) = cell
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL before '=', got '{cell}'"))?;
    let coordinate = |value: &str| {
        value
            .trim()
            .parse::<usize>()
            .map_err(|err| format!("bad coordinate '{value}': {err}"))
    };

    let variant = variant.trim();
    if variant.is_empty() {
        return Err(format!("pin '{text}' names no variant"));
    }

    Ok(Pin {
        position: [coordinate(row)?, coordinate(col)?],
        variant: variant.to_string(),
    })
}

impl Cli {
    /// Retry policy selected by `--attempts`
    pub const fn retry_policy(&self) -> RetryPolicy {
        match self.attempts {
            0 => RetryPolicy::Forever,
            n => RetryPolicy::Attempts(n),
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Where the PNG is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| sibling_path(&self.tileset, &format!("{OUTPUT_SUFFIX}.png")))
    }

    /// Where the animation is written
    pub fn visualization_path(&self) -> PathBuf {
        sibling_path(&self.output_path(), "_visualization.gif")
    }
}

// `<dir>/<stem><suffix>` next to `path`
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}", stem.to_string_lossy());

    if let Some(parent) = path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Forwards solver progress to the terminal and the animation capture
struct RunObserver<'a> {
    pins: &'a [Pin],
    progress: Option<ProgressManager>,
    visualization: Option<VisualizationCapture>,
    last_snapshot: Option<GridSnapshot>,
}

impl GenerationObserver for RunObserver<'_> {
    fn prepare_attempt(&mut self, solver: &mut Solver<'_>) -> Result<()> {
        for pin in self.pins {
            solver.constrain_named(pin.position, &pin.variant)?;
        }
        if let Some([row, col]) = solver.contradiction() {
            tracing::warn!(row, col, "pinned cells contradict before any collapse");
        }
        Ok(())
    }

    fn attempt_started(&mut self, attempt: usize, seed: u64) {
        if let Some(ref progress) = self.progress {
            progress.start_attempt(attempt, seed);
        }
        if let Some(ref mut visualization) = self.visualization {
            visualization.clear();
        }
    }

    fn step_completed(&mut self, solver: &Solver<'_>) {
        if let Some(ref progress) = self.progress {
            progress.update(solver.grid().collapsed_count());
        }
        if let Some(ref mut visualization) = self.visualization {
            visualization.record(solver.snapshot());
        }
    }

    fn attempt_finished(&mut self, _attempt: usize, solver: &Solver<'_>) {
        if let (Some(progress), Some([row, col])) = (&self.progress, solver.contradiction()) {
            progress.contradiction(row, col);
        }
        self.last_snapshot = Some(solver.snapshot());
    }
}

/// Loads a tile set, generates a grid and writes the results
pub struct GenerationRunner {
    cli: Cli,
}

impl GenerationRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run generation according to CLI arguments
    ///
    /// When every attempt fails, the last partial grid is still written so
    /// the contradiction can be inspected.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile set cannot be loaded or is invalid
    /// - Tile images cannot be loaded
    /// - A pin names an unknown variant or a cell outside the grid
    /// - Every attempt ends in a contradiction
    /// - The finished grid breaks an adjacency rule
    /// - An output file cannot be written
    // Allow print for user feedback and the text rendering
    #[allow(clippy::print_stderr, clippy::print_stdout)]
    pub fn run(&self) -> Result<()> {
        let start_time = Instant::now();

        let base_tiles = load_tileset(&self.cli.tileset)?;
        let catalog = TileCatalog::expand(&base_tiles)?;
        let adjacency = AdjacencyIndex::build(&catalog);

        let images = match self.cli.images {
            Some(ref dir) => TileImages::load(dir, &catalog)?,
            None => TileImages::palette(&catalog, self.cli.tile_pixels),
        };

        let cell_count = self.cli.width.saturating_mul(self.cli.height);
        let mut observer = RunObserver {
            pins: &self.cli.pins,
            progress: self.cli.should_show_progress().then(|| {
                ProgressManager::new(
                    cell_count,
                    match self.cli.retry_policy() {
                        RetryPolicy::Forever => None,
                        RetryPolicy::Attempts(n) => Some(n),
                    },
                )
            }),
            visualization: self
                .cli
                .visualize
                .then(|| VisualizationCapture::new(images.clone(), cell_count)),
            last_snapshot: None,
        };

        let outcome = generate_observed(
            &catalog,
            &adjacency,
            self.cli.width,
            self.cli.height,
            self.cli.seed,
            self.cli.retry_policy(),
            &mut observer,
        );

        if let Some(ref progress) = observer.progress {
            progress.finish();
        }

        let output_path = self.cli.output_path();
        let generation = match outcome {
            Ok(generation) => generation,
            Err(error @ AlgorithmError::AttemptsExhausted { .. }) => {
                if let Some(ref snapshot) = observer.last_snapshot {
                    export_snapshot_as_png(snapshot, &images, &output_path)?;
                    if !self.cli.quiet {
                        eprintln!("Wrote last failed attempt to {}", output_path.display());
                    }
                }
                return Err(error);
            }
            Err(error) => return Err(error),
        };

        verify_adjacency(&generation.grid, &adjacency, &catalog).inspect_err(|error| {
            tracing::error!(%error, "generated grid breaks adjacency rules");
        })?;

        let snapshot = GridSnapshot::from_grid(&generation.grid);
        export_snapshot_as_png(&snapshot, &images, &output_path)?;

        if let Some(ref visualization) = observer.visualization {
            visualization.export_gif(&self.cli.visualization_path(), GIF_FRAME_DELAY_MS)?;
        }

        if self.cli.text {
            print!("{}", snapshot.to_text(&catalog));
        }

        if !self.cli.quiet {
            let statistics = PlacementStatistics::from_grid(&generation.grid, &catalog);
            eprintln!(
                "Generated {}x{} grid in {} attempt(s) (seed {}, {} collapses, {:.2?})",
                self.cli.width,
                self.cli.height,
                generation.attempts,
                generation.seed,
                generation.stats.collapses,
                start_time.elapsed()
            );
            for share in &statistics.bases {
                eprintln!(
                    "  {:<16} {:>5}  observed {:>5.1}%  expected {:>5.1}%",
                    share.name,
                    share.count,
                    share.observed * 100.0,
                    share.expected * 100.0
                );
            }
            eprintln!("Wrote {}", output_path.display());
        }

        Ok(())
    }
}
