/// Command-line interface and generation orchestration
pub mod cli;
/// Generation constants and CLI defaults
pub mod configuration;
/// Error types and result aliases
pub mod error;
/// Tile images and PNG export
pub mod image;
/// Progress bars for generation attempts
pub mod progress;
/// Renderer-facing grid snapshots and text output
pub mod snapshot;
/// XML tile set loading
pub mod tileset;
/// Animated GIF capture of the collapse
pub mod visualization;
