//! Frame capture and GIF generation for watching a grid collapse

use std::path::Path;

use image::{Delay, Frame};

use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{AlgorithmError, Result, file_system_error, invalid_parameter};
use crate::io::image::{TileImages, render_snapshot};
use crate::io::snapshot::GridSnapshot;

/// Captures grid snapshots for visualization
///
/// Records the grid after each solver step so the generation process can be
/// replayed as an animation once the run is over.
pub struct VisualizationCapture {
    snapshots: Vec<GridSnapshot>,
    images: TileImages,
}

impl VisualizationCapture {
    /// Create an empty capture that will draw frames with `images`
    pub fn new(images: TileImages, expected_steps: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(expected_steps),
            images,
        }
    }

    /// Append the state of the grid after a step
    pub fn record(&mut self, snapshot: GridSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Drop every recorded frame, e.g. before a retry
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// All recorded snapshots in order
    pub fn snapshots(&self) -> &[GridSnapshot] {
        &self.snapshots
    }

    /// Number of recorded snapshots
    pub const fn frame_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// If `frame_delay_ms` is below `VIEWER_MIN_FRAME_DELAY_MS`, only every
    /// n-th frame is kept and shown for the minimum delay, preserving the
    /// apparent speed. The first and last snapshots are always included and
    /// the last is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No snapshots were captured
    /// - A snapshot cannot be rendered
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.snapshots.is_empty() {
            return Err(invalid_parameter(
                "snapshots",
                &0,
                &"nothing was captured for visualization",
            ));
        }

        let frames = self.generate_frames(frame_delay_ms)?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| file_system_error(parent, "create directory", e))?;
        }

        let file = std::fs::File::create(output_path)
            .map_err(|e| file_system_error(output_path, "create file", e))?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        tracing::debug!(
            path = %output_path.display(),
            snapshots = self.snapshots.len(),
            "exported visualization"
        );
        Ok(())
    }

    fn generate_frames(&self, frame_delay_ms: u32) -> Result<Vec<Frame>> {
        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let last = self.snapshots.len() - 1;
        let mut frames = Vec::new();
        for (index, snapshot) in self.snapshots.iter().enumerate() {
            if index % skip_factor == 0 || index == last {
                frames.push(self.render_frame(snapshot, effective_delay_ms)?);
            }
        }

        // Final frame displays longer for better visibility
        if let Some(final_image) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                final_image,
                0,
                0,
                Delay::from_numer_denom_ms(effective_delay_ms * 25, 1),
            ));
        }

        Ok(frames)
    }

    fn render_frame(&self, snapshot: &GridSnapshot, delay_ms: u32) -> Result<Frame> {
        let image = render_snapshot(snapshot, &self.images)?;
        Ok(Frame::from_parts(
            image,
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms, 1),
        ))
    }
}
