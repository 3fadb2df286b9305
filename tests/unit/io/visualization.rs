//! Tests for snapshot capture and GIF export

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::BufReader;

    use image::AnimationDecoder;
    use image::codecs::gif::GifDecoder;
    use tilecollapse::AlgorithmError;
    use tilecollapse::io::image::TileImages;
    use tilecollapse::io::snapshot::GridSnapshot;
    use tilecollapse::io::visualization::VisualizationCapture;
    use tilecollapse::spatial::grid::Grid;
    use tilecollapse::spatial::tiles::{BaseTile, TileCatalog};

    fn capture(frames: usize) -> VisualizationCapture {
        let catalog = TileCatalog::expand(&[
            BaseTile::new("grass", "X").with_edges(["g"; 4]),
            BaseTile::new("road", "I").with_edges(["r", "g", "r", "g"]),
        ])
        .expect("valid catalog");
        let mut capture = VisualizationCapture::new(TileImages::palette(&catalog, 4), frames);
        let snapshot = GridSnapshot::from_grid(&Grid::initialize(3, 2, catalog.len()));
        for _ in 0..frames {
            capture.record(snapshot.clone());
        }
        capture
    }

    fn gif_frame_count(path: &std::path::Path) -> usize {
        let file = BufReader::new(File::open(path).expect("gif exists"));
        GifDecoder::new(file)
            .expect("valid gif")
            .into_frames()
            .collect_frames()
            .expect("decodable frames")
            .len()
    }

    // Tests recording and clearing track the frame count
    // Verified by leaving old frames in place on clear
    #[test]
    fn test_record_and_clear() {
        let mut capture = capture(3);
        assert_eq!(capture.frame_count(), 3);
        assert_eq!(capture.snapshots().len(), 3);

        capture.clear();
        assert_eq!(capture.frame_count(), 0);
        assert!(capture.snapshots().is_empty());
    }

    // Tests exporting with nothing captured is rejected
    // Verified by writing an empty GIF instead
    #[test]
    fn test_export_without_frames() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("empty.gif");
        let result = capture(0).export_gif(&path, 100);
        assert!(matches!(result, Err(AlgorithmError::InvalidParameter { .. })));
        assert!(!path.exists());
    }

    // Tests slow animations keep every frame plus a held final frame
    // Verified by dropping the held final frame
    #[test]
    fn test_export_keeps_frames_at_slow_delay() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("anim").join("slow.gif");
        capture(3).export_gif(&path, 100).expect("export succeeds");
        assert_eq!(gif_frame_count(&path), 4);
    }

    // Tests fast animations skip frames but keep first and last
    // Verified by skipping the last snapshot
    #[test]
    fn test_export_skips_frames_at_fast_delay() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("fast.gif");
        capture(3).export_gif(&path, 5).expect("export succeeds");
        assert_eq!(gif_frame_count(&path), 3);
    }
}
