//! Tests for the attempt progress display

#[cfg(test)]
mod tests {
    use tilecollapse::io::progress::ProgressManager;

    // Tests a bounded run can be driven through every display call
    // Verified by panicking on positions past the cell count
    #[test]
    fn test_bounded_attempts() {
        let progress = ProgressManager::new(9, Some(3));
        progress.start_attempt(0, 42);
        progress.update(4);
        progress.contradiction(1, 2);
        progress.start_attempt(1, 43);
        progress.update(9);
        progress.finish();
    }

    // Tests unbounded retries and empty grids are displayed
    // Verified by dividing by the cell count
    #[test]
    fn test_unbounded_empty_grid() {
        let progress = ProgressManager::new(0, None);
        progress.start_attempt(5, 0);
        progress.update(0);
        progress.finish();
    }
}
