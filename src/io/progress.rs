//! Terminal progress display for generation attempts

use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::io::configuration::PROGRESS_BAR_WIDTH;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows how many cells of the current attempt are collapsed
///
/// One bar is reused across attempts; its prefix names the attempt and the
/// seed it runs with.
pub struct ProgressManager {
    bar: ProgressBar,
    max_attempts: Option<usize>,
}

impl ProgressManager {
    /// Create a bar for a grid of `cell_count` cells
    pub fn new(cell_count: usize, max_attempts: Option<usize>) -> Self {
        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar, max_attempts }
    }

    /// Reset the bar for a new attempt
    pub fn start_attempt(&self, attempt: usize, seed: u64) {
        let label = self.max_attempts.map_or_else(
            || format!("attempt {}", attempt + 1),
            |max| format!("attempt {}/{max}", attempt + 1),
        );
        self.bar.set_prefix(label);
        self.bar.set_message(format!("seed {seed}"));
        self.bar.set_position(0);
    }

    /// Report how many cells are collapsed so far
    pub fn update(&self, collapsed: usize) {
        self.bar.set_position(collapsed as u64);
    }

    /// Note that the current attempt hit a contradiction
    pub fn contradiction(&self, row: usize, col: usize) {
        self.bar.set_message(format!("contradiction at ({row}, {col})"));
    }

    /// Clean up the progress display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
