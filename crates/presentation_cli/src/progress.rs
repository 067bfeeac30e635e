//! Terminal progress bar for the scan

use application::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress sink rendering an indicatif bar on stderr
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl std::fmt::Debug for TerminalProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalProgress").finish_non_exhaustive()
    }
}

impl TerminalProgress {
    /// Create a bar sized for `total` records
    #[must_use]
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} prompts ({eta})",
        )
        .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("=> "));
        bar.set_style(style);
        Self { bar }
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for TerminalProgress {
    fn record_completed(&self, completed: usize, _total: usize) {
        self.bar.set_position(completed as u64);
    }
}
