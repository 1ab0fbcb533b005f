//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for corpus loading and generation
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize progress bar for corpus files
    pub fn init_files(&mut self, total_files: u64) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total_files);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}")
        {
            pb.set_style(style.progress_chars("##-"));
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a completed file
    pub fn file_completed(&self, filename: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Read: {filename}"));
            pb.inc(1);
        }
    }

    /// Switch to a spinner while rhymes are resolved and lines walked
    pub fn start_generation(&mut self, scheme: &str) {
        if self.quiet {
            return;
        }
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_and_clear();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Generating '{scheme}'"));
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_has_no_bar() {
        let mut reporter = ProgressReporter::new(true);
        reporter.init_files(3);
        reporter.file_completed("ode.txt");
        reporter.start_generation("aabb");
        reporter.finish();
        assert!(reporter.progress_bar.is_none());
    }

    #[test]
    fn test_generation_replaces_file_bar() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init_files(1);
        reporter.file_completed("ode.txt");
        reporter.start_generation("abab");
        assert_eq!(
            reporter.progress_bar.as_ref().map(|pb| pb.length()),
            Some(None)
        );
        reporter.finish();
    }
}
