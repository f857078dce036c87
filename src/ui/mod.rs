//! UI/Progress presentation layer
//!
//! This module handles progress reporting while packages are built and uploaded.
//! All progress reporting goes through the [`ProgressReporter`] trait so tests and
//! non-interactive runs can swap in the silent implementation.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter trait for the publish phase
pub trait ProgressReporter {
    /// Show which package is being worked on
    fn start_package(&mut self, name: &str, current: usize, total: usize);

    /// Describe the step running for the current package
    fn step(&mut self, message: &str);

    /// Mark the current package done
    fn finish_package(&mut self);

    /// Finish all progress
    fn finish(&mut self);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Interactive progress reporter with a visual progress bar
pub struct InteractiveProgressReporter {
    package_pb: ProgressBar,
    current: String,
}

impl InteractiveProgressReporter {
    /// Create a new interactive progress reporter with total package count
    pub fn new(total_packages: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let package_pb = ProgressBar::new(total_packages);
        package_pb.set_style(style);

        Self {
            package_pb,
            current: String::new(),
        }
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start_package(&mut self, name: &str, current: usize, total: usize) {
        self.current = format!("({current}/{total}) {name}");
        self.package_pb.set_message(self.current.clone());
    }

    fn step(&mut self, message: &str) {
        self.package_pb
            .set_message(format!("{} {}", self.current, message));
    }

    fn finish_package(&mut self) {
        self.package_pb.inc(1);
    }

    fn finish(&mut self) {
        self.package_pb.finish_with_message("done");
    }

    fn abandon(&mut self) {
        self.package_pb.abandon();
    }
}

/// Silent progress reporter
///
/// No-op implementation used by tests and by runs that only care about exit status.
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start_package(&mut self, _name: &str, _current: usize, _total: usize) {}

    fn step(&mut self, _message: &str) {}

    fn finish_package(&mut self) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}
