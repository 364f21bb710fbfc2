//! Progress display for registry lookups
//!
//! Provides visual feedback during an audit using indicatif. Bars draw to
//! stderr, so JSON on stdout stays clean.

use crate::domain::RawDependency;
use crate::orchestrator::AuditObserver;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for the lookup phase
pub struct Progress {
    /// Hidden when progress display is disabled (quiet or JSON mode)
    bar: ProgressBar,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self::disabled();
        }

        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
        {
            bar.set_style(style.progress_chars("█▓▒░"));
        }
        Self { bar }
    }

    /// Create a disabled progress reporter
    pub fn disabled() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl AuditObserver for Progress {
    fn fetch_started(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_message("Checking registries");
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn dependency_fetched(&self, dependency: &RawDependency, _success: bool) {
        self.bar.set_message(dependency.name.clone());
        self.bar.inc(1);
    }

    fn fetch_finished(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_disabled() {
        let progress = Progress::disabled();
        progress.fetch_started(2);
        progress.dependency_fetched(&RawDependency::pypi("requests", None), true);
        progress.fetch_finished();
        assert!(progress.bar.is_hidden());
    }

    #[test]
    fn test_progress_counts_lookups() {
        let progress = Progress::new(true);
        progress.fetch_started(3);
        progress.dependency_fetched(&RawDependency::npm("react", None), true);
        progress.dependency_fetched(&RawDependency::npm("vue", None), false);
        assert_eq!(progress.bar.position(), 2);
        assert_eq!(progress.bar.length(), Some(3));
        progress.fetch_finished();
    }
}
