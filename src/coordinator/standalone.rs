// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Coordinator for a search run without a distributed client.

use super::Coordinator;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Minimum time between checkpoints.
pub const DEFAULT_CHECKPOINT_PERIOD: Duration = Duration::from_secs(60);

/// Uses file names as given, logs progress and checkpoints on a timer.
#[derive(Debug)]
pub struct Standalone {
    period: Duration,
    last_checkpoint: Instant,
    fraction: f64,
    status: Option<i32>,
}

impl Default for Standalone {
    fn default() -> Self {
        Self::new(DEFAULT_CHECKPOINT_PERIOD)
    }
}

impl Standalone {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_checkpoint: Instant::now(),
            fraction: 0.0,
            status: None,
        }
    }

    /// The last reported fraction.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// The status passed to [`Coordinator::finish`], once called.
    pub fn status(&self) -> Option<i32> {
        self.status
    }
}

impl Coordinator for Standalone {
    fn resolve_filename(&self, logical: &Path) -> PathBuf {
        logical.to_path_buf()
    }

    fn fraction_done(&mut self, fraction: f64) {
        self.fraction = fraction.clamp(0.0, 1.0);
        tracing::info!("Progress {:.4}%", self.fraction * 100.0);
    }

    fn time_to_checkpoint(&mut self) -> bool {
        self.last_checkpoint.elapsed() >= self.period
    }

    fn checkpoint_completed(&mut self) {
        self.last_checkpoint = Instant::now();
    }

    fn finish(&mut self, status: i32) {
        tracing::info!(status, "Search finished");
        self.status = Some(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_timer() {
        let mut zero = Standalone::new(Duration::ZERO);
        assert!(zero.time_to_checkpoint());

        let mut hourly = Standalone::new(Duration::from_secs(3600));
        assert!(!hourly.time_to_checkpoint());
        hourly.checkpoint_completed();
        assert!(!hourly.time_to_checkpoint());
    }

    #[test]
    fn test_reports() {
        let mut coordinator = Standalone::default();
        assert_eq!(
            coordinator.resolve_filename(Path::new("workunit.txt")),
            PathBuf::from("workunit.txt")
        );
        coordinator.fraction_done(1.5);
        assert_eq!(coordinator.fraction(), 1.0);
        assert!(!coordinator.should_exit());
        coordinator.finish(0);
        assert_eq!(coordinator.status(), Some(0));
    }
}
