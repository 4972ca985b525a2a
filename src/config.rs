// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search configuration.
//!
//! Search tunables are carried in [`SearchConfig`]
//! and passed to the search at construction. [`SearchFiles`] names the three
//! files a run uses.

use crate::coordinator::Coordinator;
use std::path::PathBuf;

/// Squares between checkpoint opportunities.
pub const DEFAULT_CHECKPOINT_INTERVAL: u64 = 1 << 20;
/// Capacity of the mate cache, base square included.
pub const DEFAULT_ORTHO_CACHE_SIZE: usize = 128;
/// Path cells used to estimate progress.
pub const DEFAULT_PREFIX_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Minimum orthogonality degree for a pair to be reported.
    pub min_ortho_metric: usize,
    pub checkpoint_interval: u64,
    pub ortho_cache_size: usize,
    pub prefix_len: usize,
    /// Echo result blocks as `debug` events.
    pub echo: bool,
}

impl SearchConfig {
    /// Defaults for squares of order `n`: only fully orthogonal pairs.
    pub fn for_order(n: usize) -> Self {
        Self {
            min_ortho_metric: n * n,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            ortho_cache_size: DEFAULT_ORTHO_CACHE_SIZE,
            prefix_len: DEFAULT_PREFIX_LEN,
            echo: false,
        }
    }

    pub fn with_min_ortho_metric(mut self, metric: usize) -> Self {
        self.min_ortho_metric = metric;
        self
    }

    /// Zero is treated as one.
    pub fn with_checkpoint_interval(mut self, squares: u64) -> Self {
        self.checkpoint_interval = squares.max(1);
        self
    }

    /// Zero is treated as one, which leaves room for the base square only.
    pub fn with_ortho_cache_size(mut self, size: usize) -> Self {
        self.ortho_cache_size = size.max(1);
        self
    }

    pub fn with_prefix_len(mut self, len: usize) -> Self {
        self.prefix_len = len;
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

/// Logical names of the files used by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFiles {
    /// Start parameters.
    pub workunit: PathBuf,
    pub result: PathBuf,
    pub checkpoint: PathBuf,
}

impl Default for SearchFiles {
    fn default() -> Self {
        Self {
            workunit: PathBuf::from("workunit.txt"),
            result: PathBuf::from("result.txt"),
            checkpoint: PathBuf::from("checkpoint.txt"),
        }
    }
}

impl SearchFiles {
    /// Map every name through the coordinator.
    pub fn resolve(&self, coordinator: &impl Coordinator) -> Self {
        Self {
            workunit: coordinator.resolve_filename(&self.workunit),
            result: coordinator.resolve_filename(&self.result),
            checkpoint: coordinator.resolve_filename(&self.checkpoint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::for_order(10);
        assert_eq!(config.min_ortho_metric, 100);
        assert_eq!(config.checkpoint_interval, 1 << 20);
        assert_eq!(config.ortho_cache_size, 128);
        assert_eq!(config.prefix_len, 6);
        assert!(!config.echo);

        let files = SearchFiles::default();
        assert_eq!(files.workunit, PathBuf::from("workunit.txt"));
        assert_eq!(files.checkpoint, PathBuf::from("checkpoint.txt"));
    }

    #[test]
    fn test_builders_clamp() {
        let config = SearchConfig::for_order(4)
            .with_checkpoint_interval(0)
            .with_ortho_cache_size(0)
            .with_min_ortho_metric(12)
            .with_prefix_len(2)
            .with_echo(true);
        assert_eq!(config.checkpoint_interval, 1);
        assert_eq!(config.ortho_cache_size, 1);
        assert_eq!(config.min_ortho_metric, 12);
        assert_eq!(config.prefix_len, 2);
        assert!(config.echo);
    }
}
