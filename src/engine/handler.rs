// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The seam between the square generator and whatever consumes its squares.
//!
//! The driver calls [`SquareHandler::on_square`] once per generated square.
//! The production handler is [`PairSearch`], which runs the mate search and
//! writes accepted pairs to the results log. Tests plug in handlers that
//! just record or count.

use crate::config::SearchConfig;
use crate::engine::mates::{MateSearch, PairCollector};
use crate::persist::ResultLog;
use crate::square::Square;
use crate::state::{Counters, Statistics};

/// What the driver should do after a square has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Checkpoint and return control to the caller.
    Suspend,
}

/// Consumer of completed base squares.
pub trait SquareHandler<const N: usize> {
    /// Handle one diagonal Latin square.
    fn on_square(&mut self, square: &Square<N>, statistics: &mut Statistics) -> Flow;

    /// Called once when the generator has stopped.
    fn finish(&mut self, _statistics: &Statistics) {}

    /// Optional: Get a name for this handler (for logging).
    ///
    /// Default implementation returns the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Mate search plus result logging for each base square.
#[derive(Debug, Clone)]
pub struct PairSearch<const N: usize> {
    mates: MateSearch<N>,
    collector: PairCollector<N>,
    log: ResultLog,
}

impl<const N: usize> PairSearch<N> {
    pub fn new(config: &SearchConfig, log: ResultLog) -> Self {
        Self {
            mates: MateSearch::new(),
            collector: PairCollector::new(config.min_ortho_metric, config.ortho_cache_size),
            log,
        }
    }
}

impl<const N: usize> SquareHandler<N> for PairSearch<N> {
    fn on_square(&mut self, a: &Square<N>, statistics: &mut Statistics) -> Flow {
        self.collector.begin(statistics);

        let collector = &mut self.collector;
        let log = &self.log;
        self.mates.for_each_candidate(a, |b| {
            if let Some(accepted) = collector.consider(a, b, statistics) {
                if accepted.first {
                    log.pair_header(a, accepted.degree);
                }
                tracing::debug!(degree = accepted.degree, "Mate found");
                log.mate(b);
            }
        });

        let pairs = statistics.get(Counters::Pairs);
        if pairs > 0 {
            self.log.mutual_report(&self.collector.mutual_pairs(), pairs);
        }
        Flow::Continue
    }

    fn finish(&mut self, statistics: &Statistics) {
        self.log.totals(statistics);
    }

    fn name(&self) -> &str {
        "PairSearch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_search_logs_block() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultLog::new(dir.path().join("result.txt"), false);
        let mut handler = PairSearch::<4>::new(&SearchConfig::for_order(4), log.clone());
        let mut stats = Statistics::new();

        let a = Square::from_rows([[0, 1, 2, 3], [2, 3, 0, 1], [3, 2, 1, 0], [1, 0, 3, 2]]);
        assert_eq!(handler.on_square(&a, &mut stats), Flow::Continue);
        assert_eq!(stats.get(Counters::Pairs), 1);
        assert_eq!(stats.get(Counters::SquaresWithPairs), 1);

        let text = std::fs::read_to_string(log.path()).unwrap();
        assert!(text.starts_with("{\n"));
        assert!(text.contains("# Degree of orthogonality: 16\n"));
        assert!(text.contains("# Square 0 # 1\n"));
        assert!(text.ends_with("# Pairs found: 1\n}\n"));
    }

    #[test]
    fn test_no_pairs_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultLog::new(dir.path().join("result.txt"), false);
        let mut handler = PairSearch::<4>::new(&SearchConfig::for_order(4), log.clone());
        let mut stats = Statistics::new();

        let cyclic = Square::from_rows([[0, 1, 2, 3], [1, 2, 3, 0], [2, 3, 0, 1], [3, 0, 1, 2]]);
        handler.on_square(&cyclic, &mut stats);
        assert_eq!(stats.get(Counters::Pairs), 0);
        assert!(!log.path().exists());
        assert_eq!(handler.name(), "PairSearch");
    }
}
