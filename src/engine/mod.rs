// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search engine: square generation, mate search and the driver loop.
//!
//! # Architecture
//!
//! [`RakeSearch`] owns a [`SquareGenerator`] and hands every square it
//! produces to a [`SquareHandler`], normally [`PairSearch`]. Between squares
//! the driver does the periodic work:
//!
//! 1. Every `checkpoint_interval` squares, recompute the progress fraction
//!    and report it to the [`Coordinator`]
//! 2. If the coordinator says it is time, write a checkpoint
//! 3. If the coordinator or the handler asks to stop, checkpoint and return
//!    [`Outcome::Suspended`]
//!
//! Checkpoints are only ever written between base squares, so a resumed run
//! never repeats or loses part of a result block.
//!
//! # Example
//!
//! ```no_run
//! use rake_search::config::{SearchConfig, SearchFiles};
//! use rake_search::coordinator::Standalone;
//! use rake_search::engine::{Outcome, PairSearch, RakeSearch};
//! use rake_search::persist::ResultLog;
//! use rake_search::state::SearchState;
//!
//! let files = SearchFiles::default();
//! let config = SearchConfig::for_order(10);
//! let state = SearchState::<10>::load(&files).unwrap();
//! let handler = PairSearch::new(&config, ResultLog::new(&files.result, false));
//!
//! let mut search = RakeSearch::new(state, handler, Standalone::default(), config, &files.checkpoint);
//! if let Outcome::Finished(reason) = search.run() {
//!     println!("Stopped: {:?}", reason);
//! }
//! ```

pub mod generator;
pub mod handler;
pub mod mates;

pub use generator::{SquareGenerator, StopReason};
pub use handler::{Flow, PairSearch, SquareHandler};
pub use mates::{MateSearch, PairCollector};

use crate::config::SearchConfig;
use crate::coordinator::Coordinator;
use crate::persist::{save_atomic, PrefixProgress};
use crate::square::Square;
use crate::state::{Counters, SearchState, Statistics};
use std::path::PathBuf;

/// How a call to [`RakeSearch::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The generator stopped; totals have been written.
    Finished(StopReason),
    /// Stopped on request after a checkpoint. Calling `run` again, or
    /// loading the checkpoint, continues the search.
    Suspended,
}

/// Driver tying the generator, a square handler and a coordinator together.
pub struct RakeSearch<const N: usize, H, C> {
    generator: SquareGenerator<N>,
    handler: H,
    coordinator: C,
    config: SearchConfig,
    checkpoint: PathBuf,
    progress: PrefixProgress,
}

impl<const N: usize, H: SquareHandler<N>, C: Coordinator> RakeSearch<N, H, C> {
    pub fn new(
        state: SearchState<N>,
        handler: H,
        coordinator: C,
        config: SearchConfig,
        checkpoint: impl Into<PathBuf>,
    ) -> Self {
        let progress = PrefixProgress::new(N, &state.path, config.prefix_len);
        Self {
            generator: SquareGenerator::new(state),
            handler,
            coordinator,
            config,
            checkpoint: checkpoint.into(),
            progress,
        }
    }

    pub fn state(&self) -> &SearchState<N> {
        self.generator.state()
    }

    pub fn statistics(&self) -> &Statistics {
        self.generator.statistics()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn coordinator(&self) -> &C {
        &self.coordinator
    }

    pub fn into_parts(self) -> (SearchState<N>, H, C) {
        (self.generator.into_state(), self.handler, self.coordinator)
    }

    /// Run until the generator stops or a stop is requested.
    pub fn run(&mut self) -> Outcome {
        tracing::info!(
            handler = self.handler.name(),
            order = N,
            path = self.state().path.len(),
            squares = self.statistics().get(Counters::Squares),
            "Search started"
        );

        while let Some(square) = self.generator.next_square() {
            let statistics = self.generator.statistics_mut();
            statistics.increment(Counters::Squares);
            let flow = self.handler.on_square(&square, statistics);
            let squares = statistics.get(Counters::Squares);

            if squares % self.config.checkpoint_interval.max(1) == 0 {
                self.periodic(&square, squares);
            }
            if flow == Flow::Suspend || self.coordinator.should_exit() {
                self.write_checkpoint();
                tracing::info!(squares, "Search suspended");
                return Outcome::Suspended;
            }
        }

        let reason = self
            .generator
            .stop_reason()
            .unwrap_or(StopReason::Exhausted);
        let statistics = self.generator.statistics();
        self.handler.finish(statistics);
        self.coordinator.fraction_done(1.0);
        tracing::info!(
            ?reason,
            squares = statistics.get(Counters::Squares),
            total_pairs = statistics.get(Counters::TotalPairs),
            squares_with_pairs = statistics.get(Counters::SquaresWithPairs),
            "Search finished"
        );
        Outcome::Finished(reason)
    }

    fn periodic(&mut self, square: &Square<N>, squares: u64) {
        let fraction = self.progress.update(square);
        self.coordinator.fraction_done(fraction);
        if self.coordinator.time_to_checkpoint() {
            self.write_checkpoint();
        }
        tracing::info!(squares, fraction, "Processed squares");
        tracing::debug!("Last processed square:\n{}", square);
    }

    /// Write a checkpoint now. Failures are logged and leave the previous
    /// checkpoint in place.
    pub fn write_checkpoint(&mut self) -> bool {
        match save_atomic(self.generator.state(), &self.checkpoint) {
            Ok(()) => {
                self.coordinator.checkpoint_completed();
                tracing::debug!(path = %self.checkpoint.display(), "Checkpoint written");
                true
            }
            Err(err) => {
                tracing::warn!(path = %self.checkpoint.display(), %err, "Checkpoint skipped");
                false
            }
        }
    }
}
