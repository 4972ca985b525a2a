// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Running counters of the search. They are part of the search state and are
//! saved in checkpoints, so a resumed run continues the same totals.

use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

#[derive(EnumCountMacro, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Diagonal Latin squares produced by the generator.
    Squares,
    /// Pairs found for the current base square.
    Pairs,
    /// Pairs found over the whole run.
    TotalPairs,
    /// Base squares with at least one pair.
    SquaresWithPairs,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    pub fn set(&mut self, counter: Counters, value: u64) {
        self.stats[counter as usize] = value;
    }

    pub fn reset(&mut self, counter: Counters) {
        self.set(counter, 0);
    }
}
