// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable search state of the square generator.
//!
//! [`SearchState`] is everything needed to resume a search exactly: the
//! working square, the traversal path, the key cell, the current path
//! index, the usage bit-vectors and the running counters. It is what a
//! checkpoint stores.
//!
//! # Current cell convention
//!
//! The symbol in the cell at `cell_id` is *not* marked in the row and
//! column flags; every earlier path cell's symbol is. The history of the
//! current cell holds the symbols not yet tried there. Loading normalises
//! any input to this convention (see [`SearchState::normalize`]).

pub mod constraints;
pub mod statistics;

pub use constraints::UsageFlags;
pub use statistics::{Counters, Statistics};

use crate::error::{RakeError, Result};
use crate::square::{Cell, KeyCell, Path, Square, SymbolSet};

/// Complete resumable state of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState<const N: usize> {
    /// The square being filled; presets off the path, generated values on it.
    pub square: Square<N>,
    pub path: Path,
    pub key: KeyCell,
    /// Index on the path of the current cell.
    pub cell_id: usize,
    pub flags: UsageFlags<N>,
    pub statistics: Statistics,
}

impl<const N: usize> SearchState<N> {
    /// Fresh state for a search over `path` with the remaining cells of
    /// `square` as presets.
    ///
    /// Values in path cells are discarded. The search starts at the first
    /// path cell with nothing tried.
    pub fn from_presets(mut square: Square<N>, path: Path, key: KeyCell) -> Result<Self> {
        for &(r, c) in path.cells() {
            if r < N && c < N {
                square.clear(r, c);
            }
        }
        let mut state = Self {
            square,
            path,
            key,
            cell_id: 0,
            flags: UsageFlags::new(),
            statistics: Statistics::new(),
        };
        state.validate()?;
        state.flags = UsageFlags::from_square(&state.square)?;
        state.normalize()?;
        Ok(state)
    }

    /// The cell the generator is positioned on, if the path is not empty.
    pub fn current_cell(&self) -> Option<Cell> {
        self.path.cells().get(self.cell_id).copied()
    }

    /// Structural checks on the path, position and key cell.
    pub fn validate(&self) -> Result<()> {
        for &(r, c) in self.path.cells() {
            check_range("path coordinate", r, N)?;
            check_range("path coordinate", c, N)?;
        }
        if let Some((index, cell)) = self.path.diagonal_cell(N) {
            return Err(RakeError::DiagonalCellInPath { index, cell });
        }
        if let Some((index, cell)) = self.path.repeated_cell() {
            return Err(RakeError::RepeatedPathCell { index, cell });
        }
        if self.path.is_empty() {
            // An empty path generates nothing, so the square need not be complete.
            if self.cell_id != 0 {
                return Err(RakeError::InvalidPosition(format!(
                    "cell index {} on an empty path",
                    self.cell_id
                )));
            }
        } else {
            if self.cell_id >= self.path.len() {
                return Err(RakeError::InvalidPosition(format!(
                    "cell index {} beyond path of length {}",
                    self.cell_id,
                    self.path.len()
                )));
            }
            for r in 0..N {
                for c in 0..N {
                    let cell = (r, c);
                    if self.square.get(r, c).is_none() && self.path.position(cell).is_none() {
                        return Err(RakeError::UnassignedCell { cell });
                    }
                }
            }
            for (index, &(r, c)) in self.path.cells()[..self.cell_id].iter().enumerate() {
                if self.square.get(r, c).is_none() {
                    return Err(RakeError::InvalidPosition(format!(
                        "path cell {} at {:?} precedes the current cell but is empty",
                        index,
                        (r, c)
                    )));
                }
            }
        }
        if let Some((r, c)) = self.key.position {
            check_range("key coordinate", r, N)?;
            check_range("key coordinate", c, N)?;
        } else if self.key.value.is_some() {
            return Err(RakeError::InvalidPosition(
                "key value given without a key cell".to_string(),
            ));
        }
        if let Some(value) = self.key.value {
            check_range("key value", value as usize, N)?;
        }
        Ok(())
    }

    /// Bring loaded flags to the current cell convention and check them.
    ///
    /// Path cells after the current one are cleared. Walking back from the
    /// current cell, each cell's symbol is released and its history is
    /// intersected with the symbols legal when it was current and numbered
    /// above the symbol it holds. The current
    /// cell's symbol stays released in the row and column flags. Afterwards
    /// the flags must equal those implied by the square.
    ///
    /// Call [`validate`](Self::validate) first.
    pub fn normalize(&mut self) -> Result<()> {
        if self.path.is_empty() {
            return Ok(());
        }
        for &(r, c) in &self.path.cells()[self.cell_id + 1..] {
            self.square.clear(r, c);
        }

        let mut rows = self.flags.rows;
        let mut cols = self.flags.cols;
        for i in (0..=self.cell_id).rev() {
            let (r, c) = self.path[i];
            let mut untried = SymbolSet::full(N);
            if let Some(value) = self.square.get(r, c) {
                rows[r].insert(value);
                cols[c].insert(value);
                // Lowest first: the symbol and everything below it were tried.
                untried = SymbolSet::above(value);
            }
            self.flags.history[r][c] &= rows[r] & cols[c] & untried;
            if i == self.cell_id {
                self.flags.rows[r] = rows[r];
                self.flags.cols[c] = cols[c];
            }
        }

        self.check_flags()
    }

    /// Compare the row, column and diagonal flags with the square.
    fn check_flags(&self) -> Result<()> {
        let mut settled = self.square;
        if let Some((r, c)) = self.current_cell() {
            settled.clear(r, c);
        }
        let expected = UsageFlags::from_square(&settled)?;
        if expected.primary != self.flags.primary {
            return Err(mismatch("main diagonal", expected.primary, self.flags.primary));
        }
        if expected.secondary != self.flags.secondary {
            return Err(mismatch(
                "secondary diagonal",
                expected.secondary,
                self.flags.secondary,
            ));
        }
        for i in 0..N {
            if expected.rows[i] != self.flags.rows[i] {
                return Err(mismatch("row", expected.rows[i], self.flags.rows[i]));
            }
            if expected.cols[i] != self.flags.cols[i] {
                return Err(mismatch("column", expected.cols[i], self.flags.cols[i]));
            }
        }
        Ok(())
    }
}

fn check_range(what: &'static str, value: usize, bound: usize) -> Result<()> {
    if value < bound {
        Ok(())
    } else {
        Err(RakeError::OutOfRange {
            what,
            value: value as i64,
        })
    }
}

fn mismatch(what: &str, expected: impl std::fmt::Display, found: impl std::fmt::Display) -> RakeError {
    RakeError::FlagsMismatch(format!("{}: expected {}, found {}", what, expected, found))
}
