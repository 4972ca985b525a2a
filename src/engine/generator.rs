// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Iterative depth-first generator of diagonal Latin squares.
//!
//! The generator walks the traversal path forwards and backwards, one cell
//! per step, with no recursion: the only stack is the path index plus the
//! per-cell history bitsets in [`UsageFlags`](crate::state::UsageFlags).
//!
//! # Steps
//!
//! At the current cell `(r, c)` the untried legal symbols are
//! `rows[r] & cols[c] & history[r][c]`.
//!
//! - **Forward**: write the lowest such symbol and drop it from the history.
//!   On the last path cell the square is complete and is returned; the
//!   generator stays there and tries the next symbol on the following call.
//!   Otherwise the symbol is marked in the row and column, the index
//!   advances, and the new cell's history is seeded with every symbol legal
//!   there.
//! - **Backward**: with nothing left to try, clear the cell, step back and
//!   release the previous cell's symbol. Its history still holds what was
//!   not tried on the earlier visit.
//!
//! Diagonal legality is never tested: diagonal cells are preset and kept off
//! the path, which [`SearchState::validate`] enforces.
//!
//! # Example
//!
//! ```
//! use rake_search::engine::generator::{SquareGenerator, StopReason};
//! use rake_search::square::{KeyCell, Path, Square};
//! use rake_search::state::SearchState;
//!
//! // Row 0 and both diagonals preset, the rest generated.
//! let a = Square::from_rows([[0, 1, 2, 3], [2, 3, 0, 1], [3, 2, 1, 0], [1, 0, 3, 2]]);
//! let state = SearchState::from_presets(a, Path::off_diagonal(4, 1), KeyCell::exhaustive()).unwrap();
//! let mut generator = SquareGenerator::new(state);
//!
//! let square = generator.next_square().unwrap();
//! assert_eq!(square, a);
//! assert_eq!(generator.next_square(), None);
//! assert_eq!(generator.stop_reason(), Some(StopReason::Exhausted));
//! ```

use crate::square::{on_diagonal, Square};
use crate::state::{SearchState, Statistics};

/// Why a generator stopped producing squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Backtracked out of the first path cell.
    Exhausted,
    /// The key cell reached the target value.
    KeyReached,
}

/// Produces the diagonal Latin squares reachable from a [`SearchState`].
#[derive(Debug, Clone)]
pub struct SquareGenerator<const N: usize> {
    state: SearchState<N>,
    stopped: Option<StopReason>,
}

impl<const N: usize> SquareGenerator<N> {
    pub fn new(state: SearchState<N>) -> Self {
        Self {
            state,
            stopped: None,
        }
    }

    /// The state, suitable for checkpointing between squares.
    pub fn state(&self) -> &SearchState<N> {
        &self.state
    }

    pub fn statistics(&self) -> &Statistics {
        &self.state.statistics
    }

    pub fn statistics_mut(&mut self) -> &mut Statistics {
        &mut self.state.statistics
    }

    pub fn into_state(self) -> SearchState<N> {
        self.state
    }

    /// Set once the generator has returned its last square.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }

    /// Advance to the next complete square.
    ///
    /// Returns `None` once the search is exhausted or the key cell holds its
    /// target value. A square completed by the move that sets the key cell
    /// is still returned; the stop is observed by the next call.
    pub fn next_square(&mut self) -> Option<Square<N>> {
        if self.stopped.is_some() {
            return None;
        }
        if self.key_reached() || self.state.path.is_empty() {
            return self.stop();
        }

        let last = self.state.path.len() - 1;
        loop {
            let (r, c) = self.state.path[self.state.cell_id];
            debug_assert!(!on_diagonal(N, (r, c)), "diagonal cell ({}, {}) on path", r, c);

            let state = &mut self.state;
            match state.flags.candidates(r, c).lowest() {
                Some(value) => {
                    state.square.set(r, c, value);
                    state.flags.history[r][c].remove(value);
                    if state.cell_id == last {
                        return Some(state.square);
                    }
                    state.flags.mark(r, c, value);
                    state.cell_id += 1;
                    let (nr, nc) = state.path[state.cell_id];
                    state.flags.history[nr][nc] = state.flags.legal(nr, nc);
                }
                None => {
                    state.square.clear(r, c);
                    if state.cell_id == 0 {
                        return self.stop();
                    }
                    state.cell_id -= 1;
                    let (pr, pc) = state.path[state.cell_id];
                    if let Some(value) = state.square.get(pr, pc) {
                        state.flags.release(pr, pc, value);
                    }
                }
            }

            if self.key_reached() {
                return self.stop();
            }
        }
    }

    fn key_reached(&self) -> bool {
        match self.state.key.target() {
            Some(((r, c), value)) => self.state.square.get(r, c) == Some(value),
            None => false,
        }
    }

    fn stop(&mut self) -> Option<Square<N>> {
        let reason = if self.key_reached() {
            StopReason::KeyReached
        } else {
            StopReason::Exhausted
        };
        tracing::debug!(?reason, cell_id = self.state.cell_id, "Generator stopped");
        self.stopped = Some(reason);
        None
    }
}

impl<const N: usize> Iterator for SquareGenerator<N> {
    type Item = Square<N>;

    fn next(&mut self) -> Option<Square<N>> {
        self.next_square()
    }
}
