// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use rake_search::coordinator::Coordinator;
use rake_search::engine::{Flow, SquareHandler};
use rake_search::square::{KeyCell, Path, Square};
use rake_search::state::{SearchState, Statistics};
use std::path::{Path as FsPath, PathBuf};

/// Every way to preset both diagonals of an order-`N` square whose first
/// row is `0 1 .. N-1`, respecting rows, columns and diagonals.
pub fn diagonal_presets<const N: usize>() -> Vec<Square<N>> {
    let mut start = Square::new();
    for c in 0..N {
        start.set(0, c, c as u8);
    }
    let cells: Vec<(usize, usize)> = (1..N)
        .flat_map(|r| {
            let mut cells = vec![(r, r)];
            if r + r + 1 != N {
                cells.push((r, N - 1 - r));
            }
            cells
        })
        .collect();
    let mut found = Vec::new();
    extend_presets(&mut start, &cells, &mut found);
    found
}

fn extend_presets<const N: usize>(
    square: &mut Square<N>,
    cells: &[(usize, usize)],
    found: &mut Vec<Square<N>>,
) {
    let Some((&(r, c), rest)) = cells.split_first() else {
        found.push(*square);
        return;
    };
    for value in 0..N as u8 {
        square.set(r, c, value);
        if square.is_latin() && square.is_diagonal() {
            extend_presets(square, rest, found);
        }
        square.clear(r, c);
    }
}

/// Start state filling every non-diagonal cell below row 0.
pub fn start_state<const N: usize>(presets: Square<N>, key: KeyCell) -> SearchState<N> {
    SearchState::from_presets(presets, Path::off_diagonal(N, 1), key)
        .expect("presets should be consistent")
}

/// Order 6 with only the diagonals preset; the path covers row 0 too.
pub fn order6_presets() -> Square<6> {
    const SECONDARY: [u8; 6] = [1, 0, 4, 5, 2, 3];
    let mut square = Square::new();
    for i in 0..6 {
        square.set(i, i, i as u8);
        square.set(i, 5 - i, SECONDARY[i]);
    }
    square
}

pub fn order6_state(key: KeyCell) -> SearchState<6> {
    SearchState::from_presets(order6_presets(), Path::off_diagonal(6, 0), key)
        .expect("order 6 presets should be consistent")
}

/// First square generated from [`order6_state`].
pub fn order6_first_square() -> Square<6> {
    Square::from_rows([
        [0, 3, 4, 2, 5, 1],
        [2, 1, 3, 5, 0, 4],
        [1, 5, 2, 4, 3, 0],
        [4, 0, 5, 3, 1, 2],
        [5, 2, 0, 1, 4, 3],
        [3, 4, 1, 0, 2, 5],
    ])
}

/// Handler recording every square, optionally suspending after some.
#[derive(Debug, Default)]
pub struct RecordingHandler<const N: usize> {
    pub squares: Vec<Square<N>>,
    pub suspend_after: Option<usize>,
    pub finished: bool,
}

impl<const N: usize> SquareHandler<N> for RecordingHandler<N> {
    fn on_square(&mut self, square: &Square<N>, _statistics: &mut Statistics) -> Flow {
        self.squares.push(*square);
        match self.suspend_after {
            Some(limit) if self.squares.len() >= limit => Flow::Suspend,
            _ => Flow::Continue,
        }
    }

    fn finish(&mut self, _statistics: &Statistics) {
        self.finished = true;
    }

    fn name(&self) -> &str {
        "Recording"
    }
}

/// Coordinator that checkpoints whenever asked and exits on request.
#[derive(Debug, Default)]
pub struct ScriptedCoordinator {
    /// Ask to exit once `should_exit` has been called this many times.
    pub exit_after: Option<usize>,
    pub exit_checks: usize,
    pub fractions: Vec<f64>,
    pub checkpoints: usize,
    pub status: Option<i32>,
}

impl ScriptedCoordinator {
    pub fn exiting_after(squares: usize) -> Self {
        Self {
            exit_after: Some(squares),
            ..Self::default()
        }
    }
}

impl Coordinator for ScriptedCoordinator {
    fn resolve_filename(&self, logical: &FsPath) -> PathBuf {
        logical.to_path_buf()
    }

    fn fraction_done(&mut self, fraction: f64) {
        self.fractions.push(fraction);
    }

    fn time_to_checkpoint(&mut self) -> bool {
        true
    }

    fn checkpoint_completed(&mut self) {
        self.checkpoints += 1;
    }

    fn should_exit(&mut self) -> bool {
        self.exit_checks += 1;
        self.exit_after.is_some_and(|limit| self.exit_checks >= limit)
    }

    fn finish(&mut self, status: i32) {
        self.status = Some(status);
    }
}
