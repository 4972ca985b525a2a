// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search for orthogonal mates by permuting the rows of a base square.
//!
//! Every square B built from the rows of a diagonal Latin square A is Latin;
//! only its diagonals need checking. [`MateSearch`] enumerates the row
//! permutations that keep both diagonals of B free of repeats, with:
//!
//! - row 0 of B fixed to row 0 of A, and
//! - row `i` of A never placed at row `i` of B for `i >= 1`. Such a B
//!   repeats the pairs `(x, x)` already produced by row 0, so it cannot be
//!   orthogonal to A.
//!
//! [`PairCollector`] scores each candidate and keeps the accepted mates of
//! the current base square for the mutual orthogonality check.

use crate::square::{Square, SymbolSet};
use crate::state::{Counters, Statistics};

/// One level of the row search: row `i` of B.
#[derive(Debug, Clone, Copy, Default)]
struct Level {
    /// Row of A currently placed here.
    row: Option<usize>,
    /// Rows of A not yet tried here.
    untried: SymbolSet,
    /// Symbols still free on B's main diagonal before this level.
    primary: SymbolSet,
    /// Symbols still free on B's secondary diagonal before this level.
    secondary: SymbolSet,
}

/// Iterative depth-first search over row permutations of a square.
///
/// The levels form a fixed arena indexed by row; backtracking restores the
/// diagonal sets by returning to the previous level's snapshot.
#[derive(Debug, Clone)]
pub struct MateSearch<const N: usize> {
    levels: [Level; N],
    rows: [usize; N],
}

impl<const N: usize> Default for MateSearch<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MateSearch<N> {
    pub fn new() -> Self {
        Self {
            levels: [Level::default(); N],
            rows: [0; N],
        }
    }

    /// Call `visit` with every diagonal row permutation B of `a`.
    ///
    /// Candidates are produced in lexicographic order of their row
    /// sequence. Nothing is visited if `a` is incomplete.
    pub fn for_each_candidate(&mut self, a: &Square<N>, mut visit: impl FnMut(&Square<N>)) {
        let Some(values) = complete_values(a) else {
            return;
        };
        if N < 2 {
            if N == 1 {
                visit(a);
            }
            return;
        }

        let full = SymbolSet::full(N);
        let mut free_rows = full.without(0);
        self.rows[0] = 0;
        self.levels[1] = Level {
            row: None,
            untried: full.without(1),
            primary: full.without(values[0][0]),
            secondary: full.without(values[0][N - 1]),
        };

        let mut level = 1;
        while level > 0 {
            let frame = &mut self.levels[level];
            if let Some(old) = frame.row.take() {
                free_rows.insert(old as u8);
            }

            let mut placed = None;
            while let Some(row) = (free_rows & frame.untried).lowest() {
                frame.untried.remove(row);
                let main = values[row as usize][level];
                let anti = values[row as usize][N - 1 - level];
                if frame.primary.contains(main) && frame.secondary.contains(anti) {
                    placed = Some((row as usize, main, anti));
                    break;
                }
            }

            match placed {
                Some((row, main, anti)) => {
                    frame.row = Some(row);
                    free_rows.remove(row as u8);
                    self.rows[level] = row;
                    if level == N - 1 {
                        visit(&a.with_rows_permuted(&self.rows));
                    } else {
                        let next = Level {
                            row: None,
                            untried: full.without(level as u8 + 1),
                            primary: frame.primary.without(main),
                            secondary: frame.secondary.without(anti),
                        };
                        level += 1;
                        self.levels[level] = next;
                    }
                }
                None => level -= 1,
            }
        }
    }
}

fn complete_values<const N: usize>(a: &Square<N>) -> Option<[[u8; N]; N]> {
    let mut values = [[0u8; N]; N];
    for (r, row) in values.iter_mut().enumerate() {
        for (c, value) in row.iter_mut().enumerate() {
            *value = a.get(r, c)?;
        }
    }
    Some(values)
}

/// An accepted candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    pub degree: usize,
    /// True for the first mate of the current base square.
    pub first: bool,
}

/// Scores candidates against a base square and caches accepted mates.
///
/// The cache holds the base square at index 0 followed by up to
/// `capacity - 1` mates, so mates past the capacity are counted and logged
/// but not cross-checked.
#[derive(Debug, Clone)]
pub struct PairCollector<const N: usize> {
    min_ortho_metric: usize,
    capacity: usize,
    cache: Vec<Square<N>>,
}

impl<const N: usize> PairCollector<N> {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(min_ortho_metric: usize, capacity: usize) -> Self {
        assert!(capacity > 0, "mate cache needs room for the base square");
        Self {
            min_ortho_metric,
            capacity,
            cache: Vec::with_capacity(capacity),
        }
    }

    /// Start collecting for a new base square.
    pub fn begin(&mut self, statistics: &mut Statistics) {
        self.cache.clear();
        statistics.reset(Counters::Pairs);
    }

    /// Score `b` against `a`, updating the counters if accepted.
    ///
    /// A pair is accepted when its degree reaches the minimum and both
    /// squares are diagonal Latin squares.
    pub fn consider(
        &mut self,
        a: &Square<N>,
        b: &Square<N>,
        statistics: &mut Statistics,
    ) -> Option<Accepted> {
        let degree = a.ortho_degree(b);
        if degree < self.min_ortho_metric
            || !(b.is_diagonal() && b.is_latin() && a.is_diagonal() && a.is_latin())
        {
            return None;
        }

        statistics.increment(Counters::Pairs);
        statistics.increment(Counters::TotalPairs);
        let pairs = statistics.get(Counters::Pairs);
        let first = pairs == 1;
        if first {
            self.cache.clear();
            self.cache.push(*a);
            statistics.increment(Counters::SquaresWithPairs);
        }
        if (pairs as usize) < self.capacity {
            self.cache.push(*b);
        }
        Some(Accepted { degree, first })
    }

    /// The cached squares: the base square then its mates.
    pub fn cached(&self) -> &[Square<N>] {
        &self.cache
    }

    /// Index pairs `(i, j)`, `i < j`, of cached squares that are fully
    /// orthogonal to each other. Index 0 is the base square.
    pub fn mutual_pairs(&self) -> Vec<(usize, usize)> {
        let full = N * N;
        let mut found = Vec::new();
        for (i, x) in self.cache.iter().enumerate() {
            for (j, y) in self.cache.iter().enumerate().skip(i + 1) {
                if x.ortho_degree(y) == full {
                    found.push((i, j));
                }
            }
        }
        found
    }
}
