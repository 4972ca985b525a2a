// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Progress estimate from an ordered list of path prefixes.
//!
//! The number of squares generated says little about how far a search has
//! got, since work units differ in size. Instead, every assignment of
//! distinct-per-row-and-column symbols to the first `len` path cells is
//! listed once, in the lexicographic order the generator visits them. The
//! position of the generator's current prefix in that list is the fraction
//! done. Diagonal presets are ignored, so every work unit of a search shares
//! the same list.

use crate::square::{Path, Square, SymbolSet};

#[derive(Debug, Clone)]
pub struct PrefixProgress {
    cells: Vec<(usize, usize)>,
    /// `count` prefixes of `cells.len()` symbols each, ascending.
    prefixes: Vec<u8>,
    count: usize,
    cursor: usize,
}

impl PrefixProgress {
    /// Enumerate the prefixes of the first `len` cells of `path` for
    /// squares of order `n`. `len` is clamped to the path length.
    pub fn new(n: usize, path: &Path, len: usize) -> Self {
        let cells: Vec<_> = path.cells().iter().copied().take(len).collect();
        let prefixes = enumerate(n, &cells);
        let count = if cells.is_empty() {
            0
        } else {
            prefixes.len() / cells.len()
        };
        tracing::debug!(len = cells.len(), count, "Enumerated progress prefixes");
        Self {
            cells,
            prefixes,
            count,
            cursor: 0,
        }
    }

    /// Number of distinct prefixes.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn prefix(&self, index: usize) -> &[u8] {
        let width = self.cells.len();
        &self.prefixes[index * width..(index + 1) * width]
    }

    /// Advance to the first prefix not below the one in `square` and return
    /// the fraction done.
    ///
    /// The cursor never moves back. A square with an empty prefix cell
    /// leaves it where it is.
    pub fn update<const N: usize>(&mut self, square: &Square<N>) -> f64 {
        let current: Option<Vec<u8>> = self
            .cells
            .iter()
            .map(|&(r, c)| square.get(r, c))
            .collect();
        if let Some(current) = current {
            let (mut lo, mut hi) = (self.cursor, self.count);
            while lo < hi {
                let mid = lo + (hi - lo) / 2;
                if self.prefix(mid) < current.as_slice() {
                    lo = mid + 1;
                } else {
                    hi = mid;
                }
            }
            self.cursor = lo;
        }
        self.fraction()
    }

    pub fn fraction(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.cursor as f64 / self.count as f64
        }
    }
}

/// Depth-first enumeration, lowest symbol first, flattened.
fn enumerate(n: usize, cells: &[(usize, usize)]) -> Vec<u8> {
    let mut out = Vec::new();
    if cells.is_empty() {
        return out;
    }
    let full = SymbolSet::full(n);
    let mut rows = vec![full; n];
    let mut cols = vec![full; n];
    let mut untried = vec![SymbolSet::empty(); cells.len()];
    let mut values = vec![0u8; cells.len()];

    let mut depth = 0;
    untried[0] = full;
    loop {
        let (r, c) = cells[depth];
        match (rows[r] & cols[c] & untried[depth]).lowest() {
            Some(value) => {
                untried[depth].remove(value);
                values[depth] = value;
                if depth + 1 == cells.len() {
                    out.extend_from_slice(&values);
                } else {
                    rows[r].remove(value);
                    cols[c].remove(value);
                    depth += 1;
                    untried[depth] = full;
                }
            }
            None => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                let (pr, pc) = cells[depth];
                rows[pr].insert(values[depth]);
                cols[pc].insert(values[depth]);
            }
        }
    }
    out
}
