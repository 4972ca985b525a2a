// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The N×N symbol matrix shared by both searches.
//!
//! A [`Square`] holds symbols `0..N` or an empty marker per cell. The
//! validity predicates ignore empty cells, so they can be asked of partial
//! squares too; a square is a diagonal Latin square when it is complete and
//! both predicates hold.
//!
//! # Example
//!
//! ```
//! use rake_search::square::Square;
//!
//! let a = Square::from_rows([[0, 1, 2, 3], [2, 3, 0, 1], [3, 2, 1, 0], [1, 0, 3, 2]]);
//! let b = a.with_rows_permuted(&[0, 2, 3, 1]);
//!
//! assert!(a.is_latin() && a.is_diagonal());
//! assert!(b.is_latin() && b.is_diagonal());
//! assert_eq!(a.ortho_degree(&b), 16);
//! ```

use crate::square::SymbolSet;
use std::fmt;

/// Token opening a square in text form.
pub const HEAD_TOKEN: char = '{';
/// Token closing a square in text form.
pub const TAIL_TOKEN: char = '}';

/// An N×N matrix of symbols, each cell either empty or in `0..N`.
///
/// Copying is a full value copy; the generator hands out copies so the
/// mate search never aliases the generator's working square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square<const N: usize> {
    cells: [[Option<u8>; N]; N],
}

impl<const N: usize> Default for Square<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Square<N> {
    /// Create a square with every cell empty.
    pub const fn new() -> Self {
        Self {
            cells: [[None; N]; N],
        }
    }

    /// Create a complete square from its rows.
    ///
    /// # Panics
    ///
    /// Panics if any value is not below `N`.
    pub fn from_rows(rows: [[u8; N]; N]) -> Self {
        let mut square = Self::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                square.set(r, c, value);
            }
        }
        square
    }

    /// Empty every cell.
    pub fn reset(&mut self) {
        self.cells = [[None; N]; N];
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells[row][col]
    }

    /// Assign a symbol to a cell.
    ///
    /// # Panics
    ///
    /// Panics if `value >= N`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        assert!((value as usize) < N, "symbol {} out of range", value);
        self.cells[row][col] = Some(value);
    }

    #[inline]
    pub fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = None;
    }

    /// The cells of one row.
    pub fn row(&self, row: usize) -> &[Option<u8>; N] {
        &self.cells[row]
    }

    /// True if no cell is empty.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// True if no row and no column contains a repeated symbol.
    pub fn is_latin(&self) -> bool {
        (0..N).all(|i| {
            no_duplicates((0..N).map(|c| self.cells[i][c]))
                && no_duplicates((0..N).map(|r| self.cells[r][i]))
        })
    }

    /// True if neither the main nor the secondary diagonal repeats a symbol.
    pub fn is_diagonal(&self) -> bool {
        no_duplicates((0..N).map(|i| self.cells[i][i]))
            && no_duplicates((0..N).map(|i| self.cells[i][N - 1 - i]))
    }

    /// Number of distinct ordered pairs `(self[r][c], other[r][c])`.
    ///
    /// Cells empty in either square contribute nothing. The maximum, `N²`,
    /// means the squares are orthogonal.
    pub fn ortho_degree(&self, other: &Self) -> usize {
        let mut seen = [SymbolSet::empty(); N];
        for r in 0..N {
            for c in 0..N {
                if let (Some(a), Some(b)) = (self.cells[r][c], other.cells[r][c]) {
                    seen[a as usize].insert(b);
                }
            }
        }
        seen.iter().map(|set| set.len()).sum()
    }

    /// A new square whose row `i` is row `rows[i]` of this one.
    pub fn with_rows_permuted(&self, rows: &[usize; N]) -> Self {
        let mut permuted = Self::new();
        for (target, &source) in rows.iter().enumerate() {
            permuted.cells[target] = self.cells[source];
        }
        permuted
    }
}

fn no_duplicates(values: impl Iterator<Item = Option<u8>>) -> bool {
    let mut seen = SymbolSet::empty();
    for value in values.flatten() {
        if seen.contains(value) {
            return false;
        }
        seen.insert(value);
    }
    true
}

impl<const N: usize> fmt::Display for Square<N> {
    /// Text form used in checkpoints and result files: `{`, one line per
    /// row with each symbol followed by a space (`-1` for empty), `}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEAD_TOKEN)?;
        for row in &self.cells {
            for cell in row {
                match cell {
                    Some(value) => write!(f, "{} ", value)?,
                    None => write!(f, "-1 ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "{}", TAIL_TOKEN)
    }
}
