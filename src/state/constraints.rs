// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bit-vector usage tracking for the square generator.
//!
//! For each row and column a [`SymbolSet`] of symbols still free there, for
//! each diagonal the symbols still free on it, and for each cell the symbols
//! not yet tried during its current visit. The set legal at `(r, c)` is then
//! a single AND:
//!
//! ```text
//! rows[r] & cols[c] & history[r][c]
//! ```

use crate::error::{RakeError, Result};
use crate::square::{Square, SymbolSet};

/// Free-symbol bitsets for rows, columns, diagonals and per-cell history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageFlags<const N: usize> {
    pub primary: SymbolSet,
    pub secondary: SymbolSet,
    pub rows: [SymbolSet; N],
    pub cols: [SymbolSet; N],
    pub history: [[SymbolSet; N]; N],
}

impl<const N: usize> Default for UsageFlags<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> UsageFlags<N> {
    /// Everything free, every cell untried.
    pub fn new() -> Self {
        let full = SymbolSet::full(N);
        Self {
            primary: full,
            secondary: full,
            rows: [full; N],
            cols: [full; N],
            history: [[full; N]; N],
        }
    }

    /// Flags with every assigned cell of `square` marked as used.
    ///
    /// History is left fully untried. Fails if two assigned cells share a
    /// symbol in a row, column or diagonal.
    pub fn from_square(square: &Square<N>) -> Result<Self> {
        let mut flags = Self::new();
        for r in 0..N {
            for c in 0..N {
                let Some(value) = square.get(r, c) else {
                    continue;
                };
                if !flags.rows[r].contains(value) {
                    return Err(conflict("row", r, value));
                }
                if !flags.cols[c].contains(value) {
                    return Err(conflict("column", c, value));
                }
                flags.mark(r, c, value);
                if r == c {
                    if !flags.primary.contains(value) {
                        return Err(conflict("main diagonal", r, value));
                    }
                    flags.primary.remove(value);
                }
                if r + c + 1 == N {
                    if !flags.secondary.contains(value) {
                        return Err(conflict("secondary diagonal", r, value));
                    }
                    flags.secondary.remove(value);
                }
            }
        }
        Ok(flags)
    }

    /// Record `value` as used in row `row` and column `col`.
    #[inline]
    pub fn mark(&mut self, row: usize, col: usize, value: u8) {
        self.rows[row].remove(value);
        self.cols[col].remove(value);
    }

    /// Return `value` to the free sets of row `row` and column `col`.
    #[inline]
    pub fn release(&mut self, row: usize, col: usize, value: u8) {
        self.rows[row].insert(value);
        self.cols[col].insert(value);
    }

    /// Symbols free in both the row and the column of a cell.
    #[inline]
    pub fn legal(&self, row: usize, col: usize) -> SymbolSet {
        self.rows[row] & self.cols[col]
    }

    /// Symbols legal at a cell and not yet tried there.
    #[inline]
    pub fn candidates(&self, row: usize, col: usize) -> SymbolSet {
        self.legal(row, col) & self.history[row][col]
    }
}

fn conflict(line: &str, index: usize, value: u8) -> RakeError {
    RakeError::ConflictingPresets(format!("symbol {} repeated in {} {}", value, line, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_all_free() {
        let flags = UsageFlags::<4>::new();
        assert_eq!(flags.legal(2, 3), SymbolSet::full(4));
        assert_eq!(flags.candidates(0, 0), SymbolSet::full(4));
        assert_eq!(flags.primary, SymbolSet::full(4));
    }

    #[test]
    fn test_mark_release() {
        let mut flags = UsageFlags::<4>::new();
        flags.mark(1, 2, 3);
        assert!(!flags.rows[1].contains(3));
        assert!(!flags.cols[2].contains(3));
        assert!(!flags.legal(1, 0).contains(3));
        assert!(!flags.legal(0, 2).contains(3));
        assert!(flags.legal(0, 0).contains(3));

        flags.release(1, 2, 3);
        assert_eq!(flags, UsageFlags::new());
    }

    #[test]
    fn test_candidates_respect_history() {
        let mut flags = UsageFlags::<4>::new();
        flags.history[0][1] = SymbolSet::from_bits(0b1010);
        flags.mark(0, 3, 1);
        assert_eq!(flags.candidates(0, 1), SymbolSet::from_bits(0b1000));
    }

    #[test]
    fn test_from_square_marks_diagonals() {
        let mut square = Square::<4>::new();
        for i in 0..4 {
            square.set(i, i, i as u8);
        }
        square.set(0, 3, 1);
        let flags = UsageFlags::from_square(&square).unwrap();
        assert!(flags.primary.is_empty());
        assert_eq!(flags.secondary, SymbolSet::from_bits(0b1101));
        assert_eq!(flags.rows[0], SymbolSet::from_bits(0b1100));
        assert_eq!(flags.cols[3], SymbolSet::from_bits(0b0101));
    }

    #[test]
    fn test_from_square_conflict() {
        let mut square = Square::<4>::new();
        square.set(0, 0, 2);
        square.set(3, 3, 2);
        let err = UsageFlags::from_square(&square).unwrap_err();
        assert!(err.is_consistency());
    }
}
