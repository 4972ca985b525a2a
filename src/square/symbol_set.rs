// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! SymbolSet type for representing sets of symbols as bitsets.
//!
//! A SymbolSet is a compact representation of a set of symbols using a bitset,
//! where bit i represents the presence of symbol i. Both searches use it:
//! the generator for free symbols per row, column and cell history, and the
//! mate search for sets of row indices.
//!
//! # Examples
//!
//! ```
//! use rake_search::square::SymbolSet;
//!
//! let mut set = SymbolSet::empty();
//! set.insert(0);
//! set.insert(2);
//! set.insert(3);
//!
//! assert_eq!(set.len(), 3);
//! assert_eq!(set.lowest(), Some(0));
//! assert_eq!(format!("{}", set), "|0 2 3|");
//!
//! let symbols: Vec<u8> = set.iter().collect();
//! assert_eq!(symbols, vec![0, 2, 3]);
//! ```

use crate::square::constants::MAX_ORDER;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr};

/// A set of symbols represented as a bitset.
///
/// Bit i (counting from LSB) is set if symbol i is in the set.
/// This provides O(1) insert, remove, contains and lowest-member operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SymbolSet(u32);

impl SymbolSet {
    /// Create an empty symbol set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Create a symbol set containing all symbols `0..n`.
    ///
    /// # Panics
    ///
    /// Panics if `n > MAX_ORDER`.
    pub const fn full(n: usize) -> Self {
        assert!(n <= MAX_ORDER, "order exceeds SymbolSet capacity");
        if n == MAX_ORDER {
            Self(u32::MAX)
        } else {
            Self((1u32 << n) - 1)
        }
    }

    /// Create a symbol set from a raw bit value.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Get the underlying bitset value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check if the set contains a specific symbol.
    #[inline]
    pub fn contains(self, symbol: u8) -> bool {
        (self.0 >> symbol) & 1 != 0
    }

    /// Insert a symbol into the set.
    #[inline]
    pub fn insert(&mut self, symbol: u8) {
        self.0 |= 1 << symbol;
    }

    /// Remove a symbol from the set.
    #[inline]
    pub fn remove(&mut self, symbol: u8) {
        self.0 &= !(1 << symbol);
    }

    /// Return a copy of the set without `symbol`.
    #[inline]
    pub fn without(self, symbol: u8) -> Self {
        Self(self.0 & !(1 << symbol))
    }

    /// Every symbol numbered above `symbol`, up to [`MAX_ORDER`](super::MAX_ORDER).
    #[inline]
    pub fn above(symbol: u8) -> Self {
        Self(u32::MAX.checked_shl(u32::from(symbol) + 1).unwrap_or(0))
    }

    /// The lowest-numbered symbol in the set, if any.
    #[inline]
    pub fn lowest(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }

    /// Get the number of symbols in the set (population count).
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Check if the set is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over all symbols in the set.
    ///
    /// Symbols are yielded in ascending order (0, 1, 2, ...).
    pub fn iter(self) -> impl Iterator<Item = u8> {
        SymbolSetIter { bits: self.0 }
    }
}

/// Iterator over symbols in a SymbolSet.
struct SymbolSetIter {
    bits: u32,
}

impl Iterator for SymbolSetIter {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let symbol = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(symbol)
    }
}

impl BitAnd for SymbolSet {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for SymbolSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for SymbolSet {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl FromIterator<u8> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::empty();
        for symbol in iter {
            set.insert(symbol);
        }
        set
    }
}

impl fmt::Display for SymbolSet {
    /// Format a symbol set as "|0 2 3|".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for (i, symbol) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", symbol)?;
        }
        write!(f, "|")
    }
}
