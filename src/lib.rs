// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rust implementation of the RakeSearch for orthogonal diagonal Latin squares.
//!
//! A diagonal Latin square (DLS) of order N is an N×N Latin square whose main
//! and secondary diagonals are also permutations of the N symbols. Two
//! squares are orthogonal when superimposing them yields all N² ordered
//! pairs of symbols. The search generates DLS one by one and, for each, looks
//! for orthogonal mates among the squares obtained by permuting its rows.
//!
//! # Architecture
//!
//! ## Square generation
//!
//! An iterative depth-first search fills the cells of a fixed traversal path
//! with the lowest legal symbol, backtracking on dead ends. Diagonal cells
//! are preset by the work unit, which partitions the search space; legality
//! is a single AND of row, column and per-cell history bitsets.
//!
//! ## Mate search
//!
//! For each generated square A, a second iterative search permutes the rows
//! of A (keeping row 0 in place) to form squares B with repeat-free
//! diagonals, and scores each pair by its orthogonality degree.
//!
//! ## Persistence
//!
//! The whole generator state is a plain value, written as text to an
//! atomically replaced checkpoint file between base squares. Progress is
//! estimated from the position of the current path prefix in an ordered
//! list of all prefixes.
//!
//! # Example
//!
//! ```
//! use rake_search::engine::SquareGenerator;
//! use rake_search::square::{KeyCell, Path, Square};
//! use rake_search::state::SearchState;
//!
//! let a = Square::from_rows([[0, 1, 2, 3], [2, 3, 0, 1], [3, 2, 1, 0], [1, 0, 3, 2]]);
//! let state = SearchState::from_presets(a, Path::off_diagonal(4, 1), KeyCell::exhaustive()).unwrap();
//!
//! for square in SquareGenerator::new(state) {
//!     assert!(square.is_latin() && square.is_diagonal());
//! }
//! ```

pub mod config;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod persist;
pub mod square;
pub mod state;

// Re-export commonly used types
pub use config::{SearchConfig, SearchFiles};
pub use engine::{Outcome, RakeSearch, SquareGenerator};
pub use error::{RakeError, Result};
pub use square::{KeyCell, Path, Square, SymbolSet};
pub use state::SearchState;
