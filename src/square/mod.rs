// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Square primitives: the compile-time order, symbol bitsets, the N×N grid
//! and the traversal path.

pub mod constants;
pub mod grid;
pub mod path;
pub mod symbol_set;

pub use constants::{FULL_ORTHOGONALITY, MAX_ORDER, ORDER};
pub use grid::Square;
pub use path::{on_diagonal, Cell, KeyCell, Path};
pub use symbol_set::SymbolSet;
