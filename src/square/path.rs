// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Traversal path and key cell.
//!
//! The [`Path`] is the fixed order in which the generator visits the cells
//! it fills. Diagonal cells are preset by the work unit and must not appear
//! on it; [`Path::diagonal_cell`] finds a violation so loaders can reject it.

use std::ops::Index;

/// A cell coordinate `(row, col)`.
pub type Cell = (usize, usize);

/// True if `cell` lies on the main or secondary diagonal of an order-`n` square.
#[inline]
pub fn on_diagonal(n: usize, (row, col): Cell) -> bool {
    row == col || row + col + 1 == n
}

/// Ordered sequence of cells visited by the square generator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Every off-diagonal cell of an order-`n` square from row `first_row`
    /// onwards, in row-major order.
    pub fn off_diagonal(n: usize, first_row: usize) -> Self {
        let cells = (first_row..n)
            .flat_map(|r| (0..n).map(move |c| (r, c)))
            .filter(|&cell| !on_diagonal(n, cell))
            .collect();
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// First cell on the path lying on a diagonal of an order-`n` square.
    pub fn diagonal_cell(&self, n: usize) -> Option<(usize, Cell)> {
        self.cells
            .iter()
            .copied()
            .enumerate()
            .find(|&(_, cell)| on_diagonal(n, cell))
    }

    /// First cell that appears twice, with the index of its second visit.
    pub fn repeated_cell(&self) -> Option<(usize, Cell)> {
        self.cells
            .iter()
            .enumerate()
            .find(|&(i, cell)| self.cells[..i].contains(cell))
            .map(|(i, &cell)| (i, cell))
    }

    /// Position of `cell` on the path.
    pub fn position(&self, cell: Cell) -> Option<usize> {
        self.cells.iter().position(|&c| c == cell)
    }
}

impl Index<usize> for Path {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.cells[index]
    }
}

/// The cell/value pair bounding a value-gated search.
///
/// With no value the search runs until the path is exhausted. With a value,
/// it stops as soon as the cell at `position` holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyCell {
    pub position: Option<Cell>,
    pub value: Option<u8>,
}

impl KeyCell {
    /// Exhaustion search: no stop value.
    pub const fn exhaustive() -> Self {
        Self {
            position: None,
            value: None,
        }
    }

    /// Value-gated search on `cell`.
    pub const fn gated(cell: Cell, value: u8) -> Self {
        Self {
            position: Some(cell),
            value: Some(value),
        }
    }

    /// The gate as a position/value pair, if both are set.
    pub fn target(&self) -> Option<(Cell, u8)> {
        self.position.zip(self.value)
    }
}
