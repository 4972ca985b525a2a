// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for loading and saving search state.
//!
//! The search state machines never fail; errors arise only at the edges,
//! when reading work units and checkpoints or writing files. They fall in
//! three groups:
//!
//! - **Format** errors: malformed or truncated text. A checkpoint with a
//!   format error is abandoned in favour of the work unit.
//! - **Consistency** errors: well-formed text describing an impossible
//!   state, such as a diagonal cell on the path. The load is aborted.
//! - **I/O** errors: files that cannot be opened, read or replaced.

use crate::square::Cell;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for state loading and persistence.
pub type Result<T> = std::result::Result<T, RakeError>;

#[derive(Error, Debug)]
pub enum RakeError {
    // ========== Format Errors ==========
    /// The header marker line was never found.
    #[error("Header marker not found before end of stream")]
    MissingHeader,

    /// The stream ended while more tokens were expected.
    #[error("Unexpected end of stream while reading {expected}")]
    UnexpectedEof { expected: &'static str },

    /// A token could not be parsed as the expected kind of value.
    #[error("Bad token {token:?} while reading {expected}")]
    BadToken {
        token: String,
        expected: &'static str,
    },

    /// The file describes squares of a different order.
    #[error("Order mismatch: expected {expected}, found {found}")]
    OrderMismatch { expected: usize, found: usize },

    /// A number is outside the range allowed at its position.
    #[error("Value {value} out of range for {what}")]
    OutOfRange { what: &'static str, value: i64 },

    // ========== Consistency Errors ==========
    /// The path visits a preset diagonal cell.
    #[error("Cell on diagonal in path: index {index} at {cell:?}")]
    DiagonalCellInPath { index: usize, cell: Cell },

    /// The path visits the same cell twice.
    #[error("Path repeats cell {cell:?} at index {index}")]
    RepeatedPathCell { index: usize, cell: Cell },

    /// A cell that is neither on the path nor preset.
    #[error("Cell {cell:?} is off the path but has no value")]
    UnassignedCell { cell: Cell },

    /// Preset cells repeat a symbol in a row, column or diagonal.
    #[error("Preset values conflict: {0}")]
    ConflictingPresets(String),

    /// The recorded position does not match the path.
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    /// Recorded usage flags disagree with the square.
    #[error("Usage flags disagree with the square: {0}")]
    FlagsMismatch(String),

    /// A checkpoint is present but the work unit it continues is not.
    #[error("Detected a checkpoint file {} without workunit file", .0.display())]
    OrphanCheckpoint(PathBuf),

    // ========== I/O Errors ==========
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RakeError {
    /// True for malformed or truncated input, recoverable by falling back
    /// to the work unit.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Self::MissingHeader
                | Self::UnexpectedEof { .. }
                | Self::BadToken { .. }
                | Self::OrderMismatch { .. }
                | Self::OutOfRange { .. }
        )
    }

    /// True for well-formed input describing an impossible search state.
    pub fn is_consistency(&self) -> bool {
        matches!(
            self,
            Self::DiagonalCellInPath { .. }
                | Self::RepeatedPathCell { .. }
                | Self::UnassignedCell { .. }
                | Self::ConflictingPresets(_)
                | Self::InvalidPosition(_)
                | Self::FlagsMismatch(_)
                | Self::OrphanCheckpoint(_)
        )
    }
}

impl From<tempfile::PersistError> for RakeError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}
