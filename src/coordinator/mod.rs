// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The work-coordination service a search reports to.
//!
//! A distributed client resolves file names, receives progress, decides
//! when checkpoints are due and may ask the process to stop. The search only
//! sees this trait; [`Standalone`] is the implementation used when running
//! on its own.

pub mod standalone;

pub use standalone::Standalone;

use std::path::{Path, PathBuf};

pub trait Coordinator {
    /// Map a logical file name to the file actually used.
    fn resolve_filename(&self, logical: &Path) -> PathBuf;

    /// Report the completed fraction, in `[0.0, 1.0]`.
    fn fraction_done(&mut self, fraction: f64);

    /// True if a checkpoint should be written now.
    fn time_to_checkpoint(&mut self) -> bool;

    /// Acknowledge that a checkpoint has been written.
    fn checkpoint_completed(&mut self);

    /// True if the search should checkpoint and return.
    ///
    /// Asked between base squares.
    fn should_exit(&mut self) -> bool {
        false
    }

    /// Final exit status of the process.
    fn finish(&mut self, status: i32);
}
