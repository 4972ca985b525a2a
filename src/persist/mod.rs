// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Everything a search writes or reads: checkpoints and work units, the
//! results log, and the progress estimate reported alongside checkpoints.

pub mod checkpoint;
pub mod progress;
pub mod results;
pub mod tokens;

pub use checkpoint::{read_file, read_from, save_atomic, to_text, HEADER};
pub use progress::PrefixProgress;
pub use results::ResultLog;
