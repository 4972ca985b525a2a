// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Append-only log of discovered pairs.
//!
//! Each write opens the file in append mode, writes one complete block and
//! closes it, so after a crash the file is intact up to the last block.
//! Write failures are reported and otherwise ignored: losing output must not
//! stop the search.
//!
//! # Layout
//!
//! ```text
//! {
//! # ------------------------
//! # Detected pair for the square:
//! # Degree of orthogonality: 100
//! # ------------------------
//! <base square>
//! # ------------------------
//! <mate>
//!
//! <mate>
//!
//! # Square 0 # 1
//!
//! # Pairs found: 2
//! }
//! ```

use crate::square::Square;
use crate::state::{Counters, Statistics};
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

const RULE: &str = "# ------------------------";

/// The results file.
#[derive(Debug, Clone)]
pub struct ResultLog {
    path: PathBuf,
    echo: bool,
}

impl ResultLog {
    /// A log appending to `path`. With `echo`, every block is also emitted
    /// as a `debug` event.
    pub fn new(path: impl Into<PathBuf>, echo: bool) -> Self {
        Self {
            path: path.into(),
            echo,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Header block written with the first mate of a base square.
    pub fn pair_header<const N: usize>(&self, base: &Square<N>, degree: usize) {
        self.append(&format!(
            "{{\n{rule}\n# Detected pair for the square: \n\
             # Degree of orthogonality: {degree}\n{rule}\n{base}\n{rule}\n",
            rule = RULE,
            degree = degree,
            base = base,
        ));
    }

    /// One accepted mate followed by a blank line.
    pub fn mate<const N: usize>(&self, mate: &Square<N>) {
        self.append(&format!("{}\n\n", mate));
    }

    /// Mutually orthogonal cache indices and the pair count, closing the block.
    pub fn mutual_report(&self, mutual: &[(usize, usize)], pairs: u64) {
        let lines: String = mutual
            .iter()
            .map(|(i, j)| format!("# Square {} # {}\n", i, j))
            .collect();
        self.append(&format!("{}\n# Pairs found: {}\n}}\n", lines, pairs));
    }

    /// Search totals at the end of a run.
    pub fn totals(&self, statistics: &Statistics) {
        self.append(&format!(
            "{rule}\n# Total pairs found: {pairs}\n\
             # Total squares with pairs: {with_pairs}\n\
             # Processed {squares} squares\n{rule}\n",
            rule = RULE,
            pairs = statistics.get(Counters::TotalPairs),
            with_pairs = statistics.get(Counters::SquaresWithPairs),
            squares = statistics.get(Counters::Squares),
        ));
    }

    fn append(&self, text: &str) {
        if self.echo {
            tracing::debug!("\n{}", text);
        }
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(text.as_bytes()));
        if let Err(err) = result {
            tracing::error!(path = %self.path.display(), %err, "Error writing results file");
        }
    }
}
