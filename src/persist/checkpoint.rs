// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Checkpoint and work unit text format.
//!
//! Work units and checkpoints share one format, so a checkpoint is simply a
//! work unit describing a later point of the same search. Bit-vectors are
//! written as `0`/`1` per symbol, `1` meaning free (or untried, for cell
//! histories).
//!
//! ```text
//! # RakeSearch of diagonal Latin squares
//!
//! <order>
//! { <order × order symbols, -1 for empty> }
//! <path length>
//! <row col> per path cell
//! <key row> <key col> <key value>        (-1 when unset)
//! <current row> <current col> <current path index>
//! <main diagonal flags>
//! <secondary diagonal flags>
//! <row flags: one line per row>
//! <column flags: one line per column>
//! <history flags: one block per symbol, one line per row>
//! <squares generated>
//! <pairs for current square> <total pairs> <squares with pairs>
//! ```
//!
//! Checkpoints are replaced atomically: the new state is written to a
//! temporary file in the same directory, which is then renamed over the old
//! one.

use crate::config::SearchFiles;
use crate::coordinator::Coordinator;
use crate::error::{RakeError, Result};
use crate::persist::tokens::TokenReader;
use crate::square::{Cell, KeyCell, Path, SymbolSet};
use crate::state::{Counters, SearchState, Statistics, UsageFlags};
use std::fmt;
use std::io::Write as _;
use std::path::Path as FsPath;
use tempfile::NamedTempFile;

/// First line of every work unit and checkpoint.
pub const HEADER: &str = "# RakeSearch of diagonal Latin squares";

/// Render `state` in checkpoint format.
pub fn to_text<const N: usize>(state: &SearchState<N>) -> String {
    CheckpointText(state).to_string()
}

/// Display adapter writing a state in checkpoint format.
struct CheckpointText<'a, const N: usize>(&'a SearchState<N>);

impl<const N: usize> fmt::Display for CheckpointText<'_, N> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_state(out, self.0)
    }
}

fn write_state<const N: usize>(
    out: &mut fmt::Formatter<'_>,
    state: &SearchState<N>,
) -> fmt::Result {
    writeln!(out, "{}", HEADER)?;
    writeln!(out)?;
    writeln!(out, "{}", N)?;
    writeln!(out, "{}", state.square)?;

    writeln!(out, "{}", state.path.len())?;
    writeln!(out)?;
    for &(r, c) in state.path.cells() {
        writeln!(out, "{} {} ", r, c)?;
    }
    writeln!(out)?;

    let (key_row, key_col) = optional_cell(state.key.position);
    let key_value = state.key.value.map_or(-1, i64::from);
    writeln!(out, "{} {} {}", key_row, key_col, key_value)?;
    let (row, col) = optional_cell(state.current_cell());
    writeln!(out, "{} {} {}", row, col, state.cell_id)?;
    writeln!(out)?;

    let flags = &state.flags;
    write_bits::<N>(out, flags.primary)?;
    write_bits::<N>(out, flags.secondary)?;
    writeln!(out)?;
    for set in &flags.rows {
        write_bits::<N>(out, *set)?;
    }
    writeln!(out)?;
    for set in &flags.cols {
        write_bits::<N>(out, *set)?;
    }
    writeln!(out)?;
    for symbol in 0..N as u8 {
        for row in &flags.history {
            for set in row {
                write!(out, "{} ", u8::from(set.contains(symbol)))?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    let stats = &state.statistics;
    writeln!(out, "{}", stats.get(Counters::Squares))?;
    writeln!(out)?;
    writeln!(
        out,
        "{} {} {}",
        stats.get(Counters::Pairs),
        stats.get(Counters::TotalPairs),
        stats.get(Counters::SquaresWithPairs)
    )?;
    writeln!(out)
}

fn optional_cell(cell: Option<Cell>) -> (i64, i64) {
    match cell {
        Some((r, c)) => (r as i64, c as i64),
        None => (-1, -1),
    }
}

fn write_bits<const N: usize>(out: &mut fmt::Formatter<'_>, set: SymbolSet) -> fmt::Result {
    for symbol in 0..N as u8 {
        write!(out, "{} ", u8::from(set.contains(symbol)))?;
    }
    writeln!(out)
}

/// Parse a state of order `N` from checkpoint text.
///
/// The state is validated and normalised (see
/// [`SearchState::normalize`]) before it is returned.
pub fn read_from<const N: usize>(text: &str) -> Result<SearchState<N>> {
    let mut reader = TokenReader::after_header(text, HEADER)?;

    let order = reader.next_i64("order")?;
    if order != N as i64 {
        return Err(RakeError::OrderMismatch {
            expected: N,
            found: usize::try_from(order).unwrap_or(0),
        });
    }
    let square = reader.next_square::<N>()?;

    let len = reader.next_below(N * N + 1, "path length")?;
    let mut cells = Vec::with_capacity(len);
    for _ in 0..len {
        let r = reader.next_below(N, "path row")?;
        let c = reader.next_below(N, "path column")?;
        cells.push((r, c));
    }
    let path = Path::new(cells);

    let key_row = reader.next_optional(N, "key row")?;
    let key_col = reader.next_optional(N, "key column")?;
    let key_value = reader.next_optional(N, "key value")?;
    let key = KeyCell {
        position: key_row.zip(key_col),
        value: key_value.map(|v| v as u8),
    };

    let row = reader.next_optional(N, "current row")?;
    let col = reader.next_optional(N, "current column")?;
    let cell_id = reader.next_below(len.max(1), "current path index")?;

    let mut flags = UsageFlags::<N>::new();
    flags.primary = read_bits::<N>(&mut reader, "main diagonal flags")?;
    flags.secondary = read_bits::<N>(&mut reader, "secondary diagonal flags")?;
    for set in flags.rows.iter_mut() {
        *set = read_bits::<N>(&mut reader, "row flags")?;
    }
    for set in flags.cols.iter_mut() {
        *set = read_bits::<N>(&mut reader, "column flags")?;
    }
    flags.history = [[SymbolSet::empty(); N]; N];
    for symbol in 0..N as u8 {
        for row in flags.history.iter_mut() {
            for set in row.iter_mut() {
                if reader.next_bit("history flags")? {
                    set.insert(symbol);
                }
            }
        }
    }

    let mut statistics = Statistics::new();
    statistics.set(Counters::Squares, reader.next_u64("squares count")?);
    statistics.set(Counters::Pairs, reader.next_u64("pairs count")?);
    statistics.set(Counters::TotalPairs, reader.next_u64("total pairs count")?);
    statistics.set(
        Counters::SquaresWithPairs,
        reader.next_u64("squares with pairs count")?,
    );

    let mut state = SearchState {
        square,
        path,
        key,
        cell_id,
        flags,
        statistics,
    };
    state.validate()?;
    let recorded = row.zip(col);
    if recorded != state.current_cell() {
        return Err(RakeError::InvalidPosition(format!(
            "current cell {:?} is not path cell {}",
            recorded, cell_id
        )));
    }
    state.normalize()?;
    Ok(state)
}

fn read_bits<const N: usize>(
    reader: &mut TokenReader<'_>,
    expected: &'static str,
) -> Result<SymbolSet> {
    let mut set = SymbolSet::empty();
    for symbol in 0..N as u8 {
        if reader.next_bit(expected)? {
            set.insert(symbol);
        }
    }
    Ok(set)
}

/// Read and parse a work unit or checkpoint file.
pub fn read_file<const N: usize>(path: &FsPath) -> Result<SearchState<N>> {
    let text = std::fs::read_to_string(path)?;
    read_from(&text)
}

/// Replace the file at `path` with `state`, atomically.
///
/// On failure the previous file is left untouched.
pub fn save_atomic<const N: usize>(state: &SearchState<N>, path: &FsPath) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => FsPath::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(to_text(state).as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}

impl<const N: usize> SearchState<N> {
    /// Load the state to start a run from.
    ///
    /// An existing checkpoint is preferred. If it cannot be read or is
    /// malformed, the work unit is used instead. A checkpoint describing an
    /// inconsistent state is an error.
    pub fn load(files: &SearchFiles) -> Result<Self> {
        if files.checkpoint.exists() {
            match read_file(&files.checkpoint) {
                Ok(state) => {
                    tracing::info!(path = %files.checkpoint.display(), "Starting from checkpoint");
                    return Ok(state);
                }
                Err(err) if err.is_consistency() => {
                    tracing::error!(
                        path = %files.checkpoint.display(),
                        %err,
                        "Inconsistent checkpoint file"
                    );
                    return Err(err);
                }
                Err(err) => tracing::warn!(
                    %err,
                    "Error reading checkpoint file! Starting with workunit start parameters."
                ),
            }
        }
        let state = read_file(&files.workunit).map_err(|err| {
            tracing::error!(path = %files.workunit.display(), %err, "Error reading workunit file");
            err
        })?;
        tracing::info!(path = %files.workunit.display(), "Starting from workunit");
        Ok(state)
    }

    /// Load the state for a run as [`load`](Self::load) does, refusing a
    /// checkpoint whose work unit is missing.
    ///
    /// If the run cannot start, the coordinator is finished with status -1.
    pub fn load_for_run(files: &SearchFiles, coordinator: &mut impl Coordinator) -> Result<Self> {
        let loaded = if files.checkpoint.exists() && !files.workunit.exists() {
            Err(RakeError::OrphanCheckpoint(files.checkpoint.clone()))
        } else {
            Self::load(files)
        };
        if loaded.is_err() {
            coordinator.finish(-1);
        }
        loaded
    }
}
