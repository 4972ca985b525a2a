// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! `rake`: search one work unit for orthogonal diagonal Latin squares.
//!
//! The square order is fixed at compile time (see the `order_*` features).
//! The run starts from the checkpoint if there is a usable one, otherwise
//! from the work unit, and appends pairs to the results file.

use anyhow::Context;
use clap::Parser;
use rake_search::config::{
    SearchConfig, SearchFiles, DEFAULT_CHECKPOINT_INTERVAL, DEFAULT_ORTHO_CACHE_SIZE,
    DEFAULT_PREFIX_LEN,
};
use rake_search::coordinator::{Coordinator, Standalone};
use rake_search::engine::{Outcome, PairSearch, RakeSearch};
use rake_search::persist::ResultLog;
use rake_search::square::ORDER;
use rake_search::state::SearchState;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "rake")]
#[command(author = "Jeremy J. Carroll")]
#[command(version)]
#[command(about = "Search for pairs of orthogonal diagonal Latin squares")]
struct Cli {
    /// Work unit with the start parameters
    #[arg(long, default_value = "workunit.txt")]
    workunit: PathBuf,

    /// File that found pairs are appended to
    #[arg(long, default_value = "result.txt")]
    result: PathBuf,

    #[arg(long, default_value = "checkpoint.txt")]
    checkpoint: PathBuf,

    /// Minimum orthogonality degree to report [default: ORDER²]
    #[arg(long)]
    min_ortho_metric: Option<usize>,

    /// Squares between progress reports and checkpoint opportunities
    #[arg(long, default_value_t = DEFAULT_CHECKPOINT_INTERVAL)]
    checkpoint_interval: u64,

    /// Minimum seconds between checkpoints
    #[arg(long, default_value_t = 60)]
    checkpoint_period: u64,

    /// Mates kept per base square for the mutual orthogonality check
    #[arg(long, default_value_t = DEFAULT_ORTHO_CACHE_SIZE)]
    ortho_cache_size: usize,

    /// Path cells used to estimate progress
    #[arg(long, default_value_t = DEFAULT_PREFIX_LEN)]
    prefix_len: usize,

    /// Echo result blocks to the log at debug level
    #[arg(long)]
    echo: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let mut coordinator = Standalone::new(Duration::from_secs(cli.checkpoint_period));
    let files = SearchFiles {
        workunit: cli.workunit,
        result: cli.result,
        checkpoint: cli.checkpoint,
    }
    .resolve(&coordinator);

    let config = SearchConfig::for_order(ORDER)
        .with_min_ortho_metric(cli.min_ortho_metric.unwrap_or(ORDER * ORDER))
        .with_checkpoint_interval(cli.checkpoint_interval)
        .with_ortho_cache_size(cli.ortho_cache_size)
        .with_prefix_len(cli.prefix_len)
        .with_echo(cli.echo);

    let state = SearchState::<ORDER>::load_for_run(&files, &mut coordinator).with_context(|| {
        format!(
            "Loading search state from checkpoint {} or workunit {}",
            files.checkpoint.display(),
            files.workunit.display()
        )
    })?;

    let started = Instant::now();
    let handler = PairSearch::new(&config, ResultLog::new(&files.result, config.echo));
    let mut search = RakeSearch::new(state, handler, coordinator, config, &files.checkpoint);
    let outcome = search.run();
    let elapsed = started.elapsed();

    match outcome {
        Outcome::Finished(reason) => {
            tracing::info!(?reason, "Work unit complete in {:.3}s", elapsed.as_secs_f64())
        }
        Outcome::Suspended => {
            tracing::info!("Work unit suspended after {:.3}s", elapsed.as_secs_f64())
        }
    }

    let (_, _, mut coordinator) = search.into_parts();
    coordinator.finish(0);
    Ok(())
}
