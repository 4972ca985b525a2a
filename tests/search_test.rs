// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! End-to-end runs of the search driver.

mod common;

use common::{order6_state, RecordingHandler, ScriptedCoordinator};
use rake_search::config::{SearchConfig, SearchFiles};
use rake_search::coordinator::Standalone;
use rake_search::engine::{Outcome, PairSearch, RakeSearch, StopReason};
use rake_search::persist::ResultLog;
use rake_search::square::KeyCell;
use rake_search::state::{Counters, SearchState};
use tempfile::TempDir;

fn files_in(dir: &TempDir) -> SearchFiles {
    SearchFiles {
        workunit: dir.path().join("workunit.txt"),
        result: dir.path().join("result.txt"),
        checkpoint: dir.path().join("checkpoint.txt"),
    }
}

fn config() -> SearchConfig {
    SearchConfig::for_order(6)
        .with_min_ortho_metric(30)
        .with_checkpoint_interval(1)
        .with_prefix_len(3)
}

#[test]
fn test_pair_search_run() {
    let dir = tempfile::tempdir().unwrap();
    let files = files_in(&dir);
    let config = config();
    let handler = PairSearch::new(&config, ResultLog::new(&files.result, false));
    let mut search = RakeSearch::new(
        order6_state(KeyCell::exhaustive()),
        handler,
        Standalone::default(),
        config,
        &files.checkpoint,
    );

    assert_eq!(search.run(), Outcome::Finished(StopReason::Exhausted));
    let stats = search.statistics();
    assert_eq!(stats.get(Counters::Squares), 8);
    assert_eq!(stats.get(Counters::TotalPairs), 4);
    assert_eq!(stats.get(Counters::SquaresWithPairs), 3);
    assert_eq!(search.coordinator().fraction(), 1.0);

    let text = std::fs::read_to_string(&files.result).unwrap();
    assert_eq!(text.matches("# Detected pair for the square: ").count(), 3);
    assert_eq!(text.matches("# Degree of orthogonality: 30\n").count(), 3);
    assert!(text.contains("# Pairs found: 2\n"));
    // No two order 6 squares are fully orthogonal.
    assert!(!text.contains("# Square "));
    assert!(text.ends_with(
        "# Total pairs found: 4\n\
         # Total squares with pairs: 3\n\
         # Processed 8 squares\n\
         # ------------------------\n"
    ));
}

#[test]
fn test_value_gated_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut search = RakeSearch::new(
        order6_state(KeyCell::gated((0, 1), 5)),
        RecordingHandler::default(),
        ScriptedCoordinator::default(),
        config(),
        dir.path().join("checkpoint.txt"),
    );
    assert_eq!(search.run(), Outcome::Finished(StopReason::KeyReached));
    assert_eq!(search.handler().squares.len(), 4);
    assert!(search.handler().finished);
}

#[test]
fn test_suspend_and_resume_matches_uninterrupted() {
    let full_dir = tempfile::tempdir().unwrap();
    let mut full = RakeSearch::new(
        order6_state(KeyCell::exhaustive()),
        RecordingHandler::default(),
        ScriptedCoordinator::default(),
        config(),
        full_dir.path().join("checkpoint.txt"),
    );
    assert_eq!(full.run(), Outcome::Finished(StopReason::Exhausted));
    let (_, all, _) = full.into_parts();

    let dir = tempfile::tempdir().unwrap();
    let files = files_in(&dir);
    let mut first = RakeSearch::new(
        order6_state(KeyCell::exhaustive()),
        RecordingHandler::default(),
        ScriptedCoordinator::exiting_after(3),
        config(),
        &files.checkpoint,
    );
    assert_eq!(first.run(), Outcome::Suspended);
    let (_, head, coordinator) = first.into_parts();
    assert_eq!(head.squares.len(), 3);
    assert!(!head.finished);
    assert!(coordinator.checkpoints > 0);

    // The checkpoint is preferred over the work unit.
    std::fs::write(&files.workunit, "not a work unit").unwrap();
    let state = SearchState::<6>::load(&files).unwrap();
    assert_eq!(state.statistics.get(Counters::Squares), 3);

    let mut second = RakeSearch::new(
        state,
        RecordingHandler::default(),
        ScriptedCoordinator::default(),
        config(),
        &files.checkpoint,
    );
    assert_eq!(second.run(), Outcome::Finished(StopReason::Exhausted));
    assert_eq!(second.statistics().get(Counters::Squares), 8);
    let (_, tail, _) = second.into_parts();

    assert_eq!([head.squares, tail.squares].concat(), all.squares);
}

#[test]
fn test_resumed_results_match_uninterrupted() {
    let run = |exit_after: Option<usize>| -> String {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(&dir);
        let config = config();
        let mut state = order6_state(KeyCell::exhaustive());
        let mut coordinator = ScriptedCoordinator {
            exit_after,
            ..ScriptedCoordinator::default()
        };
        loop {
            let handler = PairSearch::new(&config, ResultLog::new(&files.result, false));
            let mut search =
                RakeSearch::new(state, handler, coordinator, config.clone(), &files.checkpoint);
            match search.run() {
                Outcome::Finished(_) => break,
                Outcome::Suspended => {
                    coordinator = ScriptedCoordinator::default();
                    state = SearchState::load(&files).unwrap();
                }
            }
        }
        std::fs::read_to_string(&files.result).unwrap()
    };

    let uninterrupted = run(None);
    for exit_after in 1..=7 {
        assert_eq!(run(Some(exit_after)), uninterrupted, "exit after {}", exit_after);
    }
}

#[test]
fn test_progress_is_monotonic() {
    let dir = tempfile::tempdir().unwrap();
    let mut search = RakeSearch::new(
        order6_state(KeyCell::exhaustive()),
        RecordingHandler::default(),
        ScriptedCoordinator::default(),
        config(),
        dir.path().join("checkpoint.txt"),
    );
    search.run();
    let coordinator = search.coordinator();

    // One report per square plus the final one.
    assert_eq!(coordinator.fractions.len(), 9);
    assert!(coordinator.fractions.windows(2).all(|w| w[0] <= w[1]));
    assert!(coordinator.fractions[0] > 0.0);
    assert_eq!(coordinator.fractions.last(), Some(&1.0));
    assert_eq!(coordinator.checkpoints, 8);
}

#[test]
fn test_handler_can_suspend() {
    let dir = tempfile::tempdir().unwrap();
    let checkpoint = dir.path().join("checkpoint.txt");
    let handler = RecordingHandler {
        suspend_after: Some(2),
        ..RecordingHandler::default()
    };
    let mut search = RakeSearch::new(
        order6_state(KeyCell::exhaustive()),
        handler,
        ScriptedCoordinator::default(),
        config().with_checkpoint_interval(1000),
        &checkpoint,
    );
    assert_eq!(search.run(), Outcome::Suspended);
    assert!(checkpoint.exists());
    assert_eq!(search.handler().squares.len(), 2);
    // The suspension checkpoint is the only one.
    assert_eq!(search.coordinator().checkpoints, 1);
}

#[test]
fn test_failed_checkpoint_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut search = RakeSearch::new(
        order6_state(KeyCell::exhaustive()),
        RecordingHandler::default(),
        ScriptedCoordinator::exiting_after(1),
        config(),
        dir.path().join("missing").join("checkpoint.txt"),
    );
    assert_eq!(search.run(), Outcome::Suspended);
    assert_eq!(search.coordinator().checkpoints, 0);
    assert!(!search.write_checkpoint());
}

#[test]
fn test_zero_interval_reports_every_square() {
    let dir = tempfile::tempdir().unwrap();
    let config = SearchConfig {
        checkpoint_interval: 0,
        ..config()
    };
    let mut search = RakeSearch::new(
        order6_state(KeyCell::exhaustive()),
        RecordingHandler::default(),
        ScriptedCoordinator::default(),
        config,
        dir.path().join("checkpoint.txt"),
    );
    assert_eq!(search.run(), Outcome::Finished(StopReason::Exhausted));
    assert_eq!(search.coordinator().fractions.len(), 9);
}
