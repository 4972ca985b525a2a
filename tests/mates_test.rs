// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mate search and pair acceptance against known counts.

mod common;

use common::{diagonal_presets, order6_state, start_state};
use rake_search::engine::{MateSearch, PairCollector, SquareGenerator};
use rake_search::square::{KeyCell, Square};
use rake_search::state::{Counters, Statistics};

/// Pairs and squares-with-pairs over every order-`N` square, at `threshold`.
fn count_pairs<const N: usize>(threshold: usize) -> (u64, u64) {
    let mut stats = Statistics::new();
    let mut mates = MateSearch::<N>::new();
    let mut collector = PairCollector::<N>::new(threshold, 128);
    for preset in diagonal_presets::<N>() {
        for a in SquareGenerator::new(start_state(preset, KeyCell::exhaustive())) {
            collector.begin(&mut stats);
            mates.for_each_candidate(&a, |b| {
                if collector.consider(&a, b, &mut stats).is_some() {
                    assert!(a.ortho_degree(b) >= threshold);
                    assert!(b.is_latin() && b.is_diagonal());
                }
            });
        }
    }
    (
        stats.get(Counters::TotalPairs),
        stats.get(Counters::SquaresWithPairs),
    )
}

#[test]
fn test_example_pair_order_4() {
    let a = Square::from_rows([[0, 1, 2, 3], [2, 3, 0, 1], [3, 2, 1, 0], [1, 0, 3, 2]]);
    let b = Square::from_rows([[0, 1, 2, 3], [3, 2, 1, 0], [1, 0, 3, 2], [2, 3, 0, 1]]);

    let mut found = Vec::new();
    MateSearch::new().for_each_candidate(&a, |mate| found.push(*mate));
    assert_eq!(found, vec![b]);
    assert_eq!(a.ortho_degree(&b), 16);
    assert_eq!(b.ortho_degree(&a), 16);

    let mut stats = Statistics::new();
    let mut full = PairCollector::new(16, 128);
    full.begin(&mut stats);
    assert!(full.consider(&a, &b, &mut stats).is_some());

    let mut partial = PairCollector::new(12, 128);
    partial.begin(&mut stats);
    assert!(partial.consider(&a, &b, &mut stats).is_some());
}

#[test]
fn test_full_pairs_order_4() {
    assert_eq!(count_pairs::<4>(16), (2, 2));
}

#[test]
fn test_full_pairs_order_5() {
    assert_eq!(count_pairs::<5>(25), (4, 4));
}

#[test]
fn test_no_full_pairs_order_6() {
    assert_eq!(count_pairs::<6>(36), (0, 0));
}

#[test]
fn test_partial_pairs_order_6() {
    assert_eq!(count_pairs::<6>(30), (32, 24));
    // Every candidate scores 22 or 30.
    assert_eq!(count_pairs::<6>(22).0, 72);
    assert_eq!(count_pairs::<6>(23).0, 32);
}

#[test]
fn test_order_6_fixture_degrees() {
    let mut mates = MateSearch::<6>::new();
    let degrees: Vec<Vec<usize>> = SquareGenerator::new(order6_state(KeyCell::exhaustive()))
        .map(|a| {
            let mut degrees = Vec::new();
            mates.for_each_candidate(&a, |b| degrees.push(a.ortho_degree(b)));
            degrees
        })
        .collect();
    assert_eq!(
        degrees,
        vec![
            vec![],
            vec![22, 30],
            vec![30, 30, 22],
            vec![],
            vec![30, 22],
            vec![],
            vec![],
            vec![22, 22],
        ]
    );
}

#[test]
fn test_degree_symmetric() {
    for a in SquareGenerator::new(order6_state(KeyCell::exhaustive())) {
        let mut mates = MateSearch::<6>::new();
        mates.for_each_candidate(&a, |b| assert_eq!(a.ortho_degree(b), b.ortho_degree(&a)));
    }
}
