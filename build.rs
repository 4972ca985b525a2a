// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Build script validating the ORDER feature selection.
//!
//! Exactly zero or one `order_*` feature may be enabled. With none, the
//! order defaults to 10 (see `square::constants`).

const ORDER_FEATURES: [(&str, usize); 7] = [
    ("CARGO_FEATURE_ORDER_4", 4),
    ("CARGO_FEATURE_ORDER_5", 5),
    ("CARGO_FEATURE_ORDER_6", 6),
    ("CARGO_FEATURE_ORDER_7", 7),
    ("CARGO_FEATURE_ORDER_8", 8),
    ("CARGO_FEATURE_ORDER_9", 9),
    ("CARGO_FEATURE_ORDER_10", 10),
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let selected: Vec<usize> = ORDER_FEATURES
        .iter()
        .filter(|(var, _)| std::env::var_os(var).is_some())
        .map(|&(_, order)| order)
        .collect();

    if selected.len() > 1 {
        panic!(
            "At most one order_* feature may be enabled, found orders {:?}",
            selected
        );
    }
}
