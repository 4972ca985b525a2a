// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compile-time constants for the square order.
//!
//! The library types are const-generic over the order, but the search binary
//! works with a single order chosen at compile time via cargo features.
//!
//! # Supported ORDER values
//!
//! - 4 to 9: small orders, useful for checking results against known counts
//! - 10: the order the distributed search runs at - **default**
//!
//! # Example
//!
//! ```bash
//! # Default: ORDER=10
//! cargo build --release
//!
//! # Build for ORDER=8
//! cargo build --release --features order_8
//! ```

/// Order of the squares searched by the `rake` binary.
///
/// This is configurable at compile time via cargo features:
/// - `order_4` → ORDER=4
/// - ...
/// - `order_10` → ORDER=10 (explicit)
/// - (default) → ORDER=10 (when no feature specified)
#[cfg(not(any(
    feature = "order_4",
    feature = "order_5",
    feature = "order_6",
    feature = "order_7",
    feature = "order_8",
    feature = "order_9",
    feature = "order_10"
)))]
pub const ORDER: usize = 10;

#[cfg(feature = "order_4")]
pub const ORDER: usize = 4;

#[cfg(feature = "order_5")]
pub const ORDER: usize = 5;

#[cfg(feature = "order_6")]
pub const ORDER: usize = 6;

#[cfg(feature = "order_7")]
pub const ORDER: usize = 7;

#[cfg(feature = "order_8")]
pub const ORDER: usize = 8;

#[cfg(feature = "order_9")]
pub const ORDER: usize = 9;

#[cfg(feature = "order_10")]
pub const ORDER: usize = 10;

/// Largest order a [`SymbolSet`](super::SymbolSet) can describe (one bit per symbol).
pub const MAX_ORDER: usize = 32;

/// Orthogonality degree of a fully orthogonal pair at the compiled order.
pub const FULL_ORTHOGONALITY: usize = ORDER * ORDER;

const _: () = assert!(ORDER >= 1 && ORDER <= MAX_ORDER);
