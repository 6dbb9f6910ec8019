//! Shared test utilities for the travel-time renderer workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Tile and grid fixtures
//! - Synthetic sample sources and surfaces
//! - Travel-time generators
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{geographic_grid, LatticeSource};
//! ```

pub mod fixtures;
pub mod generators;
pub mod sources;

pub use fixtures::*;
pub use generators::*;
pub use sources::*;

/// Asserts `|left - right| <= epsilon`, comparing as `f64`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon) = ($left as f64, $right as f64, $epsilon as f64);
        assert!(
            (left - right).abs() <= epsilon,
            "assertion failed: {} is not within {} of {}",
            left,
            epsilon,
            right
        );
    }};
}

/// [`assert_approx_eq!`] on both members of a coordinate pair.
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($x1:expr, $y1:expr), ($x2:expr, $y2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($x1, $x2, $epsilon);
        $crate::assert_approx_eq!($y1, $y2, $epsilon);
    }};
}
