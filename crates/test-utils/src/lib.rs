//! Shared test utilities for the terrain relief workspace.
//!
//! This crate provides common testing infrastructure including:
//! - A reference terrain-RGB encoder
//! - Synthetic elevation surfaces and tiles built from them
//! - Common test fixtures
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
//! use test_utils::{assert_approx_eq, elevation_tile, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use generators::*;

/// Assert two elevations (or any floats) agree within `epsilon`.
///
/// Terrain-RGB quantizes to 0.1 m, so decoded values are usually compared
/// with an epsilon of half a step.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(8848.9, 8848.86, 0.05);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert that a pixel is fully transparent black.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_transparent;
///
/// assert_transparent!(tile.pixel(0, 0).unwrap());
/// ```
#[macro_export]
macro_rules! assert_transparent {
    ($px:expr) => {{
        let px = $px;
        assert_eq!(
            px.to_bytes(),
            [0, 0, 0, 0],
            "expected a transparent pixel, got {:?}",
            px
        );
    }};
}
