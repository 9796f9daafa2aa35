//! Common types shared across the terrain relief crates.

pub mod error;
pub mod tile;

pub use error::{ReliefError, ReliefResult};
pub use tile::{RasterTile, Rgba};
