//! Common test fixtures for relief tests.
//!
//! This module provides pre-defined inputs that represent common
//! scenarios in terrain rendering.

/// Common tile sizes for testing.
pub mod sizes {
    /// Standard web map tile
    pub const TILE_256: (usize, usize) = (256, 256);

    /// High-DPI web map tile
    pub const TILE_512: (usize, usize) = (512, 512);

    /// Single pixel
    pub const SINGLE: (usize, usize) = (1, 1);

    /// One row, no vertical neighbors
    pub const STRIP: (usize, usize) = (8, 1);
}

/// Sun positions as (elevation_deg, azimuth_deg).
pub mod sun {
    /// Default sun: 45° high in the south-east
    pub const DEFAULT: (f64, f64) = (45.0, 135.0);

    /// Classic cartographic north-west light
    pub const NORTH_WEST: (f64, f64) = (45.0, 315.0);

    /// Sun on the horizon
    pub const HORIZON: (f64, f64) = (0.0, 135.0);

    /// Sun straight overhead
    pub const ZENITH: (f64, f64) = (90.0, 0.0);
}

/// The 2x2 hillshade scenario: four elevations in meters, row-major.
pub mod scenario_2x2 {
    pub const WIDTH: usize = 2;
    pub const HEIGHT: usize = 2;
    pub const ELEVATIONS: [f64; 4] = [100.0, 200.0, 150.0, 1900.0];
    pub const EXAGGERATION: f64 = 3.0;
    pub const RESOLUTION: f64 = 10.0;

    /// Elevations wrapped as present samples.
    pub fn samples() -> Vec<Option<f64>> {
        ELEVATIONS.iter().copied().map(Some).collect()
    }
}

/// Elevation values around the edges of the terrain-RGB domain.
pub mod elevations {
    /// Lowest encodable elevation
    pub const MIN: f64 = -10_000.0;

    /// Sea level
    pub const SEA_LEVEL: f64 = 0.0;

    /// Mount Everest
    pub const EVEREST: f64 = 8848.86;

    /// Dead Sea shore
    pub const DEAD_SEA: f64 = -430.5;

    /// Top of the range used by round-trip checks
    pub const ROUND_TRIP_MAX: f64 = 6553.5;
}
