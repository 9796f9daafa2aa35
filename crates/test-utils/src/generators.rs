//! Test data generators for synthetic terrain.
//!
//! Surfaces are produced as row-major `Vec<Option<f64>>` elevation grids
//! (`None` = no data) and turned into terrain-RGB tiles with
//! [`elevation_tile`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use relief_common::{RasterTile, Rgba};

/// Largest terrain-RGB payload (24 bits).
const MAX_PACKED: u32 = 0x00FF_FFFF;

/// Encodes an elevation in meters as an opaque terrain-RGB pixel.
///
/// Uses `-10000 + packed * 0.1`; values outside the encodable range are
/// clamped.
///
/// # Example
///
/// ```
/// use test_utils::encode_terrain_rgb;
///
/// let px = encode_terrain_rgb(0.0);
/// assert_eq!((px.r, px.g, px.b, px.a), (0x01, 0x86, 0xA0, 255));
/// ```
pub fn encode_terrain_rgb(meters: f64) -> Rgba {
    let steps = ((meters + 10_000.0) * 10.0).round();
    let packed = steps.clamp(0.0, MAX_PACKED as f64) as u32;
    Rgba::opaque((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
}

/// Builds a terrain-RGB tile from an elevation grid.
///
/// `None` samples become transparent (no-data) pixels.
///
/// # Panics
///
/// Panics if `elevations.len() != width * height`.
pub fn elevation_tile(width: usize, height: usize, elevations: &[Option<f64>]) -> RasterTile {
    assert_eq!(
        elevations.len(),
        width * height,
        "elevation grid does not match {}x{}",
        width,
        height
    );
    let pixels: Vec<Rgba> = elevations
        .iter()
        .map(|z| z.map(encode_terrain_rgb).unwrap_or(Rgba::TRANSPARENT))
        .collect();
    RasterTile::from_pixels(width, height, &pixels).expect("valid tile dimensions")
}

/// Creates a tilted plane: `origin + dx * col + dy * row`.
///
/// # Example
///
/// ```
/// use test_utils::create_plane;
///
/// let grid = create_plane(3, 2, 100.0, 10.0, 1.0);
/// assert_eq!(grid[0], Some(100.0));
/// assert_eq!(grid[2], Some(120.0));
/// assert_eq!(grid[3], Some(101.0));
/// ```
pub fn create_plane(width: usize, height: usize, origin: f64, dx: f64, dy: f64) -> Vec<Option<f64>> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(Some(origin + dx * col as f64 + dy * row as f64));
        }
    }
    data
}

/// Creates a cone-shaped mountain centered in the grid.
///
/// Elevation falls linearly from `peak` at the center to `base` at the
/// corners.
pub fn create_cone(width: usize, height: usize, base: f64, peak: f64) -> Vec<Option<f64>> {
    let center_x = (width as f64 - 1.0) / 2.0;
    let center_y = (height as f64 - 1.0) / 2.0;
    let max_dist = (center_x * center_x + center_y * center_y).sqrt().max(1.0);

    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - center_x;
            let dy = row as f64 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();
            data.push(Some(peak - (peak - base) * (dist / max_dist)));
        }
    }
    data
}

/// Creates rolling terrain with seeded random noise.
///
/// The same seed always yields the same grid.
pub fn create_rolling_terrain(width: usize, height: usize, seed: u64) -> Vec<Option<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hills = (col as f64 * 0.05).sin() * 300.0 + (row as f64 * 0.08).cos() * 200.0;
            let noise: f64 = rng.gen_range(-5.0..5.0);
            data.push(Some(800.0 + hills + noise));
        }
    }
    data
}

/// Marks every `every`-th sample as no data.
pub fn punch_holes(data: &mut [Option<f64>], every: usize) {
    if every == 0 {
        return;
    }
    for sample in data.iter_mut().step_by(every) {
        *sample = None;
    }
}

/// Generates random opaque RGBA pixel data.
pub fn create_random_rgba(width: usize, height: usize, seed: u64) -> RasterTile {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; width * height * 4];
    for chunk in data.chunks_mut(4) {
        chunk[0] = rng.gen(); // R
        chunk[1] = rng.gen(); // G
        chunk[2] = rng.gen(); // B
        chunk[3] = 255; // A (fully opaque)
    }
    RasterTile::new(width, height, data).expect("valid tile dimensions")
}
