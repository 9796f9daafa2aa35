//! Terrain-RGB elevation decoding.
//!
//! Elevation is packed into the color channels as
//! `-10000 + (R * 65536 + G * 256 + B) * 0.1` meters, giving 0.1 m steps over
//! a 1,677,721.5 m span. A pixel with alpha 0 carries no elevation.

use rayon::prelude::*;
use relief_common::tile::CHANNELS;
use relief_common::{RasterTile, Rgba};

/// Elevation of the lowest encodable value, in meters.
pub const ELEVATION_OFFSET: f64 = -10_000.0;

/// Quantization step of the encoding, in meters.
pub const ELEVATION_STEP: f64 = 0.1;

/// A decoded elevation in meters, or `None` for NO_DATA.
pub type ElevationSample = Option<f64>;

/// Decode one terrain-RGB pixel.
///
/// Total over the byte domain: every input maps to either an elevation or
/// NO_DATA.
#[inline]
pub fn decode_elevation(px: Rgba) -> ElevationSample {
    if px.a == 0 {
        return None;
    }
    let packed = ((px.r as u32) << 16) | ((px.g as u32) << 8) | px.b as u32;
    Some(ELEVATION_OFFSET + packed as f64 * ELEVATION_STEP)
}

/// Decoded elevations for every pixel of a tile, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationField {
    width: usize,
    height: usize,
    samples: Vec<ElevationSample>,
}

impl ElevationField {
    /// Decode every pixel of `tile`.
    pub fn decode(tile: &RasterTile) -> Self {
        let samples = tile
            .as_bytes()
            .par_chunks_exact(CHANNELS)
            .map(|px| decode_elevation(Rgba::from_slice(px)))
            .collect();

        Self {
            width: tile.width(),
            height: tile.height(),
            samples,
        }
    }

    /// Build a field directly from samples.
    ///
    /// Returns `None` when `samples.len() != width * height`.
    pub fn from_samples(width: usize, height: usize, samples: Vec<ElevationSample>) -> Option<Self> {
        if width.checked_mul(height)? != samples.len() {
            return None;
        }
        Some(Self {
            width,
            height,
            samples,
        })
    }

    /// Copy of the field with every valid elevation multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        if factor == 1.0 {
            return self.clone();
        }
        Self {
            width: self.width,
            height: self.height,
            samples: self.samples.par_iter().map(|s| s.map(|z| z * factor)).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn samples(&self) -> &[ElevationSample] {
        &self.samples
    }

    /// Sample at (x, y). Panics outside the field.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> ElevationSample {
        self.samples[y * self.width + x]
    }

    /// One row of samples.
    #[inline]
    pub fn row(&self, y: usize) -> &[ElevationSample] {
        let start = y * self.width;
        &self.samples[start..start + self.width]
    }

    /// Number of samples that carry an elevation.
    pub fn valid_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_some()).count()
    }
}
