//! Elevation color ramp and classification.
//!
//! A ramp is an ordered list of N colors, low to high. A normalized elevation
//! `t` in [0, 1] falls into class `floor(t * N)` (clamped to N - 1) and is
//! linearly blended toward the next class by the fractional remainder, so the
//! output is a continuous gradient rather than N flat bands.

use crate::decode::{ElevationField, ElevationSample};
use crate::pipeline::{render_rows, FrameToken};
use crate::range::RangeStats;
use relief_common::tile::CHANNELS;
use relief_common::{RasterTile, ReliefError, ReliefResult, Rgba};
use std::borrow::Cow;

/// Default 14-class elevation ramp: deep water blue through greens and
/// yellows to red summits.
pub static ELEVATION_RAMP: [[u8; 3]; 14] = [
    [0, 64, 128],
    [0, 128, 128],
    [0, 160, 64],
    [0, 176, 64],
    [0, 192, 64],
    [64, 192, 64],
    [128, 192, 64],
    [160, 192, 32],
    [192, 192, 32],
    [224, 160, 0],
    [255, 128, 0],
    [255, 64, 0],
    [255, 32, 0],
    [255, 0, 0],
];

/// An immutable ordered color ramp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRamp {
    colors: Cow<'static, [[u8; 3]]>,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::elevation()
    }
}

impl ColorRamp {
    /// The built-in 14-class elevation ramp.
    pub fn elevation() -> Self {
        Self {
            colors: Cow::Borrowed(&ELEVATION_RAMP),
        }
    }

    /// A ramp over caller-supplied colors, low to high.
    pub fn new(colors: Vec<[u8; 3]>) -> ReliefResult<Self> {
        if colors.is_empty() {
            return Err(ReliefError::invalid_ramp("a ramp needs at least one color"));
        }
        Ok(Self {
            colors: Cow::Owned(colors),
        })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    /// Class of a normalized elevation, in `0..len()`.
    #[inline]
    pub fn class_index(&self, normalized: f64) -> usize {
        let last = self.colors.len() - 1;
        let scaled = normalized.clamp(0.0, 1.0) * self.colors.len() as f64;
        (scaled.floor() as usize).min(last)
    }

    /// Interpolated opaque color for a normalized elevation.
    pub fn color_at(&self, normalized: f64) -> Rgba {
        let t = normalized.clamp(0.0, 1.0);
        let class = self.class_index(t);
        let upper = (class + 1).min(self.colors.len() - 1);
        let weight = t * self.colors.len() as f64 - class as f64;

        interpolate_color(self.colors[class], self.colors[upper], weight)
    }

    /// Color for one sample.
    ///
    /// NO_DATA and an empty range both come out transparent black.
    #[inline]
    pub fn classify(&self, sample: ElevationSample, range: Option<RangeStats>) -> Rgba {
        match (sample, range) {
            (Some(z), Some(range)) => self.color_at(range.normalize(z)),
            _ => Rgba::TRANSPARENT,
        }
    }
}

/// Linear color interpolation, rounded to the nearest channel value.
#[inline]
fn interpolate_color(lower: [u8; 3], upper: [u8; 3], weight: f64) -> Rgba {
    let mix = |c: usize| {
        (lower[c] as f64 * (1.0 - weight) + upper[c] as f64 * weight)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba::opaque(mix(0), mix(1), mix(2))
}

/// Render a whole field through the ramp.
///
/// `range` should come from [`RangeStats::compute`] over the same field.
pub fn classify_field(
    field: &ElevationField,
    range: Option<RangeStats>,
    ramp: &ColorRamp,
) -> ReliefResult<RasterTile> {
    classify_field_with(field, range, ramp, &FrameToken::detached())
}

/// [`classify_field`] that gives up as soon as `token` goes stale.
pub fn classify_field_with(
    field: &ElevationField,
    range: Option<RangeStats>,
    ramp: &ColorRamp,
    token: &FrameToken,
) -> ReliefResult<RasterTile> {
    let (width, height) = field.dimensions();
    if range.is_none() {
        tracing::debug!(width, height, "empty elevation range, flat layer is transparent");
        return RasterTile::transparent(width, height);
    }

    render_rows(width, height, token, |y, row| {
        for (px, &sample) in row.chunks_exact_mut(CHANNELS).zip(field.row(y)) {
            px.copy_from_slice(&ramp.classify(sample, range).to_bytes());
        }
    })
}
