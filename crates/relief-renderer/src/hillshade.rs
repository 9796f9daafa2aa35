//! Shaded relief tinted by the elevation ramp.
//!
//! Gradients come from central differences over the 4-neighborhood with
//! edge-clamped indices, so border pixels see a zero gradient across the
//! edge. A pixel facing the sun (positive incidence) is left transparent so
//! the flat color layer shows through; a pixel turned away from it is
//! painted with its ramp color at full opacity.

use crate::config::ShadingParameters;
use crate::decode::ElevationField;
use crate::pipeline::{render_rows, FrameToken};
use crate::ramp::ColorRamp;
use crate::range::RangeStats;
use relief_common::tile::CHANNELS;
use relief_common::{RasterTile, ReliefResult, Rgba};
use std::f64::consts::{FRAC_PI_2, PI};
use std::time::Instant;

/// Sun direction with its trigonometry precomputed once per pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    pub sin_elevation: f64,
    pub cos_elevation: f64,
    pub azimuth_rad: f64,
}

impl SunPosition {
    pub fn from_degrees(elevation_deg: f64, azimuth_deg: f64) -> Self {
        let (sin_elevation, cos_elevation) = elevation_deg.to_radians().sin_cos();
        Self {
            sin_elevation,
            cos_elevation,
            azimuth_rad: azimuth_deg.to_radians(),
        }
    }
}

/// Local surface orientation and how squarely the sun hits it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illumination {
    /// Angle from horizontal, radians.
    pub slope: f64,
    /// Facing direction after compass remapping, radians.
    pub aspect: f64,
    /// Cosine of the angle between the surface normal and the sun.
    pub cos_incidence: f64,
}

impl Illumination {
    /// Evaluate the illumination model for a gradient.
    pub fn from_gradient(dzdx: f64, dzdy: f64, sun: &SunPosition) -> Self {
        let slope = (dzdx * dzdx + dzdy * dzdy).sqrt().atan();
        let aspect = remap_aspect(dzdy.atan2(-dzdx));
        let cos_incidence = sun.sin_elevation * slope.cos()
            + sun.cos_elevation * slope.sin() * (sun.azimuth_rad - aspect).cos();

        Self {
            slope,
            aspect,
            cos_incidence,
        }
    }

    /// True when the surface faces the sun.
    #[inline]
    pub fn is_lit(&self) -> bool {
        self.cos_incidence > 0.0
    }
}

/// Map a raw `atan2(dzdy, -dzdx)` angle into compass-relative form.
///
/// Three branches: the (pi/2, pi] interval does not reduce to the
/// `pi/2 - aspect` form used on either side of it.
// TODO: confirm against a reference renderer whether the (pi/2, pi] branch
// is intended or should share the `pi/2 - aspect` form.
#[inline]
pub fn remap_aspect(aspect: f64) -> f64 {
    if aspect < 0.0 {
        FRAC_PI_2 - aspect
    } else if aspect > FRAC_PI_2 {
        2.0 * PI - aspect + FRAC_PI_2
    } else {
        FRAC_PI_2 - aspect
    }
}

/// Render the shaded layer for a decoded (unexaggerated) field.
///
/// Vertical exaggeration is applied to every elevation before gradients and
/// before the range used for tinting is computed.
pub fn compute_hillshade(
    field: &ElevationField,
    params: &ShadingParameters,
    ramp: &ColorRamp,
) -> ReliefResult<RasterTile> {
    let range = RangeStats::compute(field);
    compute_hillshade_with(field, range, params, ramp, &FrameToken::detached())
}

/// [`compute_hillshade`] over a precomputed range that gives up as soon as
/// `token` goes stale.
///
/// `range` is the range of the unexaggerated `field`; it is scaled by the
/// exaggeration here rather than rescanned.
pub fn compute_hillshade_with(
    field: &ElevationField,
    range: Option<RangeStats>,
    params: &ShadingParameters,
    ramp: &ColorRamp,
    token: &FrameToken,
) -> ReliefResult<RasterTile> {
    let params = params.normalized()?;
    let start = Instant::now();
    let (width, height) = field.dimensions();

    let Some(range) = range.map(|r| r.scaled(params.vertical_exaggeration)) else {
        tracing::debug!(width, height, "empty elevation range, shaded layer is transparent");
        return RasterTile::transparent(width, height);
    };

    let relief = field.scaled(params.vertical_exaggeration);
    token.check()?;

    let sun = SunPosition::from_degrees(params.sun_elevation_deg, params.sun_azimuth_deg);
    let dp = 2.0 * params.ground_resolution;

    let tile = render_rows(width, height, token, |y, row| {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(height - 1);

        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let Some(center) = relief.get(x, y) else {
                continue;
            };
            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(width - 1);

            // Missing neighbors contribute no gradient on their side.
            let z = |sx: usize, sy: usize| relief.get(sx, sy).unwrap_or(center);

            let dzdx = (z(x1, y) - z(x0, y)) / dp;
            let dzdy = (z(x, y1) - z(x, y0)) / dp;

            let light = Illumination::from_gradient(dzdx, dzdy, &sun);
            let color = if light.is_lit() {
                Rgba::TRANSPARENT
            } else {
                ramp.color_at(range.normalize(center))
            };
            px.copy_from_slice(&color.to_bytes());
        }
    })?;

    tracing::debug!(
        width,
        height,
        min = range.min,
        max = range.max,
        sun_elevation = params.sun_elevation_deg,
        sun_azimuth = params.sun_azimuth_deg,
        elapsed_us = start.elapsed().as_micros() as u64,
        "Hillshade computed"
    );

    Ok(tile)
}
