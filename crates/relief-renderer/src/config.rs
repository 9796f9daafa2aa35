//! Illumination settings for a hillshade pass.

use relief_common::{ReliefError, ReliefResult};
use serde::{Deserialize, Serialize};

/// Sun position and terrain scaling for one render pass.
///
/// Hosts build a fresh value from their current control state for every
/// frame. A pass takes one snapshot at its start and never re-reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingParameters {
    /// Sun altitude above the horizon, degrees in [0, 90].
    pub sun_elevation_deg: f64,

    /// Sun direction, degrees in [0, 360].
    pub sun_azimuth_deg: f64,

    /// Multiplier applied to elevations before any relief math.
    pub vertical_exaggeration: f64,

    /// Ground distance covered by one pixel, meters.
    pub ground_resolution: f64,
}

impl Default for ShadingParameters {
    fn default() -> Self {
        Self {
            sun_elevation_deg: 45.0,
            sun_azimuth_deg: 135.0,
            vertical_exaggeration: 3.0,
            ground_resolution: 1.0,
        }
    }
}

impl ShadingParameters {
    /// Default sun and exaggeration at the given ground resolution.
    pub fn with_resolution(ground_resolution: f64) -> Self {
        Self {
            ground_resolution,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SUN_ELEVATION_DEG") {
            if let Ok(deg) = val.parse() {
                config.sun_elevation_deg = deg;
            }
        }

        if let Ok(val) = std::env::var("SUN_AZIMUTH_DEG") {
            if let Ok(deg) = val.parse() {
                config.sun_azimuth_deg = deg;
            }
        }

        if let Ok(val) = std::env::var("VERTICAL_EXAGGERATION") {
            if let Ok(factor) = val.parse() {
                config.vertical_exaggeration = factor;
            }
        }

        if let Ok(val) = std::env::var("GROUND_RESOLUTION") {
            if let Ok(res) = val.parse() {
                config.ground_resolution = res;
            }
        }

        config
    }

    /// Reject values no clamping can repair.
    pub fn validate(&self) -> ReliefResult<()> {
        if !self.sun_elevation_deg.is_finite() {
            return Err(ReliefError::invalid_parameter(
                "sun_elevation_deg",
                "must be finite",
            ));
        }

        if !self.sun_azimuth_deg.is_finite() {
            return Err(ReliefError::invalid_parameter(
                "sun_azimuth_deg",
                "must be finite",
            ));
        }

        if !self.vertical_exaggeration.is_finite() {
            return Err(ReliefError::invalid_parameter(
                "vertical_exaggeration",
                "must be finite",
            ));
        }

        if !self.ground_resolution.is_finite() || self.ground_resolution <= 0.0 {
            return Err(ReliefError::invalid_parameter(
                "ground_resolution",
                format!("must be a positive number of meters, got {}", self.ground_resolution),
            ));
        }

        Ok(())
    }

    /// Validate, then clamp the sun angles into their documented domains.
    pub fn normalized(&self) -> ReliefResult<Self> {
        self.validate()?;

        let mut params = *self;
        params.sun_elevation_deg = self.sun_elevation_deg.clamp(0.0, 90.0);
        params.sun_azimuth_deg = self.sun_azimuth_deg.clamp(0.0, 360.0);

        if params.sun_elevation_deg != self.sun_elevation_deg {
            tracing::warn!(
                requested = self.sun_elevation_deg,
                used = params.sun_elevation_deg,
                "Sun elevation clamped to [0, 90]"
            );
        }
        if params.sun_azimuth_deg != self.sun_azimuth_deg {
            tracing::warn!(
                requested = self.sun_azimuth_deg,
                used = params.sun_azimuth_deg,
                "Sun azimuth clamped to [0, 360]"
            );
        }

        Ok(params)
    }
}
