//! Shaded, dynamically colored terrain rendering.
//!
//! Turns a terrain-RGB elevation tile into display-ready RGBA buffers:
//! - Elevation decoding (terrain-RGB, alpha 0 = no data)
//! - Per-tile min/max range
//! - Interpolated color ramp classification
//! - Analytic hillshade tinted by the ramp
//! - Alpha-aware multiply blending
//!
//! [`pipeline::ReliefPipeline`] runs all stages for one frame.

pub mod blend;
pub mod config;
pub mod decode;
pub mod hillshade;
pub mod pipeline;
pub mod png;
pub mod ramp;
pub mod range;
pub mod style;

pub use blend::blend_multiply;
pub use config::ShadingParameters;
pub use decode::{decode_elevation, ElevationField, ElevationSample};
pub use hillshade::compute_hillshade;
pub use pipeline::{FrameToken, LayerSelection, ReliefLayers, ReliefPipeline};
pub use ramp::{classify_field, ColorRamp, ELEVATION_RAMP};
pub use range::RangeStats;
pub use relief_common::{RasterTile, ReliefError, ReliefResult, Rgba};
