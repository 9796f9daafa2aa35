//! Frame orchestration for the relief layers.
//!
//! One frame runs in two phases:
//!
//! ```text
//! RasterTile (terrain-RGB)
//!      │
//!      ▼
//! ElevationField::decode
//!      │
//!      ▼
//! RangeStats::compute            (reduce)
//!      │
//!      ├─► classify_field        (map, rows in parallel) ─► flat
//!      │
//!      └─► compute_hillshade     (map, rows in parallel) ─► shaded
//!                │
//!                ▼
//!      blend_multiply(flat, shaded) ─► blended
//! ```
//!
//! Hosts call [`ReliefPipeline::begin_frame`] whenever the view or the sun
//! changes. Older frames still running notice at their next row and stop
//! with [`ReliefError::Stale`], so a superseded result is never returned.

use crate::blend::blend_multiply;
use crate::config::ShadingParameters;
use crate::decode::ElevationField;
use crate::hillshade::compute_hillshade_with;
use crate::ramp::{classify_field_with, ColorRamp};
use crate::range::RangeStats;
use rayon::prelude::*;
use relief_common::tile::CHANNELS;
use relief_common::{RasterTile, ReliefError, ReliefResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

// ============================================================================
// Frame tokens
// ============================================================================

/// Handle identifying one frame; goes stale once a newer frame begins.
#[derive(Debug, Clone)]
pub struct FrameToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl FrameToken {
    /// A token with no pipeline behind it. It never goes stale.
    pub fn detached() -> Self {
        Self {
            generation: 0,
            current: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once a newer frame has been started.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.generation
    }

    /// `Err(Stale)` once a newer frame has been started.
    #[inline]
    pub fn check(&self) -> ReliefResult<()> {
        let current = self.current.load(Ordering::Acquire);
        if current != self.generation {
            return Err(ReliefError::Stale {
                generation: self.generation,
                current,
            });
        }
        Ok(())
    }
}

/// Allocate a `width * height` RGBA tile and fill it row by row in parallel.
///
/// Rows start transparent. `token` is checked before every row and once more
/// at the end, so a stale frame never yields a tile.
pub(crate) fn render_rows<F>(
    width: usize,
    height: usize,
    token: &FrameToken,
    fill_row: F,
) -> ReliefResult<RasterTile>
where
    F: Fn(usize, &mut [u8]) + Sync + Send,
{
    let mut pixels = RasterTile::transparent(width, height)?.into_bytes();

    if !pixels.is_empty() {
        pixels
            .par_chunks_mut(width * CHANNELS)
            .enumerate()
            .try_for_each(|(y, row)| {
                token.check()?;
                fill_row(y, row);
                Ok::<(), ReliefError>(())
            })?;
    }

    token.check()?;
    RasterTile::new(width, height, pixels)
}

// ============================================================================
// Layer selection
// ============================================================================

/// Which finished buffer a host displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerSelection {
    /// Elevation colors only.
    #[default]
    Dynamic,
    /// Elevation colors multiplied with the shaded layer.
    Hillshade,
    /// Shaded layer alone.
    #[serde(rename = "shade")]
    ShadeOnly,
}

impl LayerSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dynamic => "dynamic",
            Self::Hillshade => "hillshade",
            Self::ShadeOnly => "shade",
        }
    }
}

impl FromStr for LayerSelection {
    type Err = ReliefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dynamic" => Ok(Self::Dynamic),
            "hillshade" => Ok(Self::Hillshade),
            "shade" | "shade-only" | "shadeonly" => Ok(Self::ShadeOnly),
            other => Err(ReliefError::invalid_parameter(
                "layer",
                format!("unknown layer '{}', expected dynamic, hillshade or shade", other),
            )),
        }
    }
}

impl fmt::Display for LayerSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every buffer produced by one frame.
#[derive(Debug, Clone)]
pub struct ReliefLayers {
    pub width: usize,
    pub height: usize,
    /// Range of the unexaggerated field, `None` when it held no data.
    pub range: Option<RangeStats>,
    pub flat: RasterTile,
    pub shaded: RasterTile,
    pub blended: RasterTile,
}

impl ReliefLayers {
    pub fn layer(&self, selection: LayerSelection) -> &RasterTile {
        match selection {
            LayerSelection::Dynamic => &self.flat,
            LayerSelection::Hillshade => &self.blended,
            LayerSelection::ShadeOnly => &self.shaded,
        }
    }

    pub fn into_layer(self, selection: LayerSelection) -> RasterTile {
        match selection {
            LayerSelection::Dynamic => self.flat,
            LayerSelection::Hillshade => self.blended,
            LayerSelection::ShadeOnly => self.shaded,
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Renders relief layers frame by frame with stale-frame dropping.
///
/// The pipeline is `Sync`: one thread may call [`begin_frame`] while others
/// are still rendering earlier frames.
///
/// [`begin_frame`]: ReliefPipeline::begin_frame
#[derive(Debug)]
pub struct ReliefPipeline {
    ramp: ColorRamp,
    current: Arc<AtomicU64>,
}

impl Default for ReliefPipeline {
    fn default() -> Self {
        Self::new(ColorRamp::elevation())
    }
}

impl ReliefPipeline {
    pub fn new(ramp: ColorRamp) -> Self {
        Self {
            ramp,
            current: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    /// Generation of the newest frame started so far.
    pub fn current_generation(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    /// Start a new frame, making every earlier token stale.
    pub fn begin_frame(&self) -> FrameToken {
        let generation = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        FrameToken {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// Start a frame and render it.
    pub fn render_latest(
        &self,
        tile: &RasterTile,
        params: &ShadingParameters,
    ) -> ReliefResult<ReliefLayers> {
        let token = self.begin_frame();
        self.render(tile, params, &token)
    }

    /// Render all layers for `tile` under `token`.
    ///
    /// Parameters are validated and clamped once up front; the whole frame
    /// uses that one snapshot.
    pub fn render(
        &self,
        tile: &RasterTile,
        params: &ShadingParameters,
        token: &FrameToken,
    ) -> ReliefResult<ReliefLayers> {
        let start = Instant::now();
        let params = params.normalized()?;
        token.check()?;

        let field = ElevationField::decode(tile);
        let range = RangeStats::compute(&field);
        token.check()?;

        let (flat, shaded) = rayon::join(
            || classify_field_with(&field, range, &self.ramp, token),
            || compute_hillshade_with(&field, range, &params, &self.ramp, token),
        );
        let flat = flat.map_err(|e| log_stale(e, token))?;
        let shaded = shaded.map_err(|e| log_stale(e, token))?;

        let blended = blend_multiply(&flat, &shaded)?;
        token.check().map_err(|e| log_stale(e, token))?;

        tracing::debug!(
            generation = token.generation(),
            width = tile.width(),
            height = tile.height(),
            valid = field.valid_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Relief frame rendered"
        );

        Ok(ReliefLayers {
            width: tile.width(),
            height: tile.height(),
            range,
            flat,
            shaded,
            blended,
        })
    }
}

fn log_stale(err: ReliefError, token: &FrameToken) -> ReliefError {
    if err.is_stale() {
        tracing::debug!(generation = token.generation(), "Dropping stale relief frame");
    }
    err
}
