//! File I/O around one relief render.

use anyhow::{Context, Result};
use relief_common::RasterTile;
use relief_renderer::style::RampConfig;
use relief_renderer::{png, ColorRamp, LayerSelection, ReliefPipeline, ShadingParameters};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// Everything needed to turn one input tile into one output image.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub layer: LayerSelection,
    pub ramp_file: Option<PathBuf>,
    pub ramp: Option<String>,
    pub params: ShadingParameters,
}

impl RenderJob {
    /// Render and write the selected layer. Returns the PNG size in bytes.
    pub fn run(&self) -> Result<usize> {
        let start = Instant::now();

        let ramp = load_ramp(self.ramp_file.as_deref(), self.ramp.as_deref())?;
        let tile = load_tile(&self.input)?;

        let layers = ReliefPipeline::new(ramp)
            .render_latest(&tile, &self.params)
            .context("Relief rendering failed")?;

        if layers.range.is_none() {
            tracing::warn!(input = %self.input.display(), "Input tile holds no elevation data");
        }

        let encoded = png::encode_tile(layers.layer(self.layer))?;
        fs::write(&self.output, &encoded)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        debug!(
            width = layers.width,
            height = layers.height,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Render job finished"
        );

        Ok(encoded.len())
    }
}

/// Read a PNG (or any format `image` understands) as RGBA.
pub fn load_tile(path: &Path) -> Result<RasterTile> {
    let img = image::open(path)
        .with_context(|| format!("Failed to read elevation tile {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    let tile = RasterTile::new(width as usize, height as usize, img.into_raw())?;
    Ok(tile)
}

/// The named ramp from `ramp_file`, its default ramp, or the built-in one.
pub fn load_ramp(ramp_file: Option<&Path>, name: Option<&str>) -> Result<ColorRamp> {
    let Some(path) = ramp_file else {
        return Ok(ColorRamp::elevation());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ramp file {}", path.display()))?;
    let config = RampConfig::from_json(&text)?;

    let ramp = match name {
        Some(name) => config.build_ramp(name)?,
        None => config.default_ramp()?,
    };
    debug!(path = %path.display(), classes = ramp.len(), "Loaded color ramp");
    Ok(ramp)
}
