//! Relief renderer command line host.
//!
//! Reads a terrain-RGB PNG tile, renders the relief layers and writes the
//! selected one as PNG.

mod render;

use anyhow::Result;
use clap::Parser;
use relief_renderer::{LayerSelection, ShadingParameters};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use render::RenderJob;

#[derive(Parser, Debug)]
#[command(name = "relief-cli")]
#[command(about = "Render shaded relief from terrain-RGB tiles")]
struct Args {
    /// Terrain-RGB input tile (PNG)
    input: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "relief.png")]
    output: PathBuf,

    /// Layer to write: dynamic, hillshade or shade
    #[arg(short, long, default_value = "dynamic", env = "RELIEF_LAYER")]
    layer: LayerSelection,

    /// JSON ramp document (built-in elevation ramp if omitted)
    #[arg(long, env = "RELIEF_RAMP_FILE")]
    ramp_file: Option<PathBuf>,

    /// Ramp to use from the ramp document (its default ramp if omitted)
    #[arg(long, requires = "ramp_file")]
    ramp: Option<String>,

    /// Sun elevation in degrees [0, 90] (overrides SUN_ELEVATION_DEG)
    #[arg(long)]
    sun_elevation: Option<f64>,

    /// Sun azimuth in degrees [0, 360] (overrides SUN_AZIMUTH_DEG)
    #[arg(long)]
    sun_azimuth: Option<f64>,

    /// Vertical exaggeration (overrides VERTICAL_EXAGGERATION)
    #[arg(long)]
    exaggeration: Option<f64>,

    /// Ground resolution in meters per pixel (overrides GROUND_RESOLUTION)
    #[arg(long)]
    resolution: Option<f64>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    /// Environment settings with command line overrides on top.
    fn shading(&self) -> ShadingParameters {
        let mut params = ShadingParameters::from_env();
        if let Some(deg) = self.sun_elevation {
            params.sun_elevation_deg = deg;
        }
        if let Some(deg) = self.sun_azimuth {
            params.sun_azimuth_deg = deg;
        }
        if let Some(factor) = self.exaggeration {
            params.vertical_exaggeration = factor;
        }
        if let Some(res) = self.resolution {
            params.ground_resolution = res;
        }
        params
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder().with_max_level(level);
    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let job = RenderJob {
        input: args.input.clone(),
        output: args.output.clone(),
        layer: args.layer,
        ramp_file: args.ramp_file.clone(),
        ramp: args.ramp.clone(),
        params: args.shading(),
    };

    info!(
        input = %job.input.display(),
        layer = %job.layer,
        sun_elevation = job.params.sun_elevation_deg,
        sun_azimuth = job.params.sun_azimuth_deg,
        "Rendering relief"
    );

    let written = job.run()?;

    info!(output = %job.output.display(), size = written, "Relief written");
    Ok(())
}
