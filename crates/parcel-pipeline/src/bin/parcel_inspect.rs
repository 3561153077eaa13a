//! Batch inspection tool for parcel datasets.
//!
//! Walks a dataset root, pairs each GeoTIFF with its boundary files, runs
//! the alignment pipeline on every raster and prints a per-scene summary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use parcel_grid::{CropPolicy, DownsampleMethod};
use parcel_pipeline::{discover_dataset, run_batch, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "parcel-inspect")]
#[command(about = "Align parcel boundaries with their orthophoto rasters")]
struct Args {
    /// Dataset root containing <field>/<raster>.tif and <field>/Numbers/*.kml
    root: PathBuf,

    /// Crop policy: tight, margin, square, or none
    #[arg(long, default_value = "tight")]
    crop: String,

    /// Margin fraction when --crop margin is selected
    #[arg(long, default_value = "0.1")]
    margin: f64,

    /// Rotate each scene by this many degrees
    #[arg(long)]
    rotate: Option<f64>,

    /// Number of factor-of-2 downsample passes
    #[arg(long, default_value = "0")]
    downsample: u8,

    /// Downsample method: mean, max, or nearest
    #[arg(long, default_value = "mean")]
    method: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let crop = match args.crop.to_lowercase().as_str() {
        "tight" => Some(CropPolicy::Tight),
        "margin" => Some(CropPolicy::Margin(args.margin)),
        "square" => Some(CropPolicy::SquareAboutCentroid),
        "none" => None,
        other => anyhow::bail!("unknown crop policy: {other}"),
    };

    let method = match args.method.to_lowercase().as_str() {
        "mean" => DownsampleMethod::Mean,
        "max" => DownsampleMethod::Max,
        "nearest" => DownsampleMethod::Nearest,
        other => anyhow::bail!("unknown downsample method: {other}"),
    };

    let config = PipelineConfig {
        crop,
        rotation_deg: args.rotate,
        downsample_levels: args.downsample,
        downsample_method: method,
    };

    let entries = discover_dataset(&args.root);
    info!(rasters = entries.len(), root = %args.root.display(), "dataset discovered");

    let summary = run_batch(&entries, &config, |entry, scene| {
        let valid = scene.grid.data.iter().filter(|v| v.is_finite()).count();
        info!(
            raster = %entry.raster.display(),
            width = scene.grid.width,
            height = scene.grid.height,
            crs = %scene.grid.crs,
            boundaries = scene.boundaries.len(),
            valid_pixels = valid,
            rotated = scene.rotated.is_some(),
            "scene ready"
        );
    });

    if summary.failed > 0 {
        anyhow::bail!(
            "{} of {} rasters failed",
            summary.failed,
            summary.processed + summary.failed
        );
    }

    Ok(())
}
