//! Per-raster processing and the batch driver.

use std::path::Path;

use tracing::{debug, info, warn};

use parcel_common::{Grid, Polygon};
use parcel_grid::{
    downsample_grid, resolve_and_crop, rotate_aligned, to_pixel_space, CropPolicy,
    DownsampleMethod, RotatedView, Window,
};

use crate::{discover::RasterEntry, PipelineError};

/// Explicit invocation parameters for one processing pass.
///
/// These were ambient module-level constants in the exploratory scripts;
/// here every knob travels with the call.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Crop the raster to the boundaries, or keep the full extent.
    pub crop: Option<CropPolicy>,
    /// Rotate the (possibly cropped) grid and its boundaries by this many
    /// degrees.
    pub rotation_deg: Option<f64>,
    /// Number of factor-of-2 downsample passes applied before pixel
    /// mapping. Zero keeps native resolution.
    pub downsample_levels: u8,
    pub downsample_method: DownsampleMethod,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            crop: Some(CropPolicy::Tight),
            rotation_deg: None,
            downsample_levels: 0,
            downsample_method: DownsampleMethod::Mean,
        }
    }
}

/// Everything a renderer needs for one raster: the (possibly cropped,
/// possibly downsampled) grid, its boundaries in that grid's pixel space,
/// and the optional rotated view of both.
#[derive(Debug, Clone)]
pub struct ParcelScene {
    pub grid: Grid,
    /// The resolved window in full-raster pixel coordinates, when cropping
    /// was requested.
    pub window: Option<Window>,
    /// Boundaries in the grid's pixel space, aligned with `grid`.
    pub boundaries: Vec<Polygon>,
    pub rotated: Option<RotatedView>,
}

/// Run the full alignment pipeline for one raster and its boundary files.
///
/// The raster handle is opened, read and released inside this call; errors
/// are terminal for this raster and carry the failing stage's error kind.
pub fn process_raster(
    raster_path: &Path,
    boundary_paths: &[impl AsRef<Path>],
    config: &PipelineConfig,
) -> Result<ParcelScene, PipelineError> {
    let full = geotiff_parser::read_band(raster_path)?;

    // Extract and reproject every boundary into the raster's CRS.
    let mut geo_polygons = Vec::new();
    for path in boundary_paths {
        for polygon in kml_parser::parse_kml_file(path.as_ref())? {
            geo_polygons.push(projection::reproject_polygon(&polygon, full.crs)?);
        }
    }
    debug!(
        raster = %raster_path.display(),
        polygons = geo_polygons.len(),
        crs = %full.crs,
        "boundaries reprojected"
    );

    let (mut grid, window) = match config.crop {
        Some(policy) => {
            let (grid, window) = resolve_and_crop(&full, &geo_polygons, policy)?;
            (grid, Some(window))
        }
        None => (full, None),
    };

    for _ in 0..config.downsample_levels {
        grid = downsample_grid(&grid, config.downsample_method);
    }

    let boundaries = geo_polygons
        .iter()
        .map(|p| to_pixel_space(p, &grid.transform))
        .collect::<Result<Vec<_>, _>>()?;

    let rotated = match config.rotation_deg {
        Some(angle) => Some(rotate_aligned(&grid, &boundaries, angle)?),
        None => None,
    };

    Ok(ParcelScene {
        grid,
        window,
        boundaries,
        rotated,
    })
}

/// Outcome of a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Process every discovered raster, continuing past per-raster failures.
pub fn run_batch<F>(
    entries: &[RasterEntry],
    config: &PipelineConfig,
    mut on_scene: F,
) -> BatchSummary
where
    F: FnMut(&RasterEntry, ParcelScene),
{
    let mut summary = BatchSummary::default();

    for entry in entries {
        match process_raster(&entry.raster, &entry.boundaries, config) {
            Ok(scene) => {
                summary.processed += 1;
                on_scene(entry, scene);
            }
            Err(e) => {
                summary.failed += 1;
                warn!(
                    raster = %entry.raster.display(),
                    error = %e,
                    "raster failed, continuing batch"
                );
            }
        }
    }

    info!(
        processed = summary.processed,
        failed = summary.failed,
        "batch complete"
    );
    summary
}
