//! The raster/boundary alignment pipeline.
//!
//! Composes the workspace crates into the per-raster flow:
//!
//! ```text
//! KML boundaries -> reproject to raster CRS -> resolve window & crop
//!                -> map to pixel space -> optional synchronized rotation
//! ```
//!
//! and drives it over a discovered dataset, one raster at a time. Each
//! raster is processed to completion with its own file handle scope; a
//! failure is terminal for that raster only, and the batch driver logs it
//! and moves on.

pub mod discover;
pub mod pipeline;

pub use discover::{discover_dataset, RasterEntry};
pub use pipeline::{process_raster, run_batch, BatchSummary, ParcelScene, PipelineConfig};

use thiserror::Error;

/// Any failure within one raster's processing pass.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] kml_parser::ParseError),

    #[error(transparent)]
    Projection(#[from] projection::ProjectionError),

    #[error(transparent)]
    RasterRead(#[from] geotiff_parser::RasterReadError),

    #[error(transparent)]
    Grid(#[from] parcel_grid::GridError),
}
