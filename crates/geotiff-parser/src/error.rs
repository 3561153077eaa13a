//! Error types for GeoTIFF reading.

use thiserror::Error;

/// Errors raised while opening or reading a raster file.
#[derive(Debug, Error)]
pub enum RasterReadError {
    /// I/O failure opening or reading the file.
    #[error("failed to read raster: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF structure or decompression failure.
    #[error("TIFF decode error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// A required GeoTIFF tag is absent or malformed.
    #[error("missing or malformed GeoTIFF tag: {0}")]
    MissingGeoTag(&'static str),

    /// The file decodes but its sample layout is not supported.
    #[error("unsupported raster layout: {0}")]
    UnsupportedLayout(String),
}
