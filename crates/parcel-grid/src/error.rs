//! Error types for grid operations.

use thiserror::Error;

/// Errors that can occur while resolving windows or transforming grids.
#[derive(Debug, Error)]
pub enum GridError {
    /// The polygon set driving a window resolution is empty.
    #[error("no geometry: window resolution needs at least one polygon")]
    NoGeometry,

    /// The resolved window has zero area after clipping to the raster.
    #[error("empty window: requested region lies outside the {width}x{height} raster")]
    EmptyWindow { width: usize, height: usize },

    /// A rotation center cannot be defined for degenerate dimensions.
    #[error("invalid center: grid dimensions {width}x{height} are degenerate")]
    InvalidCenter { width: usize, height: usize },

    /// The raster's affine transform has no inverse.
    #[error("affine transform is not invertible")]
    NonInvertibleTransform,
}
