//! Shared types for the parcel-align workspace.
//!
//! This crate defines the value types that flow through the alignment
//! pipeline:
//! - [`BoundingBox`]: axis-aligned extents in any coordinate space
//! - [`Crs`]: EPSG coordinate reference system identifier
//! - [`Polygon`]: a closed boundary ring tagged with its coordinate space
//! - [`GeoTransform`]: the 6-parameter affine mapping pixel -> geographic
//! - [`Grid`]: a single band of raster samples plus its georeferencing
//!
//! All types are plain values; pipeline stages produce new values rather
//! than mutating their inputs.

pub mod bbox;
pub mod crs;
pub mod grid;
pub mod polygon;
pub mod transform;

pub use bbox::BoundingBox;
pub use crs::{Crs, CrsParseError};
pub use grid::Grid;
pub use polygon::Polygon;
pub use transform::GeoTransform;
