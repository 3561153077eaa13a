//! Coordinate reference system transformations.
//!
//! Resolves EPSG codes against the crs-definitions database and transforms
//! parcel boundaries between coordinate reference systems with proj4rs.
//! Both are pure Rust; no GDAL or system PROJ installation is required.

pub mod epsg;
pub mod reproject;

pub use epsg::{is_geographic, proj_string};
pub use reproject::{project_point, reproject_polygon, ProjectionError};
