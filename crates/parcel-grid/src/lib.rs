//! Grid operations for parcel rasters.
//!
//! This crate holds the pixel-space half of the alignment pipeline:
//!
//! - [`window`]: resolve a pixel window from reprojected boundary polygons
//!   (tight, margin, or square-about-centroid crop) and extract the
//!   corresponding sub-grid with a correctly translated transform
//! - [`pixel`]: map polygons between geographic and pixel coordinates via
//!   the raster's affine transform
//! - [`rotate`]: synchronized rotation of a grid and its pixel-space
//!   polygons about a shared center
//! - [`downsample`]: factor-of-2 reduction for quick visual inspection

pub mod downsample;
pub mod error;
pub mod pixel;
pub mod rotate;
pub mod window;

pub use downsample::{downsample_grid, DownsampleMethod};
pub use error::GridError;
pub use pixel::{to_geo_space, to_pixel_space};
pub use rotate::{rotate_aligned, rotate_samples, rotate_vertices, rotation_center, RotatedView};
pub use window::{crop, resolve_and_crop, resolve_window, CropPolicy, Window};
