//! Single-band raster grids.

use crate::{BoundingBox, Crs, GeoTransform};

/// A single band of raster samples plus its georeferencing.
///
/// Samples are stored in row-major order, top row first, matching how
/// GeoTIFF strips are laid out. `NaN` marks nodata/background samples.
///
/// A `Grid` may be a full raster band or a cropped window of one; in both
/// cases `transform` maps this grid's own pixel coordinates to geographic
/// coordinates in `crs`.
#[derive(Debug, Clone)]
pub struct Grid {
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
    pub transform: GeoTransform,
    pub crs: Crs,
}

impl Grid {
    /// Create a grid, checking that `data` matches the dimensions.
    pub fn new(
        data: Vec<f32>,
        width: usize,
        height: usize,
        transform: GeoTransform,
        crs: Crs,
    ) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            transform,
            crs,
        })
    }

    /// Sample at `(col, row)`, or `None` when out of bounds.
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    /// Geographic bounds of the grid, from its corner pixels.
    pub fn bounds(&self) -> BoundingBox {
        let corners = [
            self.transform.apply(0.0, 0.0),
            self.transform.apply(self.width as f64, 0.0),
            self.transform.apply(0.0, self.height as f64),
            self.transform.apply(self.width as f64, self.height as f64),
        ];
        // Four corners, never empty.
        BoundingBox::from_points(corners).unwrap_or(BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }
}
