//! Window resolution and cropping.
//!
//! A window is derived from the union bounding box of one or more polygons
//! already expressed in the raster's CRS, grown according to a
//! [`CropPolicy`], mapped to pixel coordinates through the inverse affine
//! transform, and clipped to the raster's valid extent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use parcel_common::{BoundingBox, GeoTransform, Grid, Polygon};

use crate::GridError;

/// A rectangular pixel region of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub col_off: usize,
    pub row_off: usize,
    pub width: usize,
    pub height: usize,
}

/// How the window bounds are derived from the polygon bounding box.
///
/// The source scripts hard-coded each variant in a separate copy of the
/// pipeline; here the policy is a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropPolicy {
    /// Exact bounding box of the polygon union.
    Tight,
    /// Bounding box expanded on each side by this fraction of its
    /// width/height. Zero degenerates to [`CropPolicy::Tight`]; the
    /// fraction must be non-negative.
    Margin(f64),
    /// Square centered on the bounding-box centroid with side equal to the
    /// box diagonal, so the polygon union stays inside the window under any
    /// rotation about its center.
    SquareAboutCentroid,
}

/// Resolve the pixel window covering `polygons` on a raster.
///
/// The polygons must already be in the raster's CRS. The window is clipped
/// to the raster extent; a window that clips to zero area is
/// [`GridError::EmptyWindow`], and an empty polygon set is
/// [`GridError::NoGeometry`].
pub fn resolve_window(
    transform: &GeoTransform,
    raster_width: usize,
    raster_height: usize,
    polygons: &[Polygon],
    policy: CropPolicy,
) -> Result<Window, GridError> {
    let mut bounds: Option<BoundingBox> = None;
    for polygon in polygons {
        let bbox = polygon.bbox();
        bounds = Some(match bounds {
            Some(b) => b.union(&bbox),
            None => bbox,
        });
    }
    let bounds = bounds.ok_or(GridError::NoGeometry)?;

    let bounds = match policy {
        CropPolicy::Tight => bounds,
        CropPolicy::Margin(fraction) => bounds.expand_by_fraction(fraction),
        CropPolicy::SquareAboutCentroid => {
            let (cx, cy) = bounds.center();
            let half = bounds.diagonal() / 2.0;
            BoundingBox::new(cx - half, cy - half, cx + half, cy + half)
        }
    };

    let inverse = transform
        .inverse()
        .ok_or(GridError::NonInvertibleTransform)?;

    // Map all four corners: the row axis usually inverts min/max, and a
    // sheared transform can reorder corners arbitrarily.
    let corners = [
        inverse.apply(bounds.min_x, bounds.min_y),
        inverse.apply(bounds.min_x, bounds.max_y),
        inverse.apply(bounds.max_x, bounds.min_y),
        inverse.apply(bounds.max_x, bounds.max_y),
    ];
    let pixel_bounds = corners[1..].iter().fold(
        BoundingBox::new(corners[0].0, corners[0].1, corners[0].0, corners[0].1),
        |b, &(x, y)| {
            BoundingBox::new(b.min_x.min(x), b.min_y.min(y), b.max_x.max(x), b.max_y.max(y))
        },
    );

    let col0 = (pixel_bounds.min_x.floor() as i64).max(0);
    let row0 = (pixel_bounds.min_y.floor() as i64).max(0);
    let col1 = (pixel_bounds.max_x.ceil() as i64).min(raster_width as i64);
    let row1 = (pixel_bounds.max_y.ceil() as i64).min(raster_height as i64);

    if col1 <= col0 || row1 <= row0 {
        return Err(GridError::EmptyWindow {
            width: raster_width,
            height: raster_height,
        });
    }

    Ok(Window {
        col_off: col0 as usize,
        row_off: row0 as usize,
        width: (col1 - col0) as usize,
        height: (row1 - row0) as usize,
    })
}

/// Extract a window of a grid as a new grid.
///
/// The window must lie within the grid ([`resolve_window`] guarantees
/// this). The result's transform is the source transform translated to the
/// window origin; scale and shear terms are untouched.
pub fn crop(grid: &Grid, window: &Window) -> Grid {
    debug_assert!(window.col_off + window.width <= grid.width);
    debug_assert!(window.row_off + window.height <= grid.height);

    let mut data = Vec::with_capacity(window.width * window.height);
    for row in 0..window.height {
        let start = (window.row_off + row) * grid.width + window.col_off;
        data.extend_from_slice(&grid.data[start..start + window.width]);
    }

    Grid {
        data,
        width: window.width,
        height: window.height,
        transform: grid
            .transform
            .for_window(window.col_off as f64, window.row_off as f64),
        crs: grid.crs,
    }
}

/// Resolve a window for `polygons` and crop the grid to it in one step.
pub fn resolve_and_crop(
    grid: &Grid,
    polygons: &[Polygon],
    policy: CropPolicy,
) -> Result<(Grid, Window), GridError> {
    let window = resolve_window(&grid.transform, grid.width, grid.height, polygons, policy)?;
    debug!(
        ?window,
        ?policy,
        raster_width = grid.width,
        raster_height = grid.height,
        "resolved crop window"
    );
    Ok((crop(grid, &window), window))
}
