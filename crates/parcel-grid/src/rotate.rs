//! Synchronized rotation of grids and their pixel-space polygons.
//!
//! Resampling a grid rotates the *sampling lattice*, while rotating polygon
//! vertices moves the *content* directly, so the two operations need
//! opposite signs to stay aligned: a grid rotated by `theta` pairs with
//! vertices rotated by `-theta` about the same center. [`rotate_aligned`]
//! owns that pairing; call sites never flip signs themselves.
//!
//! The rotation center is `((w-1)/2, (h-1)/2)`, the center of the pixel
//! lattice rather than of the image rectangle.

use parcel_common::{Grid, Polygon};

use crate::GridError;

/// A rotated grid together with the polygons aligned to it.
///
/// Dimensions match the source grid; content rotated out of frame is lost
/// and exposed corners are NaN. The source grid's georeferencing does not
/// apply to the rotated samples, so none is carried.
#[derive(Debug, Clone)]
pub struct RotatedView {
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
    pub angle_deg: f64,
    pub polygons: Vec<Polygon>,
}

/// The fixed rotation center for a grid of the given dimensions.
pub fn rotation_center(width: usize, height: usize) -> Result<(f64, f64), GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidCenter { width, height });
    }
    Ok(((width as f64 - 1.0) / 2.0, (height as f64 - 1.0) / 2.0))
}

/// Rotate a grid's samples by `angle_deg` about the lattice center.
///
/// Positive angles turn the content counter-clockwise as displayed with
/// row 0 on top. Output dimensions equal input dimensions; source positions
/// falling outside the grid produce NaN. Sampling is bilinear.
pub fn rotate_samples(
    data: &[f32],
    width: usize,
    height: usize,
    angle_deg: f64,
) -> Result<Vec<f32>, GridError> {
    let (cx, cy) = rotation_center(width, height)?;
    let theta = angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();

    let max_x = width as f64 - 1.0;
    let max_y = height as f64 - 1.0;
    let mut out = vec![f32::NAN; width * height];

    for y in 0..height {
        for x in 0..width {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            // Inverse mapping: where in the source does this output pixel
            // come from?
            let src_x = cos * dx - sin * dy + cx;
            let src_y = sin * dx + cos * dy + cy;

            let eps = 1e-9;
            if src_x < -eps || src_y < -eps || src_x > max_x + eps || src_y > max_y + eps {
                continue;
            }

            let src_x = src_x.clamp(0.0, max_x);
            let src_y = src_y.clamp(0.0, max_y);
            let x0 = src_x.floor() as usize;
            let y0 = src_y.floor() as usize;
            let x1 = (x0 + 1).min(width - 1);
            let y1 = (y0 + 1).min(height - 1);
            let fx = (src_x - x0 as f64) as f32;
            let fy = (src_y - y0 as f64) as f32;

            let v00 = data[y0 * width + x0];
            let v10 = data[y0 * width + x1];
            let v01 = data[y1 * width + x0];
            let v11 = data[y1 * width + x1];

            let top = v00 * (1.0 - fx) + v10 * fx;
            let bottom = v01 * (1.0 - fx) + v11 * fx;
            out[y * width + x] = top * (1.0 - fy) + bottom * fy;
        }
    }

    Ok(out)
}

/// Rotate a pixel-space polygon by `angle_deg` about `center`.
///
/// Plain geometric rotation with the usual counter-clockwise-positive
/// convention on the raw `(col, row)` coordinates. Because the row axis
/// points down on screen, a positive angle here appears clockwise when the
/// polygon is drawn over an image.
pub fn rotate_vertices(polygon: &Polygon, angle_deg: f64, center: (f64, f64)) -> Polygon {
    let theta = angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    let (cx, cy) = center;

    polygon.map_vertices(None, |x, y| {
        let dx = x - cx;
        let dy = y - cy;
        (cx + cos * dx - sin * dy, cy + sin * dx + cos * dy)
    })
}

/// Rotate a grid and its pixel-space polygons together.
///
/// The grid turns by `angle_deg` and every polygon by `-angle_deg` about
/// the shared lattice center, which keeps each polygon pinned to the
/// content it outlines for any angle. This is the only place the sign flip
/// lives.
pub fn rotate_aligned(
    grid: &Grid,
    polygons: &[Polygon],
    angle_deg: f64,
) -> Result<RotatedView, GridError> {
    let center = rotation_center(grid.width, grid.height)?;
    let data = rotate_samples(&grid.data, grid.width, grid.height, angle_deg)?;
    let polygons = polygons
        .iter()
        .map(|p| rotate_vertices(p, -angle_deg, center))
        .collect();

    Ok(RotatedView {
        data,
        width: grid.width,
        height: grid.height,
        angle_deg,
        polygons,
    })
}
