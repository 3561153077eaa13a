//! Affine georeferencing transforms.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// A 6-parameter affine transform mapping pixel to geographic coordinates.
///
/// Follows the GDAL/rasterio convention:
///
/// ```text
/// x = a * col + b * row + c
/// y = d * col + e * row + f
/// ```
///
/// For a typical north-up raster, `b` and `d` are zero, `a` is the pixel
/// width, `e` is the negative pixel height (rows grow southward), and
/// `(c, f)` is the geographic position of the top-left pixel corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl GeoTransform {
    /// Create a transform from its six coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Create a north-up transform from the top-left corner and pixel size.
    ///
    /// `x_res` and `y_res` are both positive; the row axis points south.
    pub fn from_origin(west: f64, north: f64, x_res: f64, y_res: f64) -> Self {
        Self::new(x_res, 0.0, west, 0.0, -y_res, north)
    }

    /// The identity transform (pixel coordinates are geographic coordinates).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }

    /// Apply the transform to pixel coordinates `(col, row)`.
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    /// The inverse transform, mapping geographic coordinates to pixels.
    ///
    /// Returns `None` if the transform is singular (zero pixel area).
    pub fn inverse(&self) -> Option<GeoTransform> {
        let m = Matrix3::new(
            self.a, self.b, self.c, //
            self.d, self.e, self.f, //
            0.0, 0.0, 1.0,
        );
        let inv = m.try_inverse()?;
        Some(GeoTransform::new(
            inv[(0, 0)],
            inv[(0, 1)],
            inv[(0, 2)],
            inv[(1, 0)],
            inv[(1, 1)],
            inv[(1, 2)],
        ))
    }

    /// The transform valid for a window of the raster.
    ///
    /// A window only translates the pixel origin: the scale and shear terms
    /// are carried over unchanged, and the new `(c, f)` is the geographic
    /// position of the window's top-left pixel corner.
    pub fn for_window(&self, col_off: f64, row_off: f64) -> GeoTransform {
        let (c, f) = self.apply(col_off, row_off);
        GeoTransform { c, f, ..*self }
    }

    /// The transform valid after scaling the pixel grid by `factor`.
    ///
    /// Downsampling by 2 uses `factor = 2.0`: one output pixel covers a
    /// 2x2 block of input pixels, so the scale and shear terms double while
    /// the origin stays put.
    pub fn scaled(&self, factor: f64) -> GeoTransform {
        GeoTransform {
            a: self.a * factor,
            b: self.b * factor,
            d: self.d * factor,
            e: self.e * factor,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_from_origin_north_up() {
        let t = GeoTransform::from_origin(10.0, 50.0, 0.5, 0.25);
        assert_eq!(t.apply(0.0, 0.0), (10.0, 50.0));

        // One pixel east, one pixel south
        let (x, y) = t.apply(1.0, 1.0);
        assert!((x - 10.5).abs() < EPS);
        assert!((y - 49.75).abs() < EPS);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let t = GeoTransform::from_origin(-3.0, 7.0, 0.01, 0.01);
        let inv = t.inverse().unwrap();

        let (x, y) = t.apply(123.0, 456.0);
        let (col, row) = inv.apply(x, y);
        assert!((col - 123.0).abs() < EPS);
        assert!((row - 456.0).abs() < EPS);
    }

    #[test]
    fn test_singular_transform_has_no_inverse() {
        let t = GeoTransform::new(1.0, 2.0, 0.0, 2.0, 4.0, 0.0);
        assert!(t.inverse().is_none());
    }

    #[test]
    fn test_window_transform_translates_only() {
        let t = GeoTransform::from_origin(0.0, 100.0, 1.0, 1.0);
        let w = t.for_window(10.0, 20.0);

        assert_eq!(w.a, t.a);
        assert_eq!(w.b, t.b);
        assert_eq!(w.d, t.d);
        assert_eq!(w.e, t.e);

        // Pixel (0, 0) of the window is pixel (10, 20) of the raster.
        assert_eq!(w.apply(0.0, 0.0), t.apply(10.0, 20.0));
        assert_eq!(w.apply(5.0, 5.0), t.apply(15.0, 25.0));
    }

    #[test]
    fn test_scaled_doubles_pixel_size() {
        let t = GeoTransform::from_origin(0.0, 0.0, 0.5, 0.5);
        let s = t.scaled(2.0);
        assert_eq!(s.a, 1.0);
        assert_eq!(s.e, -1.0);
        assert_eq!(s.c, t.c);
        assert_eq!(s.f, t.f);
    }
}
