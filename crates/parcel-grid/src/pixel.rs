//! Mapping polygons between geographic and pixel coordinates.

use parcel_common::{Crs, GeoTransform, Polygon};

use crate::GridError;

/// Map a polygon from the raster's CRS into pixel coordinates `(col, row)`.
///
/// `transform` is the affine transform of the raster or window the pixel
/// coordinates should be relative to. The result carries no CRS tag; its
/// coordinate space is the pixel grid. Applying `transform` to the result
/// reproduces the input within floating-point tolerance.
pub fn to_pixel_space(polygon: &Polygon, transform: &GeoTransform) -> Result<Polygon, GridError> {
    let inverse = transform
        .inverse()
        .ok_or(GridError::NonInvertibleTransform)?;
    Ok(polygon.map_vertices(None, |x, y| inverse.apply(x, y)))
}

/// Map a pixel-space polygon back into the raster's CRS.
pub fn to_geo_space(polygon: &Polygon, transform: &GeoTransform, crs: Crs) -> Polygon {
    polygon.map_vertices(Some(crs), |col, row| transform.apply(col, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_degree_polygon_to_pixels_north_up() {
        // 1 degree = 100 pixels, transform origin at (0, 0). With the
        // north-up convention the row coefficient is negative, so positive
        // latitudes land on negative rows.
        let transform = GeoTransform::from_origin(0.0, 0.0, 0.01, 0.01);
        let polygon = Polygon::new(vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
            .unwrap()
            .with_crs(Crs::WGS84);

        let pixels = to_pixel_space(&polygon, &transform).unwrap();
        let expected = [
            (0.0, 0.0),
            (0.0, -1000.0),
            (1000.0, -1000.0),
            (1000.0, 0.0),
        ];
        for (&(col, row), &(ec, er)) in pixels.vertices().iter().zip(expected.iter()) {
            assert!((col - ec).abs() < EPS);
            assert!((row - er).abs() < EPS);
        }
        assert_eq!(pixels.crs(), None);
    }

    #[test]
    fn test_roundtrip_law() {
        let transform = GeoTransform::new(2.5, 0.1, -300.0, -0.05, -2.5, 4200.0);
        let crs = Crs::from_epsg(32633);
        let polygon = Polygon::new(vec![(-120.5, 310.25), (88.0, 290.0), (40.0, 415.75)])
            .unwrap()
            .with_crs(crs);

        let pixels = to_pixel_space(&polygon, &transform).unwrap();
        let back = to_geo_space(&pixels, &transform, crs);

        assert_eq!(back.crs(), Some(crs));
        for (&(x, y), &(bx, by)) in polygon.vertices().iter().zip(back.vertices()) {
            assert!((x - bx).abs() < EPS);
            assert!((y - by).abs() < EPS);
        }
    }

    #[test]
    fn test_singular_transform() {
        let transform = GeoTransform::new(1.0, 1.0, 0.0, 1.0, 1.0, 0.0);
        let polygon = Polygon::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        let err = to_pixel_space(&polygon, &transform).unwrap_err();
        assert!(matches!(err, GridError::NonInvertibleTransform));
    }
}
