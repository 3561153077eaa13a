//! Vertex-wise reprojection of boundary polygons.

use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use thiserror::Error;

use parcel_common::{Crs, Polygon};

use crate::epsg::{is_geographic, proj_string};

/// Errors raised while reprojecting coordinates.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The EPSG code is not in the crs-definitions database.
    #[error("{0} is not in the crs-definitions database")]
    UnknownCrs(Crs),

    /// The database definition could not be compiled by proj4rs.
    #[error("invalid projection definition for {crs}: {message}")]
    InvalidDefinition { crs: Crs, message: String },

    /// proj4rs rejected the transform for the given coordinates.
    #[error("transform from {from} to {target} failed: {message}")]
    TransformFailed {
        from: Crs,
        target: Crs,
        message: String,
    },

    /// The transform produced a non-finite coordinate.
    #[error("transform from {from} to {target} is undefined at ({x}, {y})")]
    Undefined {
        from: Crs,
        target: Crs,
        x: f64,
        y: f64,
    },
}

fn resolve(crs: Crs) -> Result<Proj, ProjectionError> {
    let definition = proj_string(crs).ok_or(ProjectionError::UnknownCrs(crs))?;
    Proj::from_proj_string(definition).map_err(|e| ProjectionError::InvalidDefinition {
        crs,
        message: format!("{e:?}"),
    })
}

/// Project a single point from one CRS to another.
///
/// A same-CRS projection is the identity and short-circuits without
/// touching the projection database.
pub fn project_point(
    source: Crs,
    target: Crs,
    x: f64,
    y: f64,
) -> Result<(f64, f64), ProjectionError> {
    if source == target {
        return Ok((x, y));
    }

    let source_proj = resolve(source)?;
    let target_proj = resolve(target)?;
    project_with(&source_proj, &target_proj, source, target, x, y)
}

/// Reproject a polygon into `target`, vertex by vertex.
///
/// The polygon's declared CRS is the source; a polygon with no CRS tag is
/// taken to be geographic WGS84. Vertex count and ordering are unchanged.
pub fn reproject_polygon(polygon: &Polygon, target: Crs) -> Result<Polygon, ProjectionError> {
    let source = polygon.crs().unwrap_or(Crs::WGS84);
    if source == target {
        return Ok(polygon.clone().with_crs(target));
    }

    // Resolve once per polygon, not per vertex.
    let source_proj = resolve(source)?;
    let target_proj = resolve(target)?;

    polygon.try_map_vertices(Some(target), |x, y| {
        project_with(&source_proj, &target_proj, source, target, x, y)
    })
}

fn project_with(
    source_proj: &Proj,
    target_proj: &Proj,
    source: Crs,
    target: Crs,
    x: f64,
    y: f64,
) -> Result<(f64, f64), ProjectionError> {
    // proj4rs works in radians for geographic coordinates.
    let (x_in, y_in) = if is_geographic(source) {
        (x.to_radians(), y.to_radians())
    } else {
        (x, y)
    };

    let mut point = (x_in, y_in, 0.0);
    transform(source_proj, target_proj, &mut point).map_err(|e| {
        ProjectionError::TransformFailed {
            from: source,
            target,
            message: format!("{e:?}"),
        }
    })?;

    let (out_x, out_y) = if is_geographic(target) {
        (point.0.to_degrees(), point.1.to_degrees())
    } else {
        (point.0, point.1)
    };

    if !out_x.is_finite() || !out_y.is_finite() {
        return Err(ProjectionError::Undefined {
            from: source,
            target,
            x,
            y,
        });
    }

    Ok((out_x, out_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_identity_same_crs() {
        let (x, y) = project_point(Crs::WGS84, Crs::WGS84, 12.5, -33.25).unwrap();
        assert_eq!((x, y), (12.5, -33.25));
    }

    #[test]
    fn test_wgs84_to_mercator_origin() {
        let (x, y) = project_point(Crs::WGS84, Crs::from_epsg(3857), 0.0, 0.0).unwrap();
        assert!(x.abs() < EPS);
        assert!(y.abs() < EPS);
    }

    #[test]
    fn test_mercator_roundtrip() {
        let mercator = Crs::from_epsg(3857);
        let (x, y) = project_point(Crs::WGS84, mercator, 30.0, 59.95).unwrap();
        let (lon, lat) = project_point(mercator, Crs::WGS84, x, y).unwrap();
        assert!((lon - 30.0).abs() < EPS);
        assert!((lat - 59.95).abs() < EPS);
    }

    #[test]
    fn test_unknown_crs() {
        let err = project_point(Crs::WGS84, Crs::from_epsg(1), 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ProjectionError::UnknownCrs(_)));
    }

    #[test]
    fn test_reproject_polygon_identity() {
        let poly = Polygon::new(vec![(10.0, 50.0), (11.0, 50.0), (11.0, 51.0)])
            .unwrap()
            .with_crs(Crs::WGS84);
        let same = reproject_polygon(&poly, Crs::WGS84).unwrap();
        for (a, b) in poly.vertices().iter().zip(same.vertices()) {
            assert!((a.0 - b.0).abs() < EPS);
            assert!((a.1 - b.1).abs() < EPS);
        }
    }

    #[test]
    fn test_reproject_polygon_defaults_to_wgs84() {
        // No CRS tag: treated as lon/lat.
        let poly = Polygon::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        let projected = reproject_polygon(&poly, Crs::from_epsg(3857)).unwrap();

        assert_eq!(projected.crs(), Some(Crs::from_epsg(3857)));
        assert_eq!(projected.vertices().len(), 3);
        // One degree of longitude at the equator is ~111 km in Web Mercator.
        let (x1, _) = projected.vertices()[1];
        assert!((x1 - 111_319.49).abs() < 1.0);
    }

    #[test]
    fn test_vertex_order_preserved() {
        let poly = Polygon::new(vec![(5.0, 45.0), (6.0, 45.0), (6.0, 46.0), (5.0, 46.0)])
            .unwrap()
            .with_crs(Crs::WGS84);
        let projected = reproject_polygon(&poly, Crs::from_epsg(3857)).unwrap();
        let xs: Vec<f64> = projected.vertices().iter().map(|v| v.0).collect();
        // West vertices stay west of east vertices.
        assert!(xs[0] < xs[1]);
        assert!(xs[3] < xs[2]);
    }
}
