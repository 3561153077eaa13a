//! Parcel boundary polygons.

use crate::{BoundingBox, Crs};
use serde::{Deserialize, Serialize};

/// A closed boundary ring.
///
/// Vertices are ordered; the ring is implicitly closed (the first vertex is
/// not required to be repeated at the end, but a repeated closing vertex is
/// tolerated). A valid ring has at least 3 distinct vertices.
/// Self-intersection is not validated.
///
/// The `crs` tag names the coordinate space the vertices are expressed in.
/// `None` means the space is contextual: unparsed boundary documents default
/// to WGS84 at reprojection time, and pixel-space polygons produced by the
/// pixel mapper carry no CRS at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<(f64, f64)>,
    crs: Option<Crs>,
}

impl Polygon {
    /// Create a polygon, verifying the ring has at least 3 distinct vertices.
    ///
    /// Returns `None` for degenerate rings so that callers can drop them
    /// silently, which is the extractor's contract for short rings.
    pub fn new(vertices: Vec<(f64, f64)>) -> Option<Self> {
        if distinct_count(&vertices) < 3 {
            return None;
        }
        Some(Self {
            vertices,
            crs: None,
        })
    }

    /// Tag the polygon with the CRS its coordinates are expressed in.
    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }

    /// The ring vertices in order.
    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    /// The declared coordinate reference system, if any.
    pub fn crs(&self) -> Option<Crs> {
        self.crs
    }

    /// The bounding box of the ring.
    pub fn bbox(&self) -> BoundingBox {
        // The ring has >= 3 vertices by construction.
        BoundingBox::from_points(self.vertices.iter().copied())
            .unwrap_or(BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }

    /// Apply `f` to every vertex, producing a new polygon in a new space.
    ///
    /// Vertex count and ordering are preserved. The result carries `crs`,
    /// which may be `None` for pixel space.
    pub fn map_vertices<F>(&self, crs: Option<Crs>, mut f: F) -> Self
    where
        F: FnMut(f64, f64) -> (f64, f64),
    {
        Self {
            vertices: self.vertices.iter().map(|&(x, y)| f(x, y)).collect(),
            crs,
        }
    }

    /// Apply a fallible transform to every vertex.
    pub fn try_map_vertices<F, E>(&self, crs: Option<Crs>, mut f: F) -> Result<Self, E>
    where
        F: FnMut(f64, f64) -> Result<(f64, f64), E>,
    {
        let vertices = self
            .vertices
            .iter()
            .map(|&(x, y)| f(x, y))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Self { vertices, crs })
    }
}

/// Count distinct vertices, treating an explicit closing vertex as a
/// duplicate of the first.
fn distinct_count(vertices: &[(f64, f64)]) -> usize {
    let mut distinct: Vec<(f64, f64)> = Vec::with_capacity(vertices.len());
    for &v in vertices {
        if !distinct.contains(&v) {
            distinct.push(v);
        }
    }
    distinct.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_degenerate_rings() {
        assert!(Polygon::new(vec![]).is_none());
        assert!(Polygon::new(vec![(0.0, 0.0), (1.0, 1.0)]).is_none());

        // Three points, but only two distinct
        assert!(Polygon::new(vec![(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)]).is_none());
    }

    #[test]
    fn test_new_accepts_explicitly_closed_ring() {
        let ring = vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)];
        let poly = Polygon::new(ring.clone()).unwrap();
        assert_eq!(poly.vertices(), ring.as_slice());
    }

    #[test]
    fn test_bbox() {
        let poly = Polygon::new(vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]).unwrap();
        let bbox = poly.bbox();
        assert_eq!(bbox.min_x, 0.0);
        assert_eq!(bbox.max_x, 10.0);
        assert_eq!(bbox.max_y, 10.0);
    }

    #[test]
    fn test_map_vertices_preserves_order() {
        let poly = Polygon::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])
            .unwrap()
            .with_crs(Crs::WGS84);
        let shifted = poly.map_vertices(poly.crs(), |x, y| (x + 10.0, y));
        assert_eq!(
            shifted.vertices(),
            &[(10.0, 0.0), (11.0, 0.0), (11.0, 1.0)]
        );
        assert_eq!(shifted.crs(), Some(Crs::WGS84));
    }
}
