//! Comprehensive tests for BoundingBox operations.

use parcel_common::bbox::BoundingBox;

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
}

#[test]
fn test_bbox_from_single_point() {
    let bbox = BoundingBox::from_points([(3.5, -2.0)]).unwrap();
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.height(), 0.0);
    assert_eq!(bbox.center(), (3.5, -2.0));
}

// ============================================================================
// Geometry tests
// ============================================================================

#[test]
fn test_bbox_dimensions() {
    let bbox = BoundingBox::new(-125.0, 24.0, -66.0, 50.0);
    assert!((bbox.width() - 59.0).abs() < 1e-12);
    assert!((bbox.height() - 26.0).abs() < 1e-12);
}

#[test]
fn test_bbox_center() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 20.0);
    assert_eq!(bbox.center(), (5.0, 10.0));
}

#[test]
fn test_bbox_union() {
    let a = BoundingBox::new(0.0, 0.0, 5.0, 5.0);
    let b = BoundingBox::new(3.0, -2.0, 8.0, 4.0);
    let u = a.union(&b);
    assert_eq!(u.min_x, 0.0);
    assert_eq!(u.min_y, -2.0);
    assert_eq!(u.max_x, 8.0);
    assert_eq!(u.max_y, 5.0);
}

#[test]
fn test_bbox_contains_point_boundary() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(bbox.contains_point(0.0, 0.0));
    assert!(bbox.contains_point(10.0, 10.0));
    assert!(bbox.contains_point(5.0, 5.0));
    assert!(!bbox.contains_point(10.001, 5.0));
    assert!(!bbox.contains_point(5.0, -0.001));
}

// ============================================================================
// Crop-policy support tests
// ============================================================================

#[test]
fn test_expand_fraction_is_per_side() {
    let bbox = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
    let e = bbox.expand_by_fraction(0.25);
    assert_eq!(e.width(), 150.0);
    assert_eq!(e.height(), 75.0);
    assert_eq!(e.center(), bbox.center());
}

#[test]
fn test_diagonal_covers_rotated_box() {
    // A square of side equal to the diagonal, centered on the bbox center,
    // must contain the box corners under any rotation about that center.
    let bbox = BoundingBox::new(-3.0, -1.0, 3.0, 1.0);
    let (cx, cy) = bbox.center();
    let half = bbox.diagonal() / 2.0;

    for step in 0..360 {
        let theta = (step as f64).to_radians();
        let (sin, cos) = theta.sin_cos();
        for (x, y) in [
            (bbox.min_x, bbox.min_y),
            (bbox.min_x, bbox.max_y),
            (bbox.max_x, bbox.min_y),
            (bbox.max_x, bbox.max_y),
        ] {
            let dx = x - cx;
            let dy = y - cy;
            let rx = cx + cos * dx - sin * dy;
            let ry = cy + sin * dx + cos * dy;
            assert!(rx >= cx - half - 1e-9 && rx <= cx + half + 1e-9);
            assert!(ry >= cy - half - 1e-9 && ry <= cy + half + 1e-9);
        }
    }
}
