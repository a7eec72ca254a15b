use crate::fixtures::rect;
use lyon::math::point;
use lyon::path::Path;
use wirecut_core::Point;
use wirecut_toolpath::{contours_from_lyon_path, Contour};

#[test]
fn test_arc_length_midpoint_on_unequal_segments() {
    // 1 unit then 9 units: the vertex-index midpoint would be the corner.
    let c = Contour::from_points(
        "l",
        &[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 9.0)],
        false,
    );
    assert_eq!(c.length(), 10.0);
    let mid = c.point_at(0.5).unwrap();
    assert!(mid.distance_to(&Point::new(1.0, 4.0)) < 1e-12);
}

#[test]
fn test_point_at_clamps_parameter() {
    let c = rect("r", 0.0, 0.0, 2.0, 1.0);
    assert_eq!(c.point_at(-0.5), c.point_at(0.0));
    assert_eq!(c.point_at(7.0), c.point_at(1.0));
    assert_eq!(c.point_at(f64::NAN), None);
}

#[test]
fn test_bounds_and_area() {
    let c = rect("r", -1.0, -2.0, 3.0, 4.0);
    let b = c.bounds().unwrap();
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (-1.0, -2.0, 3.0, 4.0));
    assert!((c.area() - 24.0).abs() < 1e-9);
}

#[test]
fn test_open_contour_has_no_area() {
    let c = Contour::from_points("l", &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], false);
    assert_eq!(c.area(), 0.0);
    assert!(!c.contains_point(Point::new(0.5, 0.5)));
}

#[test]
fn test_closest_parameter() {
    let c = rect("r", 0.0, 0.0, 10.0, 10.0);
    // Right edge midpoint sits at t = 0.375.
    let t = c.closest_parameter(Point::new(20.0, 5.0), 32).unwrap();
    assert_eq!(t, 0.375);
}

#[test]
fn test_lyon_closed_polygon() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(3.0, 0.0));
    builder.line_to(point(3.0, 4.0));
    builder.close();
    let path = builder.build();

    let c = Contour::from_lyon_path("tri", &path, 0.01).unwrap();
    assert!(c.is_closed());
    assert_eq!(c.vertices().len(), 3);
    assert!((c.length() - 12.0).abs() < 1e-5);
}

#[test]
fn test_lyon_curve_is_flattened() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.quadratic_bezier_to(point(5.0, 10.0), point(10.0, 0.0));
    builder.end(false);
    let path = builder.build();

    let c = Contour::from_lyon_path("arc", &path, 0.01).unwrap();
    assert!(!c.is_closed());
    assert!(c.vertices().len() > 3);
    assert!(c.length() > 10.0 && c.length() < 20.0);
}

#[test]
fn test_lyon_multiple_subpaths() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.line_to(point(1.0, 1.0));
    builder.close();
    builder.begin(point(5.0, 5.0));
    builder.line_to(point(6.0, 5.0));
    builder.end(false);
    let path = builder.build();

    let contours = contours_from_lyon_path("glyph", &path, 0.01);
    assert_eq!(contours.len(), 2);
    assert_eq!(contours[0].id, "glyph-0");
    assert!(contours[0].is_closed());
    assert_eq!(contours[1].id, "glyph-1");
    assert!(!contours[1].is_closed());
}
