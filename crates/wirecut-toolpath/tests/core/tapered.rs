use std::f64::consts::PI;
use wirecut_core::{Point, Point4};
use wirecut_toolpath::{sync_tapered_contours, sync_tapered_paths, Contour};

#[test]
fn test_three_against_fifty_points() {
    let root = vec![
        Point::new(0.0, 0.0),
        Point::new(40.0, 0.0),
        Point::new(40.0, 30.0),
    ];
    let tip: Vec<Point> = (0..50)
        .map(|i| {
            let a = PI * i as f64 / 49.0;
            Point::new(10.0 + 5.0 * a.cos(), 5.0 * a.sin())
        })
        .collect();

    let path = sync_tapered_paths(&root, &tip, 100);
    assert_eq!(path.polyline4.len(), 101);
    assert_eq!(path.polyline4[0], Point4::from_pair(root[0], tip[0]));
    assert_eq!(path.polyline4[100], Point4::from_pair(root[2], tip[49]));
    assert_eq!(path.root_length, 70.0);
}

#[test]
fn test_lock_step_by_arc_length() {
    // Root is dense at the start, tip is a single segment.
    let root = vec![
        Point::new(0.0, 0.0),
        Point::new(0.5, 0.0),
        Point::new(1.0, 0.0),
        Point::new(10.0, 0.0),
    ];
    let tip = vec![Point::new(0.0, 5.0), Point::new(20.0, 5.0)];
    let path = sync_tapered_paths(&root, &tip, 10);

    for (i, p) in path.polyline4.iter().enumerate() {
        let t = i as f64 / 10.0;
        assert!((p.x - 10.0 * t).abs() < 1e-9);
        assert!((p.u - 20.0 * t).abs() < 1e-9);
        assert_eq!(p.v, 5.0);
    }
}

#[test]
fn test_contours_from_entry_parameters() {
    let square = |id: &str, s: f64| {
        Contour::from_points(
            id,
            &[
                Point::new(0.0, 0.0),
                Point::new(s, 0.0),
                Point::new(s, s),
                Point::new(0.0, s),
            ],
            true,
        )
    };
    let root = square("root", 10.0);
    let tip = square("tip", 6.0);

    let path = sync_tapered_contours(&root, 0.25, &tip, 0.25, 8);
    assert_eq!(path.len(), 9);
    assert_eq!(path.polyline4[0], Point4::new(10.0, 0.0, 6.0, 0.0));
    assert_eq!(path.polyline4[8], Point4::new(10.0, 0.0, 6.0, 0.0));
    assert!((path.root_length - 40.0).abs() < 1e-9);
    assert!((path.tip_length - 24.0).abs() < 1e-9);
}
