use crate::fixtures::rect;
use wirecut_core::{Point, WarningKind};
use wirecut_toolpath::{polyline_length, stitch, Contour, EntryExit};

fn full_loop(id: &str) -> EntryExit {
    EntryExit {
        contour_id: id.into(),
        entry_t: 0.0,
        exit_t: 0.0,
    }
}

#[test]
fn test_circle_samples_stay_on_radius() {
    let r = 25.0;
    let circle = Contour::circle("c", Point::new(0.0, 0.0), r, 0.001);
    let out = stitch(&[&circle], &[full_loop("c")], 1.0, Point::new(0.0, 0.0));

    // Home, then the rapid to the entry point.
    assert_eq!(out.points[0], Point::new(0.0, 0.0));
    assert_eq!(out.rapid_indices, vec![1]);

    let traced = &out.points[1..];
    for p in traced {
        assert!((p.distance_to(&Point::new(0.0, 0.0)) - r).abs() < 0.01);
    }
    let first = traced.first().unwrap();
    let last = traced.last().unwrap();
    assert!(first.distance_to(last) < 1e-9);
}

#[test]
fn test_square_sampling_density() {
    let square = rect("sq", 0.0, 0.0, 10.0, 10.0);
    let out = stitch(&[&square], &[full_loop("sq")], 1.0, Point::new(0.0, 0.0));

    // Entry coincides with home: no rapid, first sample merged into home.
    assert!(out.rapid_indices.is_empty());
    assert_eq!(out.points.len(), 51);
    // Samples every 0.8 units miss two of the corners.
    let length = polyline_length(&out.points);
    assert!(length < 40.0 && length > 39.0, "length {}", length);
    assert_eq!(out.traced, vec!["sq"]);
}

#[test]
fn test_step_controls_resolution() {
    let square = rect("sq", 0.0, 0.0, 100.0, 100.0);
    let out = stitch(&[&square], &[full_loop("sq")], 2.0, Point::new(0.0, 0.0));
    // 400 / 2 = 200 intervals.
    assert_eq!(out.points.len(), 201);
}

#[test]
fn test_partial_arc_wraps_forward() {
    let square = rect("sq", 0.0, 0.0, 10.0, 10.0);
    let ee = EntryExit {
        contour_id: "sq".into(),
        entry_t: 0.75,
        exit_t: 0.25,
    };
    let out = stitch(&[&square], &[ee], 1.0, Point::new(0.0, 10.0));

    assert_eq!(out.points.first(), Some(&Point::new(0.0, 10.0)));
    let end = out.points.last().unwrap();
    assert!(end.distance_to(&Point::new(10.0, 0.0)) < 1e-9);
    // Left edge down, then the bottom edge: half the perimeter.
    assert!((polyline_length(&out.points) - 20.0).abs() < 1e-9);
}

#[test]
fn test_bad_contours_are_skipped() {
    let good = rect("good", 0.0, 0.0, 1.0, 1.0);
    let dot = Contour::from_points("dot", &[Point::new(3.0, 3.0)], true);
    let orphan = rect("orphan", 5.0, 5.0, 6.0, 6.0);

    let out = stitch(
        &[&dot, &good, &orphan],
        &[full_loop("dot"), full_loop("good")],
        1.0,
        Point::new(0.0, 0.0),
    );

    assert_eq!(out.traced, vec!["good"]);
    let kinds: Vec<_> = out.warnings.iter().map(|w| w.kind.clone()).collect();
    assert_eq!(kinds, vec![WarningKind::NoSegments, WarningKind::MissingEntryExit]);
    assert_eq!(out.warnings[1].contour_id, "orphan");
}

#[test]
fn test_non_finite_parameters_are_skipped() {
    let a = rect("a", 0.0, 0.0, 10.0, 10.0);
    let b = rect("b", 20.0, 0.0, 30.0, 10.0);
    let c = rect("c", 40.0, 0.0, 50.0, 10.0);
    let entry_exits = [
        EntryExit {
            contour_id: "a".into(),
            entry_t: f64::NAN,
            exit_t: 0.0,
        },
        EntryExit {
            contour_id: "b".into(),
            entry_t: 0.0,
            exit_t: f64::INFINITY,
        },
        full_loop("c"),
    ];

    let out = stitch(&[&a, &b, &c], &entry_exits, 1.0, Point::new(0.0, 0.0));

    assert_eq!(out.traced, vec!["c"]);
    assert_eq!(out.warnings.len(), 2);
    assert_eq!(out.warnings[0].contour_id, "a");
    assert!(matches!(out.warnings[0].kind, WarningKind::InvalidParameter { t } if t.is_nan()));
    assert_eq!(
        out.warnings[1].kind,
        WarningKind::InvalidParameter { t: f64::INFINITY }
    );
    assert!(out.points.iter().all(|p| p.is_finite()));
}

#[test]
fn test_rapid_between_contours() {
    let a = rect("a", 0.0, 0.0, 1.0, 1.0);
    let b = rect("b", 10.0, 0.0, 11.0, 1.0);
    let out = stitch(&[&a, &b], &[full_loop("a"), full_loop("b")], 1.0, Point::new(0.0, 0.0));

    assert_eq!(out.rapid_indices.len(), 1);
    let i = out.rapid_indices[0];
    assert_eq!(out.points[i], Point::new(10.0, 0.0));
    assert_eq!(out.points[i - 1], Point::new(0.0, 0.0));
    assert!((out.travel_length() - 10.0).abs() < 1e-9);
}
