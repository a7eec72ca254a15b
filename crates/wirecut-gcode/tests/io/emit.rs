use proptest::prelude::*;
use wirecut_core::{Point, Units};
use wirecut_gcode::{emit, GcodeEmitter};

#[test]
fn test_program_layout() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ];
    let text = emit(&points, 1500.0, Units::MM, Point::new(0.0, 0.0), 1.0);
    assert_eq!(
        text,
        "G21\nG90\nG0 X0.000 Y0.000\nG1 F1500.0\nG1 X10.000 Y0.000\nG1 X10.000 Y10.000\nM2"
    );
    assert!(!text.ends_with('\n'));
}

#[test]
fn test_inch_units_do_not_convert() {
    let text = emit(&[Point::new(25.4, 0.0)], 40.0, Units::INCH, Point::default(), 1.0);
    assert!(text.starts_with("G20\n"));
    assert!(text.contains("G0 X25.400 Y0.000"));
}

#[test]
fn test_negative_scale_mirrors() {
    let text = GcodeEmitter::new(1000.0, Units::MM)
        .with_scale(-1.0)
        .emit(&[Point::new(2.0, 0.0), Point::new(0.0, 3.0)]);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[2], "G0 X-2.000 Y0.000");
    assert_eq!(lines[4], "G1 X0.000 Y-3.000");
}

proptest! {
    #[test]
    fn emission_is_deterministic(
        coords in prop::collection::vec((-1000.0..1000.0f64, -1000.0..1000.0f64), 0..40),
        feed in 1.0..5000.0f64,
    ) {
        let points: Vec<Point> = coords.into_iter().map(Point::from).collect();
        let a = emit(&points, feed, Units::MM, Point::default(), 1.0);
        let b = emit(&points, feed, Units::MM, Point::default(), 1.0);
        prop_assert_eq!(&a, &b);
        if points.is_empty() {
            prop_assert!(a.is_empty());
        } else {
            // Header (4) + one move per remaining point + program end.
            prop_assert_eq!(a.lines().count(), points.len() + 4);
        }
    }
}
