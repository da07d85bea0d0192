use super::*;

#[test]
fn step_never_drops_below_one() {
    assert_eq!(interpolation_step(2.0), 1.0);
    assert_eq!(interpolation_step(40.0), 10.0);
}

#[test]
fn zero_length_segment_yields_current_point() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(interpolate_segment(p, p, 2.0), vec![p]);
}

#[test]
fn samples_end_on_current_and_respect_step() {
    let pts = interpolate_segment(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 3.0);
    assert_eq!(pts.len(), 4);
    assert_eq!(*pts.last().unwrap(), Point::new(10.0, 0.0));
    let mut prev = Point::new(0.0, 0.0);
    for p in pts {
        assert!(prev.distance(p) <= 3.0 + 1e-9);
        prev = p;
    }
}

#[test]
fn bad_step_falls_back_to_one_pixel() {
    let pts = interpolate_segment(Point::new(0.0, 0.0), Point::new(5.0, 0.0), 0.0);
    assert_eq!(pts.len(), 5);
}
