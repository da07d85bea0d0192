use super::*;

fn count<C: Coverage>(shape: &C, w: u32, h: u32) -> usize {
    covered_pixels(shape, w, h).count()
}

#[test]
fn disk_covers_centers_within_radius() {
    let d = Disk {
        center: Point::new(5.0, 5.0),
        radius: 1.0,
    };
    let px: Vec<_> = covered_pixels(&d, 10, 10).collect();
    assert_eq!(px, vec![(4, 4), (5, 4), (4, 5), (5, 5)]);
}

#[test]
fn shapes_are_clamped_to_the_raster() {
    let d = Disk {
        center: Point::new(0.0, 0.0),
        radius: 3.0,
    };
    assert!(covered_pixels(&d, 10, 10).all(|(x, y)| x < 10 && y < 10));
    assert_eq!(count(&d, 10, 10), 8);

    let far = Disk {
        center: Point::new(-50.0, -50.0),
        radius: 3.0,
    };
    assert_eq!(count(&far, 10, 10), 0);
}

#[test]
fn capsule_has_round_ends() {
    let c = Capsule {
        a: Point::new(10.0, 10.0),
        b: Point::new(20.0, 10.0),
        half_width: 2.0,
    };
    assert!(c.covers(Point::new(15.0, 11.9)));
    assert!(c.covers(Point::new(21.5, 10.5)));
    assert!(!c.covers(Point::new(21.9, 11.9)));
}

#[test]
fn bar_has_flat_ends() {
    let b = Bar {
        a: Point::new(10.0, 10.0),
        b: Point::new(20.0, 10.0),
        half_width: 2.0,
    };
    assert!(b.covers(Point::new(15.0, 11.9)));
    assert!(b.covers(Point::new(10.0, 11.9)));
    assert!(!b.covers(Point::new(9.5, 10.0)));
    assert!(!b.covers(Point::new(20.5, 10.0)));
}

#[test]
fn zero_length_bar_is_a_square() {
    let b = Bar {
        a: Point::new(5.0, 5.0),
        b: Point::new(5.0, 5.0),
        half_width: 2.0,
    };
    assert_eq!(count(&b, 20, 20), 16);
}

#[test]
fn framed_ellipse_follows_rotation() {
    let frame = Affine::translate(Vec2::new(50.0, 50.0)) * Affine::rotate(std::f64::consts::FRAC_PI_2);
    let e = FramedEllipse {
        frame,
        radii: Vec2::new(20.0, 5.0),
    };
    // Rotated a quarter turn, the long axis is vertical.
    assert!(e.covers(Point::new(50.0, 68.0)));
    assert!(!e.covers(Point::new(68.0, 50.0)));
}

#[test]
fn intersection_requires_both() {
    let shape = Intersect(
        Rect::new(0.0, 0.0, 4.0, 4.0),
        Disk {
            center: Point::new(4.0, 4.0),
            radius: 2.0,
        },
    );
    let px: Vec<_> = covered_pixels(&shape, 10, 10).collect();
    assert_eq!(px, vec![(3, 2), (2, 3), (3, 3)]);
}
