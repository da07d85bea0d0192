use super::*;
use crate::foundation::core::{Rgb, Size, WHITE};

fn white(w: u32, h: u32) -> RasterSurface {
    RasterSurface::new(Size::new(w, h).unwrap(), WHITE)
}

fn brush(size: f64, intensity: f64) -> BrushSettings {
    BrushSettings::new(size, Rgb::new(255, 0, 0), intensity).unwrap()
}

fn count(s: &RasterSurface, px: [u8; 4]) -> usize {
    s.pixels().pixels().filter(|p| *p == px).count()
}

#[test]
fn brush_tap_paints_a_disk_in_brush_color() {
    let mut s = white(20, 20);
    let p = Point::new(10.0, 10.0);
    apply_stroke_sample(&mut s, None, Tool::Brush, &brush(6.0, 8.0), p, p).unwrap();
    assert_eq!(s.pixel(10, 10), [255, 0, 0, 255]);
    assert_eq!(s.pixel(0, 0), WHITE);
    // Disk of radius 3 at a grid corner covers 32 pixel centers.
    assert_eq!(count(&s, [255, 0, 0, 255]), 32);
}

#[test]
fn censor_tap_paints_a_square() {
    let mut s = white(20, 20);
    let p = Point::new(10.0, 10.0);
    apply_stroke_sample(&mut s, None, Tool::Censor, &brush(4.0, 8.0), p, p).unwrap();
    assert_eq!(count(&s, BLACK), 16);
    for y in 8..12 {
        for x in 8..12 {
            assert_eq!(s.pixel(x, y), BLACK);
        }
    }
}

#[test]
fn censor_segment_has_flat_caps() {
    let mut s = white(30, 10);
    censor_segment(&mut s, 4.0, Point::new(5.0, 5.0), Point::new(25.0, 5.0));
    assert_eq!(s.pixel(5, 5), BLACK);
    assert_eq!(s.pixel(24, 5), BLACK);
    assert_eq!(s.pixel(4, 5), WHITE);
    assert_eq!(s.pixel(25, 5), WHITE);
}

#[test]
fn eraser_restores_checkpoint_inside_disk_only() {
    let checkpoint = PixelBuffer::filled(20, 20, [0, 0, 255, 255]);
    let mut s = white(20, 20);
    let p = Point::new(10.0, 10.0);
    apply_stroke_sample(&mut s, Some(&checkpoint), Tool::Eraser, &brush(6.0, 8.0), p, p).unwrap();
    assert_eq!(s.pixel(10, 10), [0, 0, 255, 255]);
    assert_eq!(s.pixel(2, 2), WHITE);
}

#[test]
fn eraser_without_checkpoint_clears_to_transparent() {
    let mut s = white(20, 20);
    let p = Point::new(10.0, 10.0);
    apply_stroke_sample(&mut s, None, Tool::Eraser, &brush(6.0, 8.0), p, p).unwrap();
    assert_eq!(s.pixel(10, 10)[3], 0);
    assert_eq!(s.pixel(2, 2), WHITE);
}

#[test]
fn blur_only_changes_pixels_inside_the_disk() {
    let mut buf = PixelBuffer::new(40, 40);
    for y in 0..40 {
        for x in 0..40 {
            let v = if (x / 2 + y / 2) % 2 == 0 { 0 } else { 255 };
            buf.put(x, y, [v, v, v, 255]);
        }
    }
    let mut s = RasterSurface::from_buffer(buf).unwrap();
    let before = s.clone();
    let center = Point::new(20.0, 20.0);
    blur_stamp(&mut s, center, 6.0, 3.0).unwrap();

    let mut changed = 0;
    for y in 0..40u32 {
        for x in 0..40u32 {
            let inside = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5).distance(center) <= 6.0;
            if !inside {
                assert_eq!(s.pixel(x, y), before.pixel(x, y), "({x},{y}) outside disk changed");
            } else if s.pixel(x, y) != before.pixel(x, y) {
                changed += 1;
            }
        }
    }
    assert!(changed > 0);
}

#[test]
fn blur_near_the_edge_does_not_fail() {
    let mut s = white(10, 10);
    blur_stamp(&mut s, Point::new(0.0, 0.0), 5.0, 2.0).unwrap();
    assert_eq!(s.pixel(0, 0), WHITE);
}

#[test]
fn pixelate_cells_are_uniform_and_grid_aligned() {
    let mut buf = PixelBuffer::new(32, 32);
    for y in 0..32 {
        for x in 0..32 {
            buf.put(x, y, [(x * 8) as u8, (y * 8) as u8, 0, 255]);
        }
    }
    let mut s = RasterSurface::from_buffer(buf).unwrap();
    pixelate_stamp(&mut s, Point::new(16.0, 16.0), 10.0, 4.0);

    // Cell [16,20)x[16,20) lies fully inside the disk and takes its center color.
    let expected = [(18 * 8) as u8, (18 * 8) as u8, 0, 255];
    for y in 16..20 {
        for x in 16..20 {
            assert_eq!(s.pixel(x, y), expected);
        }
    }
    // Far corners are outside the disk.
    assert_eq!(s.pixel(0, 0), [0, 0, 0, 255]);
}

#[test]
fn pixelate_writes_inside_disk_only() {
    let mut buf = PixelBuffer::new(32, 32);
    for y in 0..32 {
        for x in 0..32 {
            buf.put(x, y, [(x * 8) as u8, (y * 8) as u8, 0, 255]);
        }
    }
    let mut s = RasterSurface::from_buffer(buf).unwrap();
    let before = s.clone();
    let center = Point::new(16.0, 16.0);
    pixelate_stamp(&mut s, center, 7.0, 5.0);
    for y in 0..32u32 {
        for x in 0..32u32 {
            let inside = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5).distance(center) <= 7.0;
            if !inside {
                assert_eq!(s.pixel(x, y), before.pixel(x, y));
            }
        }
    }
}

#[test]
fn blend_tools_are_rejected() {
    let mut s = white(4, 4);
    let p = Point::new(1.0, 1.0);
    let err = apply_stroke_sample(&mut s, None, Tool::Invert, &brush(2.0, 1.0), p, p).unwrap_err();
    assert!(matches!(err, RetouchError::Validation(_)));
}
