use super::*;
use crate::foundation::core::Point;
use crate::raster::coverage::Disk;

fn gradient(w: u32, h: u32) -> RasterSurface {
    let mut buf = PixelBuffer::new(w, h);
    for y in 0..h {
        for x in 0..w {
            buf.put(x, y, [x as u8, y as u8, 7, 255]);
        }
    }
    RasterSurface::from_buffer(buf).unwrap()
}

#[test]
fn sample_region_copies_in_bounds_pixels() {
    let s = gradient(8, 8);
    let r = s.sample_region(2, 3, 2, 2);
    assert_eq!((r.x, r.y), (2, 3));
    assert_eq!(r.pixels.get(0, 0), [2, 3, 7, 255]);
    assert_eq!(r.pixels.get(1, 1), [3, 4, 7, 255]);
}

#[test]
fn sample_region_clamps_silently() {
    let s = gradient(8, 8);
    let r = s.sample_region(-3, 6, 5, 10);
    assert_eq!((r.x, r.y), (0, 6));
    assert_eq!((r.pixels.width(), r.pixels.height()), (2, 2));

    let miss = s.sample_region(100, 100, 4, 4);
    assert_eq!((miss.pixels.width(), miss.pixels.height()), (0, 0));
}

#[test]
fn composite_region_drops_offsurface_pixels() {
    let mut s = gradient(4, 4);
    let patch = PixelBuffer::filled(3, 3, [255, 0, 0, 255]);
    s.composite_region(-1, -1, &patch, CompositeMode::Normal, 1.0);
    assert_eq!(s.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(s.pixel(1, 1), [255, 0, 0, 255]);
    assert_eq!(s.pixel(2, 2), [2, 2, 7, 255]);
}

#[test]
fn clipped_composite_only_touches_clip() {
    let mut s = gradient(10, 10);
    let before = s.clone();
    let patch = PixelBuffer::filled(10, 10, [0, 0, 0, 255]);
    let clip = Disk {
        center: Point::new(5.0, 5.0),
        radius: 1.0,
    };
    s.composite_region_clipped(0, 0, &patch, CompositeMode::Normal, 1.0, &clip);
    for y in 0..10 {
        for x in 0..10 {
            let inside = (4..=5).contains(&x) && (4..=5).contains(&y);
            if inside {
                assert_eq!(s.pixel(x, y), [0, 0, 0, 255]);
            } else {
                assert_eq!(s.pixel(x, y), before.pixel(x, y));
            }
        }
    }
}

#[test]
fn restore_from_requires_matching_size() {
    let mut s = gradient(4, 4);
    let other = PixelBuffer::new(3, 3);
    let clip = Disk {
        center: Point::new(1.0, 1.0),
        radius: 1.0,
    };
    assert!(s.restore_from(&other, &clip).is_err());
}

#[test]
fn zero_sized_buffer_is_not_a_surface() {
    assert!(matches!(
        RasterSurface::from_buffer(PixelBuffer::new(0, 5)),
        Err(RetouchError::Load(_))
    ));
}

#[test]
fn load_image_uses_native_dimensions() {
    let s = gradient(5, 3);
    let png = s.export_snapshot().unwrap();
    let loaded = RasterSurface::load_image(&png).unwrap();
    assert_eq!(loaded.size(), Size { width: 5, height: 3 });
    assert_eq!(loaded, s);
}

#[test]
fn from_rgba8_checks_length() {
    assert!(PixelBuffer::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(PixelBuffer::from_rgba8(2, 2, vec![0; 16]).is_ok());
}
