//! Binary pixel coverage for tool shapes.
//!
//! A pixel belongs to a shape when its center `(x + 0.5, y + 0.5)` lies inside it. There is no
//! antialiasing; every tool edge is exact and reproducible.

use crate::foundation::core::{Affine, Point, Rect, Vec2, pixel_center};

/// A region of the raster plane that can answer point-membership queries.
pub trait Coverage {
    /// Conservative bounding box in surface coordinates.
    fn bounds(&self) -> Rect;
    /// `true` when `p` lies inside the shape.
    fn covers(&self, p: Point) -> bool;
}

/// Solid disk.
#[derive(Clone, Copy, Debug)]
pub struct Disk {
    /// Disk center.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
}

impl Coverage for Disk {
    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (self.radius * 2.0, self.radius * 2.0))
    }

    fn covers(&self, p: Point) -> bool {
        (p - self.center).hypot2() <= self.radius * self.radius
    }
}

/// Line segment with round caps (every point within `half_width` of the segment).
#[derive(Clone, Copy, Debug)]
pub struct Capsule {
    /// Segment start.
    pub a: Point,
    /// Segment end.
    pub b: Point,
    /// Half the stroke width.
    pub half_width: f64,
}

impl Coverage for Capsule {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.a, self.b).inflate(self.half_width, self.half_width)
    }

    fn covers(&self, p: Point) -> bool {
        let d = self.b - self.a;
        let len2 = d.hypot2();
        let t = if len2 <= f64::EPSILON {
            0.0
        } else {
            ((p - self.a).dot(d) / len2).clamp(0.0, 1.0)
        };
        let nearest = self.a + d * t;
        (p - nearest).hypot2() <= self.half_width * self.half_width
    }
}

/// Line segment with flat (butt) caps: a rectangle aligned to the segment.
///
/// A zero-length bar covers a square of side `2 * half_width` so a tap stays visible.
#[derive(Clone, Copy, Debug)]
pub struct Bar {
    /// Segment start.
    pub a: Point,
    /// Segment end.
    pub b: Point,
    /// Half the bar thickness.
    pub half_width: f64,
}

impl Coverage for Bar {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.a, self.b).inflate(self.half_width, self.half_width)
    }

    fn covers(&self, p: Point) -> bool {
        let d = self.b - self.a;
        let len = d.hypot();
        let rel = p - self.a;
        if len <= f64::EPSILON {
            return rel.x.abs() <= self.half_width && rel.y.abs() <= self.half_width;
        }
        let along = rel.dot(d) / len;
        let across = rel.cross(d).abs() / len;
        (0.0..=len).contains(&along) && across <= self.half_width
    }
}

/// Axis-aligned rectangle expressed in a rotated local frame.
#[derive(Clone, Copy, Debug)]
pub struct FramedRect {
    /// Local-to-surface transform.
    pub frame: Affine,
    /// Rectangle in local coordinates.
    pub local: Rect,
}

impl Coverage for FramedRect {
    fn bounds(&self) -> Rect {
        self.frame.transform_rect_bbox(self.local)
    }

    fn covers(&self, p: Point) -> bool {
        let l = self.frame.inverse() * p;
        l.x >= self.local.x0 && l.x <= self.local.x1 && l.y >= self.local.y0 && l.y <= self.local.y1
    }
}

/// Ellipse centered on the origin of a rotated local frame.
#[derive(Clone, Copy, Debug)]
pub struct FramedEllipse {
    /// Local-to-surface transform.
    pub frame: Affine,
    /// Horizontal and vertical radii in local coordinates.
    pub radii: Vec2,
}

impl Coverage for FramedEllipse {
    fn bounds(&self) -> Rect {
        self.frame.transform_rect_bbox(Rect::new(
            -self.radii.x,
            -self.radii.y,
            self.radii.x,
            self.radii.y,
        ))
    }

    fn covers(&self, p: Point) -> bool {
        if self.radii.x <= 0.0 || self.radii.y <= 0.0 {
            return false;
        }
        let l = self.frame.inverse() * p;
        let nx = l.x / self.radii.x;
        let ny = l.y / self.radii.y;
        nx * nx + ny * ny <= 1.0
    }
}

/// Points covered by both shapes.
#[derive(Clone, Copy, Debug)]
pub struct Intersect<A, B>(pub A, pub B);

impl<A: Coverage, B: Coverage> Coverage for Intersect<A, B> {
    fn bounds(&self) -> Rect {
        self.0.bounds().intersect(self.1.bounds())
    }

    fn covers(&self, p: Point) -> bool {
        self.0.covers(p) && self.1.covers(p)
    }
}

impl Coverage for Rect {
    fn bounds(&self) -> Rect {
        *self
    }

    fn covers(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x < self.x1 && p.y >= self.y0 && p.y < self.y1
    }
}

/// Pixel coordinates inside a `width × height` raster whose centers `shape` covers, row-major.
pub fn covered_pixels<C: Coverage + ?Sized>(
    shape: &C,
    width: u32,
    height: u32,
) -> impl Iterator<Item = (u32, u32)> + '_ {
    let b = shape.bounds();
    let (x0, x1) = pixel_span(b.x0, b.x1, width);
    let (y0, y1) = pixel_span(b.y0, b.y1, height);
    (y0..y1).flat_map(move |y| {
        (x0..x1).filter_map(move |x| {
            shape
                .covers(pixel_center(i64::from(x), i64::from(y)))
                .then_some((x, y))
        })
    })
}

fn pixel_span(lo: f64, hi: f64, limit: u32) -> (u32, u32) {
    if !lo.is_finite() || !hi.is_finite() || hi < lo {
        return (0, 0);
    }
    let start = (lo - 0.5).floor().max(0.0).min(f64::from(limit)) as u32;
    let end = ((hi - 0.5).floor() + 1.0).max(0.0).min(f64::from(limit)) as u32;
    (start, end.max(start))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/coverage.rs"]
mod tests;
