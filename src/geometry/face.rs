//! Per-face drawing frame derived from a detection.

use crate::faces::detection::FaceDetection;
use crate::foundation::core::{Affine, Point, Vec2};

/// Center, extent, and tilt of one detected face.
///
/// Derived on demand from a [`FaceDetection`]; never cached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceGeometry {
    /// Bounding-box center in raster space.
    pub center: Point,
    /// Bounding-box width.
    pub width: f64,
    /// Bounding-box height.
    pub height: f64,
    /// Eye-line angle in radians (0 when fewer than two landmarks exist).
    pub angle: f64,
}

impl FaceGeometry {
    /// Derive geometry from a detection; the angle points from landmark 0 (right eye) to
    /// landmark 1 (left eye).
    pub fn from_detection(face: &FaceDetection) -> Self {
        let b = face.bounding_box;
        let angle = match face.landmarks.as_slice() {
            [right, left, ..] => (left.y - right.y).atan2(left.x - right.x),
            _ => 0.0,
        };
        Self {
            center: Point::new(b.origin_x + b.width / 2.0, b.origin_y + b.height / 2.0),
            width: b.width,
            height: b.height,
            angle,
        }
    }

    /// Local-to-raster transform: origin at the face center, x axis along the eye line.
    pub fn frame(&self) -> Affine {
        Affine::translate(self.center.to_vec2()) * Affine::rotate(self.angle)
    }

    /// Half extents of the bounding box.
    pub fn radii(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/face.rs"]
mod tests;
