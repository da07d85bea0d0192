//! Face effect engine.
//!
//! Every face is processed in its own rotated frame (origin at the box center, x along the eye
//! line). The whole batch runs on a working copy that replaces the surface only when all faces
//! succeeded.

use crate::faces::detection::{FaceDetection, FaceEffect};
use crate::foundation::core::{BLACK, Point, Rect, Rgba8};
use crate::foundation::error::{RetouchError, RetouchResult};
use crate::geometry::face::FaceGeometry;
use crate::raster::blend::{CompositeMode, blend_pixel};
use crate::raster::blur::gaussian_blur;
use crate::raster::coverage::{FramedEllipse, FramedRect, covered_pixels};
use crate::raster::surface::{PixelBuffer, RasterSurface};

/// Outcome counts for one face-effect batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceEffectReport {
    /// Faces the effect was drawn for.
    pub applied: usize,
    /// Faces skipped for lacking the geometry the effect needs.
    pub skipped: usize,
}

/// Block side used by `pixelate-face` for a face of `face_width`.
pub fn pixelate_block_size(face_width: f64) -> u32 {
    ((face_width / 10.0).round() as u32).max(4)
}

/// Gaussian sigma used by `blur-face` for a face of `face_width`.
pub fn blur_sigma(face_width: f64) -> f32 {
    (face_width / 12.0).max(4.0) as f32
}

/// Apply `effect` to every face as one atomic batch.
#[tracing::instrument(skip(surface, faces), fields(faces = faces.len(), effect = effect.name()))]
pub fn apply_face_effects(
    surface: &mut RasterSurface,
    faces: &[FaceDetection],
    effect: FaceEffect,
) -> RetouchResult<FaceEffectReport> {
    for face in faces {
        face.validate()?;
        check_within_reach(surface, face)?;
    }

    let mut work = surface.clone();
    let mut report = FaceEffectReport::default();
    for (idx, face) in faces.iter().enumerate() {
        let geom = FaceGeometry::from_detection(face);
        match effect {
            FaceEffect::CensorEyes => {
                if face.landmarks.len() < 2 {
                    tracing::warn!(face = idx, "censor-eyes needs two eye landmarks; skipping face");
                    report.skipped += 1;
                    continue;
                }
                censor_eyes(&mut work, &geom);
            }
            FaceEffect::BlurFace => {
                let texture = capture_upright(&work, face);
                let blurred = gaussian_blur(&texture.pixels, blur_sigma(geom.width))?;
                draw_in_ellipse(&mut work, &geom, &texture.with_pixels(blurred));
            }
            FaceEffect::PixelateFace => {
                let texture = capture_upright(&work, face);
                let blocky = pixelate_blocks(&texture.pixels, pixelate_block_size(geom.width));
                draw_in_ellipse(&mut work, &geom, &texture.with_pixels(blocky));
            }
        }
        report.applied += 1;
    }

    surface.replace_pixels(work.pixels().clone())?;
    tracing::debug!(applied = report.applied, skipped = report.skipped, "face effects applied");
    Ok(report)
}

/// A face box must lie within one surface size of the surface on every side.
fn check_within_reach(surface: &RasterSurface, face: &FaceDetection) -> RetouchResult<()> {
    let w = f64::from(surface.width());
    let h = f64::from(surface.height());
    let b = &face.bounding_box;
    let inside = b.origin_x >= -w
        && b.origin_y >= -h
        && b.origin_x + b.width <= 2.0 * w
        && b.origin_y + b.height <= 2.0 * h;
    if !inside {
        return Err(RetouchError::validation(format!(
            "face box {}x{} at ({}, {}) is out of reach of a {}x{} surface",
            b.width,
            b.height,
            b.origin_x,
            b.origin_y,
            surface.width(),
            surface.height()
        )));
    }
    Ok(())
}

/// Opaque black bar, full face width and a quarter of its height, centered `0.1 × height` above
/// the face center in the eye-line frame.
pub fn censor_eyes(surface: &mut RasterSurface, geom: &FaceGeometry) {
    let half_w = geom.width / 2.0;
    let bar_center_y = -0.1 * geom.height;
    let half_h = 0.125 * geom.height;
    let bar = FramedRect {
        frame: geom.frame(),
        local: Rect::new(-half_w, bar_center_y - half_h, half_w, bar_center_y + half_h),
    };
    surface.fill(&bar, BLACK, CompositeMode::Normal, 1.0);
}

/// Upright bounding-box pixels, edge-extended where the box leaves the surface.
#[derive(Clone, Debug)]
struct FaceTexture {
    /// Fractional offset of the box origin inside texel `(0, 0)`.
    offset: Point,
    pixels: PixelBuffer,
}

impl FaceTexture {
    fn with_pixels(&self, pixels: PixelBuffer) -> Self {
        Self {
            offset: self.offset,
            pixels,
        }
    }

    fn texel(&self, x: f64, y: f64) -> Rgba8 {
        self.pixels.get_clamped(x.floor() as i64, y.floor() as i64)
    }
}

fn capture_upright(surface: &RasterSurface, face: &FaceDetection) -> FaceTexture {
    let b = &face.bounding_box;
    let x0 = b.origin_x.floor();
    let y0 = b.origin_y.floor();
    let w = ((b.origin_x + b.width).ceil() - x0).max(1.0) as u32;
    let h = ((b.origin_y + b.height).ceil() - y0).max(1.0) as u32;

    let src = surface.pixels();
    let mut pixels = PixelBuffer::new(w, h);
    for ty in 0..h {
        for tx in 0..w {
            let px = src.get_clamped(x0 as i64 + i64::from(tx), y0 as i64 + i64::from(ty));
            pixels.put(tx, ty, px);
        }
    }
    FaceTexture {
        offset: Point::new(b.origin_x - x0, b.origin_y - y0),
        pixels,
    }
}

/// Replace each `block × block` cell (anchored at the texture origin) with its average color.
pub fn pixelate_blocks(src: &PixelBuffer, block: u32) -> PixelBuffer {
    let block = block.max(1);
    let mut out = src.clone();
    for by in (0..src.height()).step_by(block as usize) {
        for bx in (0..src.width()).step_by(block as usize) {
            let x1 = (bx + block).min(src.width());
            let y1 = (by + block).min(src.height());
            let mut sum = [0u64; 4];
            for y in by..y1 {
                for x in bx..x1 {
                    let px = src.get(x, y);
                    for (acc, v) in sum.iter_mut().zip(px) {
                        *acc += u64::from(v);
                    }
                }
            }
            let n = u64::from((x1 - bx) * (y1 - by));
            let avg = sum.map(|s| ((s + n / 2) / n) as u8);
            for y in by..y1 {
                for x in bx..x1 {
                    out.put(x, y, avg);
                }
            }
        }
    }
    out
}

/// Draw `texture` centered in the face frame, clipped to the inscribed rotated ellipse.
fn draw_in_ellipse(surface: &mut RasterSurface, geom: &FaceGeometry, texture: &FaceTexture) {
    let frame = geom.frame();
    let ellipse = FramedEllipse {
        frame,
        radii: geom.radii(),
    };
    let to_local = frame.inverse();
    let radii = geom.radii();
    let covered: Vec<(u32, u32)> =
        covered_pixels(&ellipse, surface.width(), surface.height()).collect();
    let out = surface.pixels_mut();
    for (x, y) in covered {
        let local = to_local * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        let tx = local.x + radii.x + texture.offset.x;
        let ty = local.y + radii.y + texture.offset.y;
        let px = blend_pixel(out.get(x, y), texture.texel(tx, ty), CompositeMode::Normal, 1.0);
        out.put(x, y, px);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/faces/effects.rs"]
mod tests;
