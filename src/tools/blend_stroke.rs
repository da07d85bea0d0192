//! Blend-mode engine.
//!
//! A stroke captures the surface once at pointer-down. Each sample widens a binary stroke mask,
//! and the dirty area is recomposed as `snapshot ⊕ (mask × paint)`. A pixel covered many times in
//! one stroke therefore receives the effect exactly once.

use crate::foundation::core::{BLACK, Point, Rect, Rgba8, WHITE};
use crate::foundation::error::{RetouchError, RetouchResult};
use crate::raster::blend::{CompositeMode, blend_pixel};
use crate::raster::coverage::{Capsule, Coverage, covered_pixels};
use crate::raster::surface::{PixelBuffer, RasterSurface};
use crate::tools::{BrushSettings, Tool};

const MASKED: Rgba8 = [255, 255, 255, 255];

/// Mode, opacity and paint color a blend tool composites with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendParams {
    /// Composite operation.
    pub mode: CompositeMode,
    /// Opacity applied to the paint.
    pub opacity: f32,
    /// Paint color.
    pub paint: Rgba8,
}

/// Blend parameters for `tool`, or a validation error for stroke tools.
pub fn blend_params(tool: Tool, brush: &BrushSettings) -> RetouchResult<BlendParams> {
    let (mode, opacity, paint) = match tool {
        Tool::Invert => (CompositeMode::Difference, 1.0, WHITE),
        Tool::Desaturate => (CompositeMode::Saturation, 1.0, WHITE),
        Tool::Tint => (CompositeMode::Color, 1.0, brush.color.opaque()),
        Tool::Lighten => (CompositeMode::Screen, 0.4, WHITE),
        Tool::Darken => (CompositeMode::Multiply, 0.4, BLACK),
        Tool::Brush | Tool::Censor | Tool::Eraser | Tool::Blur | Tool::Pixelate => {
            return Err(RetouchError::validation(format!(
                "'{}' is not a blend tool",
                tool.name()
            )));
        }
    };
    Ok(BlendParams {
        mode,
        opacity,
        paint,
    })
}

/// In-progress blend stroke: stroke-start snapshot plus accumulated mask.
#[derive(Clone, Debug)]
pub struct BlendStroke {
    snapshot: PixelBuffer,
    mask: PixelBuffer,
    params: BlendParams,
    half_width: f64,
}

impl BlendStroke {
    /// Capture the surface and start an empty mask.
    pub fn begin(surface: &RasterSurface, tool: Tool, brush: &BrushSettings) -> RetouchResult<Self> {
        let params = blend_params(tool, brush)?;
        Ok(Self {
            snapshot: surface.pixels().clone(),
            mask: PixelBuffer::new(surface.width(), surface.height()),
            params,
            half_width: brush.radius(),
        })
    }

    /// Parameters this stroke composites with.
    pub fn params(&self) -> BlendParams {
        self.params
    }

    /// The binary stroke mask accumulated so far.
    pub fn mask(&self) -> &PixelBuffer {
        &self.mask
    }

    /// Extend the mask by the segment `(prev -> cur)` and recompose the touched area.
    pub fn paint(&mut self, surface: &mut RasterSurface, prev: Point, cur: Point) -> RetouchResult<()> {
        if !surface.pixels().same_size(&self.snapshot) {
            return Err(RetouchError::validation(
                "surface dimensions changed during a blend stroke",
            ));
        }
        let shape = Capsule {
            a: prev,
            b: cur,
            half_width: self.half_width,
        };
        let touched: Vec<(u32, u32)> =
            covered_pixels(&shape, self.mask.width(), self.mask.height()).collect();
        for &(x, y) in &touched {
            self.mask.put(x, y, MASKED);
        }
        let dirty = shape.bounds().intersect(Rect::new(
            0.0,
            0.0,
            f64::from(surface.width()),
            f64::from(surface.height()),
        ));
        self.recompose(surface, dirty);
        Ok(())
    }

    fn recompose(&self, surface: &mut RasterSurface, dirty: Rect) {
        let x0 = dirty.x0.floor().max(0.0) as u32;
        let y0 = dirty.y0.floor().max(0.0) as u32;
        let x1 = (dirty.x1.ceil() as u32).min(surface.width());
        let y1 = (dirty.y1.ceil() as u32).min(surface.height());
        let out = surface.pixels_mut();
        for y in y0..y1 {
            for x in x0..x1 {
                let px = compose_pixel(self.snapshot.get(x, y), self.mask.get(x, y), self.params);
                out.put(x, y, px);
            }
        }
    }
}

fn compose_pixel(base: Rgba8, mask: Rgba8, params: BlendParams) -> Rgba8 {
    if mask[3] == 0 {
        return base;
    }
    blend_pixel(base, params.paint, params.mode, params.opacity)
}

/// Recompose a whole `snapshot` under a same-sized `mask`.
pub fn compose(
    snapshot: &PixelBuffer,
    mask: &PixelBuffer,
    params: BlendParams,
) -> RetouchResult<PixelBuffer> {
    if !snapshot.same_size(mask) {
        return Err(RetouchError::validation(
            "stroke mask must match snapshot dimensions",
        ));
    }
    let mut out = snapshot.clone();
    for y in 0..snapshot.height() {
        for x in 0..snapshot.width() {
            out.put(x, y, compose_pixel(snapshot.get(x, y), mask.get(x, y), params));
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/tools/blend_stroke.rs"]
mod tests;
