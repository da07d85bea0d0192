//! Stroke tool engine: each call handles one pointer sample `(prev -> cur)` on the live surface.

use crate::foundation::core::{BLACK, Point, Rect};
use crate::foundation::error::{RetouchError, RetouchResult};
use crate::geometry::interpolate::{interpolate_segment, interpolation_step};
use crate::raster::blend::CompositeMode;
use crate::raster::blur::gaussian_blur;
use crate::raster::coverage::{Bar, Capsule, Disk, Intersect};
use crate::raster::surface::{PixelBuffer, RasterSurface};
use crate::tools::{BrushSettings, Tool};

/// Apply one sample of a stroke-family tool.
pub fn apply_stroke_sample(
    surface: &mut RasterSurface,
    checkpoint: Option<&PixelBuffer>,
    tool: Tool,
    brush: &BrushSettings,
    prev: Point,
    cur: Point,
) -> RetouchResult<()> {
    match tool {
        Tool::Brush => brush_segment(surface, brush, prev, cur),
        Tool::Censor => censor_segment(surface, brush.size, prev, cur),
        Tool::Eraser => erase_segment(surface, checkpoint, brush.size, prev, cur)?,
        Tool::Blur => blur_segment(surface, brush, prev, cur)?,
        Tool::Pixelate => pixelate_segment(surface, brush, prev, cur),
        Tool::Lighten | Tool::Darken | Tool::Tint | Tool::Desaturate | Tool::Invert => {
            return Err(RetouchError::validation(format!(
                "'{}' is a blend tool and needs a blend stroke",
                tool.name()
            )));
        }
    }
    Ok(())
}

/// Round-capped line of width `size` in the brush color.
pub fn brush_segment(surface: &mut RasterSurface, brush: &BrushSettings, prev: Point, cur: Point) {
    let shape = Capsule {
        a: prev,
        b: cur,
        half_width: brush.radius(),
    };
    surface.fill(&shape, brush.color.opaque(), CompositeMode::Normal, 1.0);
}

/// Flat-capped black bar of width `size`.
pub fn censor_segment(surface: &mut RasterSurface, size: f64, prev: Point, cur: Point) {
    let shape = Bar {
        a: prev,
        b: cur,
        half_width: size / 2.0,
    };
    surface.fill(&shape, BLACK, CompositeMode::Normal, 1.0);
}

/// Restore checkpoint pixels in disks along the segment, or erase to transparency without one.
pub fn erase_segment(
    surface: &mut RasterSurface,
    checkpoint: Option<&PixelBuffer>,
    size: f64,
    prev: Point,
    cur: Point,
) -> RetouchResult<()> {
    for p in interpolate_segment(prev, cur, interpolation_step(size)) {
        let disk = Disk {
            center: p,
            radius: size / 2.0,
        };
        match checkpoint {
            Some(source) => surface.restore_from(source, &disk)?,
            None => surface.fill(&disk, BLACK, CompositeMode::DestinationOut, 1.0),
        }
    }
    Ok(())
}

/// Blur disks along the segment.
pub fn blur_segment(
    surface: &mut RasterSurface,
    brush: &BrushSettings,
    prev: Point,
    cur: Point,
) -> RetouchResult<()> {
    for p in interpolate_segment(prev, cur, interpolation_step(brush.size)) {
        blur_stamp(surface, p, brush.radius(), brush.intensity)?;
    }
    Ok(())
}

/// Blur a padded square around `center`, then write back only the brush disk.
///
/// The padding of `2 * sigma` gives the kernel real neighbors at the disk edge.
pub fn blur_stamp(
    surface: &mut RasterSurface,
    center: Point,
    radius: f64,
    sigma: f64,
) -> RetouchResult<()> {
    let reach = radius + 2.0 * sigma;
    let left = (center.x - reach).floor() as i64;
    let top = (center.y - reach).floor() as i64;
    let extent = (2.0 * reach).ceil() as u32 + 1;

    let region = surface.sample_region(left, top, extent, extent);
    if region.pixels.width() == 0 || region.pixels.height() == 0 {
        return Ok(());
    }
    let blurred = gaussian_blur(&region.pixels, sigma as f32)?;
    let disk = Disk { center, radius };
    surface.composite_region_clipped(
        i64::from(region.x),
        i64::from(region.y),
        &blurred,
        CompositeMode::Copy,
        1.0,
        &disk,
    );
    Ok(())
}

/// Pixelate disks along the segment.
pub fn pixelate_segment(
    surface: &mut RasterSurface,
    brush: &BrushSettings,
    prev: Point,
    cur: Point,
) {
    for p in interpolate_segment(prev, cur, interpolation_step(brush.size)) {
        pixelate_stamp(surface, p, brush.radius(), brush.intensity);
    }
}

/// Fill raster-grid cells of side `block` whose centers fall inside the brush disk with the color
/// sampled at the cell center.
///
/// The grid is anchored at the raster origin, not at the brush, so overlapping stamps line up.
/// Fills are clipped to the disk.
pub fn pixelate_stamp(surface: &mut RasterSurface, center: Point, radius: f64, block: f64) {
    let block = block.round().max(1.0);
    let disk = Disk { center, radius };
    let start_x = ((center.x - radius) / block).floor() * block;
    let start_y = ((center.y - radius) / block).floor() * block;
    let end_x = center.x + radius;
    let end_y = center.y + radius;

    let mut gy = start_y;
    while gy <= end_y {
        let mut gx = start_x;
        while gx <= end_x {
            let cell_center = Point::new(gx + block / 2.0, gy + block / 2.0);
            if cell_center.distance(center) <= radius {
                let color = surface
                    .pixels()
                    .get_clamped(cell_center.x.floor() as i64, cell_center.y.floor() as i64);
                let cell = Rect::new(gx, gy, gx + block, gy + block);
                surface.fill(&Intersect(cell, disk), color, CompositeMode::Copy, 1.0);
            }
            gx += block;
        }
        gy += block;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tools/stroke.rs"]
mod tests;
