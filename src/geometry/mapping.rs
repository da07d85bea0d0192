use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::error::{RetouchError, RetouchResult};

/// Map a pointer position in display space onto raster pixels.
///
/// `display` is where the surface is drawn on screen; the surface keeps its native size, so the
/// scale is `surface / display` per axis.
pub fn map_display_point(p: Point, display: Rect, surface: Size) -> RetouchResult<Point> {
    if display.width() <= 0.0 || display.height() <= 0.0 {
        return Err(RetouchError::validation("display rect must have positive area"));
    }
    let sx = f64::from(surface.width) / display.width();
    let sy = f64::from(surface.height) / display.height();
    Ok(Point::new((p.x - display.x0) * sx, (p.y - display.y0) * sy))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mapping.rs"]
mod tests;
