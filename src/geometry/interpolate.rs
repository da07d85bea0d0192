use crate::foundation::core::Point;

/// Largest gap allowed between stamped samples for a brush of `size`.
pub fn interpolation_step(size: f64) -> f64 {
    (size / 4.0).max(1.0)
}

/// Points from `prev` (exclusive) to `cur` (inclusive), evenly spaced no further than `step` apart.
///
/// A zero-length segment yields just `cur`, so a tap still stamps once.
pub fn interpolate_segment(prev: Point, cur: Point, step: f64) -> Vec<Point> {
    let step = if step.is_finite() && step > 0.0 { step } else { 1.0 };
    let dist = prev.distance(cur);
    let n = (dist / step).ceil().max(1.0) as usize;
    (1..=n)
        .map(|i| prev.lerp(cur, i as f64 / n as f64))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/interpolate.rs"]
mod tests;
