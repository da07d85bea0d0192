//! Straight-alpha compositing following the W3C compositing model.
//!
//! `co = sa * (1 - da) * Cs + sa * da * B(Cb, Cs) + (1 - sa) * da * Cb`, `ao = sa + da * (1 - sa)`,
//! with the result un-premultiplied back to straight alpha.

use crate::foundation::core::Rgba8;
use crate::foundation::math::{u8_to_unit, unit_to_u8};

/// How source pixels combine with the pixels already on a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeMode {
    /// Source-over.
    Normal,
    /// Replace destination with source, alpha included.
    Copy,
    /// Channel product; darkens.
    Multiply,
    /// Inverted product of inverses; lightens.
    Screen,
    /// Absolute channel difference.
    Difference,
    /// Saturation of the source, hue and luminosity of the backdrop.
    Saturation,
    /// Hue and saturation of the source, luminosity of the backdrop.
    Color,
    /// Remove destination alpha where the source is opaque.
    DestinationOut,
}

/// Composite one straight-alpha `src` pixel onto `dst` with an opacity multiplier.
pub fn blend_pixel(dst: Rgba8, src: Rgba8, mode: CompositeMode, opacity: f32) -> Rgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if mode == CompositeMode::Copy {
        return src;
    }
    let sa = u8_to_unit(src[3]) * opacity;
    if sa <= 0.0 {
        return dst;
    }
    let da = u8_to_unit(dst[3]);

    if mode == CompositeMode::DestinationOut {
        let ao = da * (1.0 - sa);
        if ao <= 0.0 {
            return [0, 0, 0, 0];
        }
        return [dst[0], dst[1], dst[2], unit_to_u8(ao)];
    }
    if mode == CompositeMode::Normal && sa >= 1.0 {
        return src;
    }

    let cb = rgb_unit(dst);
    let cs = rgb_unit(src);
    let mixed = match mode {
        CompositeMode::Normal => cs,
        CompositeMode::Multiply => separable(cb, cs, |b, s| b * s),
        CompositeMode::Screen => separable(cb, cs, |b, s| b + s - b * s),
        CompositeMode::Difference => separable(cb, cs, |b, s| (b - s).abs()),
        CompositeMode::Saturation => set_lum(set_sat(cb, sat(cs)), lum(cb)),
        CompositeMode::Color => set_lum(cs, lum(cb)),
        CompositeMode::Copy | CompositeMode::DestinationOut => cs,
    };

    let ao = sa + da * (1.0 - sa);
    if ao <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for i in 0..3 {
        let co = sa * (1.0 - da) * cs[i] + sa * da * mixed[i] + (1.0 - sa) * da * cb[i];
        out[i] = unit_to_u8(co / ao);
    }
    out[3] = unit_to_u8(ao);
    out
}

fn rgb_unit(px: Rgba8) -> [f32; 3] {
    [u8_to_unit(px[0]), u8_to_unit(px[1]), u8_to_unit(px[2])]
}

fn separable(cb: [f32; 3], cs: [f32; 3], f: impl Fn(f32, f32) -> f32) -> [f32; 3] {
    [f(cb[0], cs[0]), f(cb[1], cs[1]), f(cb[2], cs[2])]
}

fn lum(c: [f32; 3]) -> f32 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn clip_color(c: [f32; 3]) -> [f32; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 {
        for v in &mut out {
            *v = l + (*v - l) * l / (l - n);
        }
    }
    if x > 1.0 {
        for v in &mut out {
            *v = l + (*v - l) * (1.0 - l) / (x - l);
        }
    }
    out
}

fn set_lum(c: [f32; 3], l: f32) -> [f32; 3] {
    let d = l - lum(c);
    clip_color([c[0] + d, c[1] + d, c[2] + d])
}

fn sat(c: [f32; 3]) -> f32 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn set_sat(c: [f32; 3], s: f32) -> [f32; 3] {
    let max = c[0].max(c[1]).max(c[2]);
    let min = c[0].min(c[1]).min(c[2]);
    if max <= min {
        return [0.0; 3];
    }
    let mut out = [0.0f32; 3];
    for i in 0..3 {
        out[i] = (c[i] - min) * s / (max - min);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blend.rs"]
mod tests;
