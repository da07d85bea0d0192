//! Non-destructive display filters and their bake into pixels.
//!
//! Values follow CSS filter functions: percentages for the color stages, degrees for
//! `hue_rotate`, and pixels (Gaussian standard deviation) for `blur`.

use image::{ImageBuffer, Rgba, imageops};
use rayon::prelude::*;

use crate::foundation::error::{RetouchError, RetouchResult};
use crate::foundation::math::{u8_to_unit, unit_to_u8};
use crate::raster::blur::gaussian_blur;
use crate::raster::surface::PixelBuffer;

type Matrix3 = [[f32; 3]; 3];

/// Display filter values as a host would show them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSettings {
    /// Brightness percent; 100 is identity.
    pub brightness: f64,
    /// Contrast percent; 100 is identity.
    pub contrast: f64,
    /// Saturation percent; 100 is identity.
    pub saturation: f64,
    /// Grayscale percent; 0 is identity.
    pub grayscale: f64,
    /// Sepia percent; 0 is identity.
    pub sepia: f64,
    /// Invert percent; 0 is identity.
    pub invert: f64,
    /// Hue rotation in degrees; 0 is identity.
    pub hue_rotate: f64,
    /// Blur radius in pixels; 0 is identity.
    pub blur: f64,
    /// Clockwise rotation in degrees: 0, 90, 180 or 270.
    pub rotation: u32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            grayscale: 0.0,
            sepia: 0.0,
            invert: 0.0,
            hue_rotate: 0.0,
            blur: 0.0,
            rotation: 0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum ColorStage {
    Brightness(f32),
    Contrast(f32),
    Matrix(Matrix3),
    Invert(f32),
}

impl FilterSettings {
    /// True when baking would return the input unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Reject negative amounts, non-finite values, and rotations that are not quarter turns.
    pub fn validate(&self) -> RetouchResult<()> {
        let named = [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturation", self.saturation),
            ("grayscale", self.grayscale),
            ("sepia", self.sepia),
            ("invert", self.invert),
            ("blur", self.blur),
        ];
        for (name, v) in named {
            if !v.is_finite() || v < 0.0 {
                return Err(RetouchError::validation(format!(
                    "filter {name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if !self.hue_rotate.is_finite() {
            return Err(RetouchError::validation("filter hue_rotate must be finite"));
        }
        if !matches!(self.rotation, 0 | 90 | 180 | 270) {
            return Err(RetouchError::validation(format!(
                "rotation must be 0, 90, 180 or 270, got {}",
                self.rotation
            )));
        }
        Ok(())
    }

    fn color_stages(&self) -> Vec<ColorStage> {
        let mut stages = Vec::new();
        if self.brightness != 100.0 {
            stages.push(ColorStage::Brightness((self.brightness / 100.0) as f32));
        }
        if self.contrast != 100.0 {
            stages.push(ColorStage::Contrast((self.contrast / 100.0) as f32));
        }
        if self.saturation != 100.0 {
            stages.push(ColorStage::Matrix(saturate_matrix(
                (self.saturation / 100.0) as f32,
            )));
        }
        if self.grayscale != 0.0 {
            stages.push(ColorStage::Matrix(grayscale_matrix(
                (self.grayscale / 100.0).min(1.0) as f32,
            )));
        }
        if self.sepia != 0.0 {
            stages.push(ColorStage::Matrix(sepia_matrix(
                (self.sepia / 100.0).min(1.0) as f32,
            )));
        }
        if self.invert != 0.0 {
            stages.push(ColorStage::Invert((self.invert / 100.0).min(1.0) as f32));
        }
        if self.hue_rotate != 0.0 {
            stages.push(ColorStage::Matrix(hue_rotate_matrix(
                self.hue_rotate.to_radians() as f32,
            )));
        }
        stages
    }
}

/// Bake `filters` into a copy of `src`. Identity stages are skipped, so default settings return
/// an identical buffer.
#[tracing::instrument(skip(src), fields(width = src.width(), height = src.height()))]
pub fn bake_filters(src: &PixelBuffer, filters: &FilterSettings) -> RetouchResult<PixelBuffer> {
    filters.validate()?;
    let mut out = src.clone();

    let stages = filters.color_stages();
    if !stages.is_empty() {
        let (w, h) = (out.width(), out.height());
        let mut data = out.into_raw();
        data.par_chunks_exact_mut(4).for_each(|px| {
            let mut rgb = [u8_to_unit(px[0]), u8_to_unit(px[1]), u8_to_unit(px[2])];
            for stage in &stages {
                rgb = apply_stage(*stage, rgb);
            }
            px[0] = unit_to_u8(rgb[0]);
            px[1] = unit_to_u8(rgb[1]);
            px[2] = unit_to_u8(rgb[2]);
        });
        out = PixelBuffer::from_rgba8(w, h, data)?;
    }

    if filters.blur > 0.0 {
        out = gaussian_blur(&out, filters.blur as f32)?;
    }

    if filters.rotation != 0 {
        out = rotate_quarter_turns(out, filters.rotation)?;
    }
    Ok(out)
}

fn apply_stage(stage: ColorStage, rgb: [f32; 3]) -> [f32; 3] {
    let out = match stage {
        ColorStage::Brightness(b) => rgb.map(|c| c * b),
        ColorStage::Contrast(k) => rgb.map(|c| (c - 0.5) * k + 0.5),
        ColorStage::Invert(a) => rgb.map(|c| c * (1.0 - a) + (1.0 - c) * a),
        ColorStage::Matrix(m) => {
            let mut o = [0.0; 3];
            for (row, v) in m.iter().zip(o.iter_mut()) {
                *v = row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2];
            }
            o
        }
    };
    out.map(|c| c.clamp(0.0, 1.0))
}

fn saturate_matrix(s: f32) -> Matrix3 {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn grayscale_matrix(g: f32) -> Matrix3 {
    let a = 1.0 - g;
    [
        [0.2126 + 0.7874 * a, 0.7152 - 0.7152 * a, 0.0722 - 0.0722 * a],
        [0.2126 - 0.2126 * a, 0.7152 + 0.2848 * a, 0.0722 - 0.0722 * a],
        [0.2126 - 0.2126 * a, 0.7152 - 0.7152 * a, 0.0722 + 0.9278 * a],
    ]
}

fn sepia_matrix(s: f32) -> Matrix3 {
    let a = 1.0 - s;
    [
        [0.393 + 0.607 * a, 0.769 - 0.769 * a, 0.189 - 0.189 * a],
        [0.349 - 0.349 * a, 0.686 + 0.314 * a, 0.168 - 0.168 * a],
        [0.272 - 0.272 * a, 0.534 - 0.534 * a, 0.131 + 0.869 * a],
    ]
}

fn hue_rotate_matrix(rad: f32) -> Matrix3 {
    let (sin, cos) = rad.sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

fn rotate_quarter_turns(buf: PixelBuffer, degrees: u32) -> RetouchResult<PixelBuffer> {
    let (w, h) = (buf.width(), buf.height());
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_raw(w, h, buf.into_raw())
        .ok_or_else(|| RetouchError::validation("pixel buffer does not match its dimensions"))?;
    let rotated = match degrees {
        90 => imageops::rotate90(&img),
        180 => imageops::rotate180(&img),
        270 => imageops::rotate270(&img),
        _ => img,
    };
    let (rw, rh) = rotated.dimensions();
    PixelBuffer::from_rgba8(rw, rh, rotated.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/filters.rs"]
mod tests;
