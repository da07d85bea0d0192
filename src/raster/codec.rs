use std::io::Cursor;

use anyhow::Context as _;
use image::{ExtendedColorType, ImageEncoder as _};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{RetouchError, RetouchResult};
use crate::foundation::math::mul_div255_u8;
use crate::raster::surface::PixelBuffer;

/// Decode encoded image bytes into straight-alpha RGBA8 at native resolution.
pub(crate) fn decode_rgba8(bytes: &[u8]) -> RetouchResult<PixelBuffer> {
    if bytes.is_empty() {
        return Err(RetouchError::load("image source is empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| RetouchError::load(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(RetouchError::load("image has no pixels"));
    }
    PixelBuffer::from_rgba8(width, height, rgba.into_raw())
}

pub(crate) fn encode_png(buf: &PixelBuffer) -> RetouchResult<Vec<u8>> {
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(Cursor::new(&mut out))
        .write_image(
            buf.as_raw(),
            buf.width(),
            buf.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| RetouchError::encode(format!("png: {e}")))?;
    Ok(out)
}

/// JPEG has no alpha; pixels are flattened over `background` first.
pub(crate) fn encode_jpeg(buf: &PixelBuffer, quality: u8, background: Rgba8) -> RetouchResult<Vec<u8>> {
    let mut rgb = Vec::with_capacity(buf.width() as usize * buf.height() as usize * 3);
    for px in buf.pixels() {
        let a = u16::from(px[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let v = u16::from(mul_div255_u8(u16::from(px[c]), a))
                + u16::from(mul_div255_u8(u16::from(background[c]), inv));
            rgb.push(v.min(255) as u8);
        }
    }
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut out), quality)
        .write_image(&rgb, buf.width(), buf.height(), ExtendedColorType::Rgb8)
        .map_err(|e| RetouchError::encode(format!("jpeg: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/codec.rs"]
mod tests;
