use crate::foundation::core::{Rgba8, Size};
use crate::foundation::error::{RetouchError, RetouchResult};
use crate::raster::blend::{CompositeMode, blend_pixel};
use crate::raster::codec;
use crate::raster::coverage::{Coverage, covered_pixels};

/// Tightly packed, row-major, straight-alpha RGBA8 pixels.
///
/// Zero-sized buffers are allowed; they describe a region that fell entirely off a surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Buffer where every pixel is `px`.
    pub fn filled(width: u32, height: u32, px: Rgba8) -> Self {
        Self {
            width,
            height,
            data: px.repeat(width as usize * height as usize),
        }
    }

    /// Wrap raw RGBA8 bytes, checking the length against the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> RetouchResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| RetouchError::validation("pixel buffer size overflow"))?;
        if data.len() != expected {
            return Err(RetouchError::validation(format!(
                "pixel buffer expects {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` when both buffers have identical dimensions.
    pub fn same_size(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Borrow the raw bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Read pixel `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Rgba8 {
        let i = self.index(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Read the pixel nearest to `(x, y)`, clamping coordinates to the buffer edge.
    ///
    /// Returns transparent black for an empty buffer.
    pub fn get_clamped(&self, x: i64, y: i64) -> Rgba8 {
        if self.width == 0 || self.height == 0 {
            return [0, 0, 0, 0];
        }
        let cx = x.clamp(0, i64::from(self.width) - 1) as u32;
        let cy = y.clamp(0, i64::from(self.height) - 1) as u32;
        self.get(cx, cy)
    }

    /// Overwrite pixel `(x, y)`. Panics when out of bounds.
    pub fn put(&mut self, x: u32, y: u32, px: Rgba8) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Iterate pixels row-major.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.data.chunks_exact(4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * 4
    }
}

/// A copy of surface pixels together with where they came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampledRegion {
    /// Left edge of the clamped region on the surface.
    pub x: u32,
    /// Top edge of the clamped region on the surface.
    pub y: u32,
    /// Copied pixels (possibly empty when the request missed the surface).
    pub pixels: PixelBuffer,
}

/// The working raster of an editing session.
///
/// Dimensions are fixed by the loaded image's native size and never follow display size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterSurface {
    pixels: PixelBuffer,
}

impl RasterSurface {
    /// Surface of `size` filled with `fill`.
    pub fn new(size: Size, fill: Rgba8) -> Self {
        Self {
            pixels: PixelBuffer::filled(size.width, size.height, fill),
        }
    }

    /// Adopt an existing buffer as a surface.
    pub fn from_buffer(pixels: PixelBuffer) -> RetouchResult<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(RetouchError::load("image has no pixels"));
        }
        Ok(Self { pixels })
    }

    /// Decode an encoded image into a new surface at its native resolution.
    #[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn load_image(bytes: &[u8]) -> RetouchResult<Self> {
        let pixels = codec::decode_rgba8(bytes)?;
        Self::from_buffer(pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Surface dimensions.
    pub fn size(&self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Borrow the live pixels.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    /// Read pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        self.pixels.get(x, y)
    }

    /// Copy the `w × h` region at `(x, y)`, clamped silently to the surface bounds.
    pub fn sample_region(&self, x: i64, y: i64, w: u32, h: u32) -> SampledRegion {
        let sw = i64::from(self.width());
        let sh = i64::from(self.height());
        let x0 = x.clamp(0, sw);
        let y0 = y.clamp(0, sh);
        let x1 = x.saturating_add(i64::from(w)).clamp(x0, sw);
        let y1 = y.saturating_add(i64::from(h)).clamp(y0, sh);

        let mut out = PixelBuffer::new((x1 - x0) as u32, (y1 - y0) as u32);
        for (oy, sy) in (y0..y1).enumerate() {
            for (ox, sx) in (x0..x1).enumerate() {
                out.put(ox as u32, oy as u32, self.pixels.get(sx as u32, sy as u32));
            }
        }
        SampledRegion {
            x: x0 as u32,
            y: y0 as u32,
            pixels: out,
        }
    }

    /// Composite `src` with its top-left at `(x, y)`; pixels falling off the surface are dropped.
    pub fn composite_region(
        &mut self,
        x: i64,
        y: i64,
        src: &PixelBuffer,
        mode: CompositeMode,
        opacity: f32,
    ) {
        for sy in 0..src.height() {
            let ty = y + i64::from(sy);
            if ty < 0 || ty >= i64::from(self.height()) {
                continue;
            }
            for sx in 0..src.width() {
                let tx = x + i64::from(sx);
                if tx < 0 || tx >= i64::from(self.width()) {
                    continue;
                }
                let (tx, ty) = (tx as u32, ty as u32);
                let out = blend_pixel(self.pixels.get(tx, ty), src.get(sx, sy), mode, opacity);
                self.pixels.put(tx, ty, out);
            }
        }
    }

    /// Like [`RasterSurface::composite_region`], restricted to pixels inside `clip`.
    pub fn composite_region_clipped(
        &mut self,
        x: i64,
        y: i64,
        src: &PixelBuffer,
        mode: CompositeMode,
        opacity: f32,
        clip: &dyn Coverage,
    ) {
        let covered: Vec<(u32, u32)> = covered_pixels(clip, self.width(), self.height()).collect();
        for (tx, ty) in covered {
            let sx = i64::from(tx) - x;
            let sy = i64::from(ty) - y;
            if sx < 0 || sy < 0 || sx >= i64::from(src.width()) || sy >= i64::from(src.height()) {
                continue;
            }
            let px = src.get(sx as u32, sy as u32);
            let out = blend_pixel(self.pixels.get(tx, ty), px, mode, opacity);
            self.pixels.put(tx, ty, out);
        }
    }

    /// Paint `color` into every pixel inside `clip`.
    pub fn fill(&mut self, clip: &dyn Coverage, color: Rgba8, mode: CompositeMode, opacity: f32) {
        let covered: Vec<(u32, u32)> = covered_pixels(clip, self.width(), self.height()).collect();
        for (x, y) in covered {
            let out = blend_pixel(self.pixels.get(x, y), color, mode, opacity);
            self.pixels.put(x, y, out);
        }
    }

    /// Copy same-sized `source` pixels into the surface inside `clip`.
    pub fn restore_from(&mut self, source: &PixelBuffer, clip: &dyn Coverage) -> RetouchResult<()> {
        if !self.pixels.same_size(source) {
            return Err(RetouchError::validation(
                "restore source must match surface dimensions",
            ));
        }
        let covered: Vec<(u32, u32)> = covered_pixels(clip, self.width(), self.height()).collect();
        for (x, y) in covered {
            self.pixels.put(x, y, source.get(x, y));
        }
        Ok(())
    }

    /// Swap in a whole new same-sized buffer.
    pub fn replace_pixels(&mut self, pixels: PixelBuffer) -> RetouchResult<()> {
        if !self.pixels.same_size(&pixels) {
            return Err(RetouchError::validation(
                "replacement pixels must match surface dimensions",
            ));
        }
        self.pixels = pixels;
        Ok(())
    }

    /// Encode the current pixels losslessly (PNG).
    pub fn export_snapshot(&self) -> RetouchResult<Vec<u8>> {
        codec::encode_png(&self.pixels)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
