use std::str::FromStr;

use crate::encode::filters::{FilterSettings, bake_filters};
use crate::foundation::core::WHITE;
use crate::foundation::error::{RetouchError, RetouchResult};
use crate::raster::codec;
use crate::raster::surface::PixelBuffer;

/// JPEG quality used for lossy exports.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Download/export encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless, keeps alpha.
    #[default]
    Png,
    /// Lossy, flattened over white.
    Jpeg,
}

impl ExportFormat {
    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = RetouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            other => Err(RetouchError::validation(format!(
                "unknown export format '{other}' (expected png or jpeg)"
            ))),
        }
    }
}

/// Export encoding options.
///
/// JPEG output always uses [`DEFAULT_JPEG_QUALITY`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Output format.
    pub format: ExportFormat,
}

/// Re-apply display `filters` to `pixels` and encode per `options`.
#[tracing::instrument(skip(pixels, filters))]
pub fn export_image(
    pixels: &PixelBuffer,
    filters: &FilterSettings,
    options: &ExportOptions,
) -> RetouchResult<Vec<u8>> {
    let baked = bake_filters(pixels, filters)?;
    match options.format {
        ExportFormat::Png => codec::encode_png(&baked),
        ExportFormat::Jpeg => codec::encode_jpeg(&baked, DEFAULT_JPEG_QUALITY, WHITE),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/export.rs"]
mod tests;
