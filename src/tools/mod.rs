//! Pointer-driven painting tools.
//!
//! Tools split into two families. Stroke tools ([`ToolFamily::Stroke`]) write straight onto the
//! live surface once per sample. Blend tools ([`ToolFamily::Blend`]) accumulate a stroke mask and
//! re-composite it over a stroke-start snapshot, so overlap inside one stroke never compounds.

pub(crate) mod blend_stroke;
pub(crate) mod stroke;

use std::str::FromStr;

use crate::foundation::core::Rgb;
use crate::foundation::error::{RetouchError, RetouchResult};

/// Every tool the editor can paint with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Round-capped line in the configured color.
    Brush,
    /// Flat-capped black redaction bar.
    Censor,
    /// Restores checkpoint pixels, or erases to transparency without a checkpoint.
    Eraser,
    /// Localized Gaussian blur.
    Blur,
    /// Localized grid-aligned pixelation.
    Pixelate,
    /// Screen with white at reduced opacity.
    Lighten,
    /// Multiply with black at reduced opacity.
    Darken,
    /// Recolor keeping luminosity.
    Tint,
    /// Remove saturation.
    Desaturate,
    /// Difference with white.
    Invert,
}

/// Which engine drives a tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolFamily {
    /// Draws directly on the live surface each sample.
    Stroke,
    /// Snapshot plus stroke-mask compositing.
    Blend,
}

impl Tool {
    /// The engine that drives this tool.
    pub fn family(self) -> ToolFamily {
        match self {
            Tool::Brush | Tool::Censor | Tool::Eraser | Tool::Blur | Tool::Pixelate => {
                ToolFamily::Stroke
            }
            Tool::Lighten | Tool::Darken | Tool::Tint | Tool::Desaturate | Tool::Invert => {
                ToolFamily::Blend
            }
        }
    }

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Brush => "brush",
            Tool::Censor => "censor",
            Tool::Eraser => "eraser",
            Tool::Blur => "blur",
            Tool::Pixelate => "pixelate",
            Tool::Lighten => "lighten",
            Tool::Darken => "darken",
            Tool::Tint => "tint",
            Tool::Desaturate => "desaturate",
            Tool::Invert => "invert",
        }
    }
}

impl FromStr for Tool {
    type Err = RetouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tool = match s.trim().to_ascii_lowercase().as_str() {
            "brush" => Tool::Brush,
            "censor" => Tool::Censor,
            "eraser" => Tool::Eraser,
            "blur" => Tool::Blur,
            "pixelate" => Tool::Pixelate,
            "lighten" => Tool::Lighten,
            "darken" => Tool::Darken,
            "tint" => Tool::Tint,
            "desaturate" => Tool::Desaturate,
            "invert" => Tool::Invert,
            other => {
                return Err(RetouchError::validation(format!("unknown tool '{other}'")));
            }
        };
        Ok(tool)
    }
}

/// Per-stroke brush configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    /// Stroke width / effect diameter in raster pixels.
    pub size: f64,
    /// Paint color for brush and tint.
    pub color: Rgb,
    /// Blur sigma or pixelation block size.
    pub intensity: f64,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            size: 20.0,
            color: Rgb::new(0, 0, 0),
            intensity: 8.0,
        }
    }
}

impl BrushSettings {
    /// Build validated settings.
    pub fn new(size: f64, color: Rgb, intensity: f64) -> RetouchResult<Self> {
        let s = Self {
            size,
            color,
            intensity,
        };
        s.validate()?;
        Ok(s)
    }

    /// Reject non-finite or non-positive size and intensity.
    pub fn validate(&self) -> RetouchResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(RetouchError::validation("brush size must be finite and > 0"));
        }
        if !self.intensity.is_finite() || self.intensity <= 0.0 {
            return Err(RetouchError::validation(
                "brush intensity must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Half the brush size.
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tools/settings.rs"]
mod tests;
