use std::str::FromStr;

use crate::foundation::core::{Point, Size};
use crate::foundation::error::{RetouchError, RetouchResult};

/// Axis-aligned face box in raster pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Left edge.
    pub origin_x: f64,
    /// Top edge.
    pub origin_y: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl BoundingBox {
    /// `width / height`, or `None` for a degenerate box.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height > 0.0).then(|| self.width / self.height)
    }
}

/// One face as reported by an external detector.
///
/// Landmark 0 is the right eye and landmark 1 the left eye when present.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceDetection {
    /// Face box in raster space.
    pub bounding_box: BoundingBox,
    /// Ordered landmark points.
    #[serde(default)]
    pub landmarks: Vec<Point>,
    /// Detector confidence in `[0, 1]`.
    #[serde(default = "full_confidence")]
    pub probability: f64,
}

fn full_confidence() -> f64 {
    1.0
}

impl FaceDetection {
    /// Reject non-finite geometry, empty boxes, and out-of-range probabilities.
    pub fn validate(&self) -> RetouchResult<()> {
        let b = &self.bounding_box;
        let finite = [b.origin_x, b.origin_y, b.width, b.height]
            .iter()
            .all(|v| v.is_finite())
            && self.landmarks.iter().all(|p| p.is_finite());
        if !finite {
            return Err(RetouchError::validation("face detection has non-finite geometry"));
        }
        if b.width <= 0.0 || b.height <= 0.0 {
            return Err(RetouchError::validation(format!(
                "face box must have positive extent, got {}x{}",
                b.width, b.height
            )));
        }
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(RetouchError::validation(format!(
                "face probability must be in [0, 1], got {}",
                self.probability
            )));
        }
        Ok(())
    }
}

/// Geometric plausibility filter for raw detector output.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DetectionFilter {
    /// Absolute minimum side in pixels.
    pub min_size_px: f64,
    /// Minimum side as a fraction of the smaller image dimension.
    pub min_size_fraction: f64,
    /// Smallest accepted `width / height`.
    pub min_aspect: f64,
    /// Largest accepted `width / height`.
    pub max_aspect: f64,
}

impl Default for DetectionFilter {
    fn default() -> Self {
        Self {
            min_size_px: 20.0,
            min_size_fraction: 0.02,
            min_aspect: 0.5,
            max_aspect: 2.0,
        }
    }
}

impl DetectionFilter {
    /// Check thresholds for consistency.
    pub fn validate(&self) -> RetouchResult<()> {
        if self.min_size_px < 0.0 || self.min_size_fraction < 0.0 {
            return Err(RetouchError::validation(
                "detection size thresholds must be >= 0",
            ));
        }
        if !(self.min_aspect > 0.0 && self.min_aspect <= self.max_aspect) {
            return Err(RetouchError::validation(format!(
                "detection aspect range [{}, {}] is empty",
                self.min_aspect, self.max_aspect
            )));
        }
        Ok(())
    }

    /// Whether `face` is plausible on an image of `image` size.
    ///
    /// A side passes when it meets either the pixel minimum or the relative minimum.
    pub fn accepts(&self, face: &FaceDetection, image: Size) -> bool {
        let b = &face.bounding_box;
        let min_dim = f64::from(image.width.min(image.height));
        let side_ok = |v: f64| v >= self.min_size_px || v >= self.min_size_fraction * min_dim;
        let aspect_ok = b
            .aspect_ratio()
            .is_some_and(|a| (self.min_aspect..=self.max_aspect).contains(&a));
        side_ok(b.width) && side_ok(b.height) && aspect_ok
    }

    /// Keep only accepted detections, preserving order.
    pub fn retain(&self, faces: Vec<FaceDetection>, image: Size) -> Vec<FaceDetection> {
        faces
            .into_iter()
            .filter(|f| self.accepts(f, image))
            .collect()
    }
}

/// Effect applied to every face in a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaceEffect {
    /// Black bar along the eye line.
    CensorEyes,
    /// Gaussian blur inside the face ellipse.
    BlurFace,
    /// Block pixelation inside the face ellipse.
    PixelateFace,
}

impl FaceEffect {
    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            FaceEffect::CensorEyes => "censor-eyes",
            FaceEffect::BlurFace => "blur-face",
            FaceEffect::PixelateFace => "pixelate-face",
        }
    }
}

impl FromStr for FaceEffect {
    type Err = RetouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "censor-eyes" => Ok(FaceEffect::CensorEyes),
            "blur-face" => Ok(FaceEffect::BlurFace),
            "pixelate-face" => Ok(FaceEffect::PixelateFace),
            other => Err(RetouchError::validation(format!(
                "unknown face effect '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/faces/detection.rs"]
mod tests;
