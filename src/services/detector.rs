use crate::faces::detection::FaceDetection;
use crate::foundation::error::{RetouchError, RetouchResult};

/// External face-landmark detector.
///
/// Input is one lossless full-surface snapshot. Output is the raw, unfiltered detection list;
/// an empty list is a valid answer.
pub trait FaceDetector {
    /// Run detection on an encoded snapshot.
    fn detect(&mut self, snapshot_png: &[u8]) -> RetouchResult<Vec<FaceDetection>>;
}

/// Detector that answers with a precomputed list, e.g. loaded from a detections file.
#[derive(Clone, Debug, Default)]
pub struct FixedDetections {
    faces: Vec<FaceDetection>,
}

impl FixedDetections {
    /// Wrap a detection list.
    pub fn new(faces: Vec<FaceDetection>) -> Self {
        Self { faces }
    }

    /// Parse a JSON array of detections.
    pub fn from_json_str(s: &str) -> RetouchResult<Self> {
        let faces: Vec<FaceDetection> = serde_json::from_str(s)
            .map_err(|e| RetouchError::serde(format!("detections json: {e}")))?;
        Ok(Self::new(faces))
    }
}

impl FaceDetector for FixedDetections {
    fn detect(&mut self, _snapshot_png: &[u8]) -> RetouchResult<Vec<FaceDetection>> {
        Ok(self.faces.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/detector.rs"]
mod tests;
