/// Convenience result type used across the crate.
pub type RetouchResult<T> = Result<T, RetouchError>;

/// Top-level error taxonomy used by editing APIs.
///
/// Every failure is local to the user action that caused it: the editing surface is never left
/// half-modified by an `Err` return.
#[derive(thiserror::Error, Debug)]
pub enum RetouchError {
    /// Invalid parameters or a call made in the wrong stroke state.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image source could not be decoded or has no pixels.
    #[error("load error: {0}")]
    Load(String),

    /// The external face detector failed or was unavailable.
    #[error("face detection failed: {0}")]
    DetectionFailure(String),

    /// The detector ran but no face survived the geometric filters.
    #[error("no faces found")]
    NoFacesFound,

    /// The external image-edit service rejected the request or returned no usable image.
    #[error("edit service failure: {0}")]
    EditServiceFailure(String),

    /// A required credential or setting is absent.
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),

    /// Encoding an output image failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration or scripts.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RetouchError {
    /// Build a [`RetouchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RetouchError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`RetouchError::DetectionFailure`] value.
    pub fn detection(msg: impl Into<String>) -> Self {
        Self::DetectionFailure(msg.into())
    }

    /// Build a [`RetouchError::EditServiceFailure`] value.
    pub fn edit_service(msg: impl Into<String>) -> Self {
        Self::EditServiceFailure(msg.into())
    }

    /// Build a [`RetouchError::ConfigurationMissing`] value.
    pub fn configuration_missing(msg: impl Into<String>) -> Self {
        Self::ConfigurationMissing(msg.into())
    }

    /// Build a [`RetouchError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`RetouchError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for outcomes that deserve a notice rather than an error banner.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::NoFacesFound)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
