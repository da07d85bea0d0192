use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::encode::export::ExportOptions;
use crate::faces::detection::DetectionFilter;
use crate::foundation::error::{RetouchError, RetouchResult};
use crate::services::edit::EditServiceConfig;
use crate::tools::BrushSettings;

/// Editor-wide settings a host persists between sessions.
///
/// Every section is optional in JSON and falls back to its defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial brush settings.
    pub brush: BrushSettings,
    /// Plausibility filter applied to raw detector output.
    pub detection: DetectionFilter,
    /// Export encoding.
    pub export: ExportOptions,
    /// AI edit service location and credential source.
    pub edit_service: EditServiceConfig,
}

impl EditorConfig {
    /// Parse a config from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> RetouchResult<Self> {
        let cfg: EditorConfig = serde_json::from_reader(r)
            .map_err(|e| RetouchError::serde(format!("parse editor config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON string and validate it.
    pub fn from_json_str(s: &str) -> RetouchResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a config from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> RetouchResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RetouchError::validation(format!("open editor config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every section.
    ///
    /// Edit service settings are not required here; they are checked when an AI edit is requested.
    pub fn validate(&self) -> RetouchResult<()> {
        self.brush.validate()?;
        self.detection.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/editor.rs"]
mod tests;
