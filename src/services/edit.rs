use crate::foundation::error::{RetouchError, RetouchResult};

/// One AI edit call: the flattened image plus the user's instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditRequest {
    /// Lossless encoding of the surface with display filters baked in.
    pub image_png: Vec<u8>,
    /// Free-text edit instruction.
    pub instruction: String,
}

/// External generative image-edit service.
///
/// Implementations make exactly one attempt per call. Error messages from the service should be
/// passed through verbatim in [`RetouchError::EditServiceFailure`].
pub trait ImageEditService {
    /// Fail fast when credentials or settings are missing, before any image work happens.
    fn ensure_ready(&self) -> RetouchResult<()> {
        Ok(())
    }

    /// Perform the edit and return the encoded result image.
    fn edit(&mut self, request: &EditRequest) -> RetouchResult<Vec<u8>>;
}

/// Where to find the edit service and its credential.
///
/// `endpoint` and `model` have no defaults; a host that wants AI edits must configure them.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditServiceConfig {
    /// Service base URL.
    pub endpoint: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for EditServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            model: String::new(),
            api_key_env: "RETOUCH_EDIT_API_KEY".to_string(),
        }
    }
}

impl EditServiceConfig {
    /// Check that endpoint and model are configured and the API key resolves.
    pub fn ensure_complete(&self) -> RetouchResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(RetouchError::configuration_missing(
                "set edit_service.endpoint in the editor config",
            ));
        }
        if self.model.trim().is_empty() {
            return Err(RetouchError::configuration_missing(
                "set edit_service.model in the editor config",
            ));
        }
        self.resolve_api_key().map(|_| ())
    }

    /// Read the API key from the process environment.
    pub fn resolve_api_key(&self) -> RetouchResult<String> {
        self.resolve_api_key_from(|name| std::env::var(name).ok())
    }

    /// Read the API key through `lookup`; blank values count as missing.
    pub fn resolve_api_key_from(
        &self,
        lookup: impl FnOnce(&str) -> Option<String>,
    ) -> RetouchResult<String> {
        if self.api_key_env.trim().is_empty() {
            return Err(RetouchError::configuration_missing(
                "edit_service.api_key_env is empty; name the variable that holds the API key",
            ));
        }
        match lookup(&self.api_key_env) {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(RetouchError::configuration_missing(format!(
                "set {} to the edit service API key before requesting an AI edit",
                self.api_key_env
            ))),
        }
    }
}

/// Wraps a service so calls fail with [`RetouchError::ConfigurationMissing`] until its API key
/// resolves.
#[derive(Debug)]
pub struct CredentialGate<S> {
    config: EditServiceConfig,
    inner: S,
}

impl<S> CredentialGate<S> {
    /// Gate `inner` behind the credential named by `config`.
    pub fn new(config: EditServiceConfig, inner: S) -> Self {
        Self { config, inner }
    }
}

impl<S: ImageEditService> ImageEditService for CredentialGate<S> {
    fn ensure_ready(&self) -> RetouchResult<()> {
        self.config.ensure_complete()?;
        self.inner.ensure_ready()
    }

    fn edit(&mut self, request: &EditRequest) -> RetouchResult<Vec<u8>> {
        self.ensure_ready()?;
        self.inner.edit(request)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/edit.rs"]
mod tests;
