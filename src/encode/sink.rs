use crate::foundation::error::RetouchResult;
use crate::raster::surface::RasterSurface;

/// What produced a committed artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// A new image was loaded.
    Loaded,
    /// A stroke finished (pointer-up or pointer-leave).
    Stroke,
    /// A face-effect batch was applied.
    FaceEffects,
    /// An AI edit result replaced the surface.
    AiEdit,
    /// Display filters were baked into the surface.
    Filters,
}

/// Lossless encoding of the surface at one commit point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Commit kind.
    pub kind: ArtifactKind,
    /// Surface width at commit time.
    pub width: u32,
    /// Surface height at commit time.
    pub height: u32,
    /// PNG bytes.
    pub png: Vec<u8>,
}

impl Artifact {
    /// Encode `surface` as an artifact of `kind`.
    pub fn capture(kind: ArtifactKind, surface: &RasterSurface) -> RetouchResult<Self> {
        Ok(Self {
            kind,
            width: surface.width(),
            height: surface.height(),
            png: surface.export_snapshot()?,
        })
    }
}

/// Receiver for committed artifacts, called once per commit in commit order.
pub trait ArtifactSink {
    /// Accept one artifact.
    fn push(&mut self, artifact: Artifact) -> RetouchResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    artifacts: Vec<Artifact>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured artifacts in commit order.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Most recent artifact, if any.
    pub fn last(&self) -> Option<&Artifact> {
        self.artifacts.last()
    }

    /// Kinds of the captured artifacts in commit order.
    pub fn kinds(&self) -> Vec<ArtifactKind> {
        self.artifacts.iter().map(|a| a.kind).collect()
    }
}

impl ArtifactSink for InMemorySink {
    fn push(&mut self, artifact: Artifact) -> RetouchResult<()> {
        self.artifacts.push(artifact);
        Ok(())
    }
}

/// Sink that drops everything; for hosts that only care about the final export.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl ArtifactSink for DiscardSink {
    fn push(&mut self, artifact: Artifact) -> RetouchResult<()> {
        tracing::trace!(kind = ?artifact.kind, bytes = artifact.png.len(), "artifact discarded");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
