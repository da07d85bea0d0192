//! Editing session that owns the working surface and its stroke state.

use crate::config::editor::EditorConfig;
use crate::encode::export::{ExportOptions, export_image};
use crate::encode::filters::{FilterSettings, bake_filters};
use crate::encode::sink::{Artifact, ArtifactKind, ArtifactSink};
use crate::faces::detection::{DetectionFilter, FaceDetection, FaceEffect};
use crate::faces::effects::{FaceEffectReport, apply_face_effects};
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{RetouchError, RetouchResult};
use crate::geometry::mapping::map_display_point;
use crate::raster::codec;
use crate::raster::surface::{PixelBuffer, RasterSurface};
use crate::services::detector::FaceDetector;
use crate::services::edit::{EditRequest, ImageEditService};
use crate::tools::blend_stroke::BlendStroke;
use crate::tools::stroke::apply_stroke_sample;
use crate::tools::{BrushSettings, Tool, ToolFamily};

#[derive(Debug)]
enum StrokeState {
    Idle,
    Drawing(ActiveStroke),
}

#[derive(Debug)]
struct ActiveStroke {
    tool: Tool,
    brush: BrushSettings,
    last: Point,
    blend: Option<BlendStroke>,
}

/// Single-owner editing session.
///
/// Strokes run `Idle → Drawing → Idle`: [`EditSession::pointer_down`] enters `Drawing` and paints
/// one sample, [`EditSession::pointer_move`] paints further samples, and
/// [`EditSession::pointer_up`] (or [`EditSession::pointer_leave`]) commits one artifact. Batch
/// operations (face effects, AI edits, filter bakes, loads) are rejected while a stroke is open.
#[derive(Debug)]
pub struct EditSession {
    surface: RasterSurface,
    checkpoint: Option<PixelBuffer>,
    brush: BrushSettings,
    tool: Tool,
    filters: FilterSettings,
    detection: DetectionFilter,
    export: ExportOptions,
    state: StrokeState,
}

impl EditSession {
    /// Session over an existing surface, with no checkpoint.
    pub fn new(surface: RasterSurface) -> Self {
        Self {
            surface,
            checkpoint: None,
            brush: BrushSettings::default(),
            tool: Tool::Brush,
            filters: FilterSettings::default(),
            detection: DetectionFilter::default(),
            export: ExportOptions::default(),
            state: StrokeState::Idle,
        }
    }

    /// Decode `bytes` into a new session whose checkpoint is the loaded image.
    pub fn from_image(bytes: &[u8]) -> RetouchResult<Self> {
        let surface = RasterSurface::load_image(bytes)?;
        let mut session = Self::new(surface);
        session.checkpoint = Some(session.surface.pixels().clone());
        Ok(session)
    }

    /// Apply brush, detection, and export settings from `config`.
    pub fn configure(&mut self, config: &EditorConfig) -> RetouchResult<()> {
        self.ensure_idle("configure")?;
        config.validate()?;
        self.brush = config.brush;
        self.detection = config.detection;
        self.export = config.export;
        Ok(())
    }

    /// The live surface.
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// The restore-to pixels used by the eraser, if any.
    pub fn checkpoint(&self) -> Option<&PixelBuffer> {
        self.checkpoint.as_ref()
    }

    /// Current brush settings.
    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    /// Currently selected tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Current non-destructive display filters.
    pub fn filters(&self) -> FilterSettings {
        self.filters
    }

    /// Whether a stroke is open.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing(_))
    }

    fn ensure_idle(&self, action: &str) -> RetouchResult<()> {
        if self.is_drawing() {
            return Err(RetouchError::validation(format!(
                "cannot {action} while a stroke is in progress"
            )));
        }
        Ok(())
    }

    /// Replace the surface with a decoded image and make it the checkpoint.
    ///
    /// On failure the previous surface and checkpoint stay as they were.
    #[tracing::instrument(skip(self, bytes, sink), fields(len = bytes.len()))]
    pub fn load_image(&mut self, bytes: &[u8], sink: &mut dyn ArtifactSink) -> RetouchResult<()> {
        self.ensure_idle("load an image")?;
        let surface = RasterSurface::load_image(bytes)?;
        self.checkpoint = Some(surface.pixels().clone());
        self.surface = surface;
        self.filters = FilterSettings::default();
        sink.push(Artifact::capture(ArtifactKind::Loaded, &self.surface)?)
    }

    /// Change brush settings between strokes.
    pub fn set_brush(&mut self, brush: BrushSettings) -> RetouchResult<()> {
        self.ensure_idle("change brush settings")?;
        brush.validate()?;
        self.brush = brush;
        Ok(())
    }

    /// Select a tool between strokes.
    pub fn set_tool(&mut self, tool: Tool) -> RetouchResult<()> {
        self.ensure_idle("change tools")?;
        self.tool = tool;
        Ok(())
    }

    /// Change the display filters; pixels are untouched until a bake, export, or AI edit.
    pub fn set_filters(&mut self, filters: FilterSettings) -> RetouchResult<()> {
        filters.validate()?;
        self.filters = filters;
        Ok(())
    }

    /// Make the current surface the eraser's restore target.
    pub fn commit_checkpoint(&mut self) -> RetouchResult<()> {
        self.ensure_idle("commit a checkpoint")?;
        self.checkpoint = Some(self.surface.pixels().clone());
        Ok(())
    }

    /// Drop the checkpoint; the eraser then erases to transparency.
    pub fn clear_checkpoint(&mut self) -> RetouchResult<()> {
        self.ensure_idle("clear the checkpoint")?;
        self.checkpoint = None;
        Ok(())
    }

    /// Map a display-space pointer position onto this session's raster.
    pub fn to_raster(&self, display_point: Point, display: Rect) -> RetouchResult<Point> {
        map_display_point(display_point, display, self.surface.size())
    }

    /// Start a stroke at raster point `p` and paint the first sample.
    pub fn pointer_down(&mut self, p: Point) -> RetouchResult<()> {
        if self.is_drawing() {
            tracing::warn!("pointer_down while a stroke is already open");
            return Err(RetouchError::validation("a stroke is already in progress"));
        }
        if !p.is_finite() {
            return Err(RetouchError::validation("pointer position must be finite"));
        }
        let blend = match self.tool.family() {
            ToolFamily::Blend => Some(BlendStroke::begin(&self.surface, self.tool, &self.brush)?),
            ToolFamily::Stroke => None,
        };
        let mut active = ActiveStroke {
            tool: self.tool,
            brush: self.brush,
            last: p,
            blend,
        };
        paint_sample(&mut self.surface, self.checkpoint.as_ref(), &mut active, p)?;
        self.state = StrokeState::Drawing(active);
        Ok(())
    }

    /// Paint the segment from the previous sample to `p`. Returns `false` when no stroke is open.
    pub fn pointer_move(&mut self, p: Point) -> RetouchResult<bool> {
        let StrokeState::Drawing(active) = &mut self.state else {
            return Ok(false);
        };
        if !p.is_finite() {
            return Err(RetouchError::validation("pointer position must be finite"));
        }
        paint_sample(&mut self.surface, self.checkpoint.as_ref(), active, p)?;
        Ok(true)
    }

    /// Finish the stroke and commit one artifact. Returns `false` when no stroke was open.
    #[tracing::instrument(skip(self, sink))]
    pub fn pointer_up(&mut self, sink: &mut dyn ArtifactSink) -> RetouchResult<bool> {
        match std::mem::replace(&mut self.state, StrokeState::Idle) {
            StrokeState::Idle => Ok(false),
            StrokeState::Drawing(active) => {
                tracing::debug!(tool = active.tool.name(), "stroke committed");
                sink.push(Artifact::capture(ArtifactKind::Stroke, &self.surface)?)?;
                Ok(true)
            }
        }
    }

    /// Pointer left the canvas mid-stroke; commits exactly like [`EditSession::pointer_up`].
    pub fn pointer_leave(&mut self, sink: &mut dyn ArtifactSink) -> RetouchResult<bool> {
        self.pointer_up(sink)
    }

    /// Run `detector` on a snapshot and keep the plausible faces.
    ///
    /// Detector errors become [`RetouchError::DetectionFailure`]; an empty filtered result is
    /// [`RetouchError::NoFacesFound`]. The surface is never touched.
    #[tracing::instrument(skip(self, detector))]
    pub fn detect_faces(
        &self,
        detector: &mut dyn FaceDetector,
    ) -> RetouchResult<Vec<FaceDetection>> {
        self.ensure_idle("detect faces")?;
        let snapshot = self.surface.export_snapshot()?;
        let raw = detector.detect(&snapshot).map_err(|e| {
            tracing::warn!(error = %e, "face detector failed");
            match e {
                RetouchError::DetectionFailure(msg) => RetouchError::DetectionFailure(msg),
                other => RetouchError::detection(other.to_string()),
            }
        })?;
        let total = raw.len();
        let faces = self.detection.retain(raw, self.surface.size());
        tracing::debug!(total, kept = faces.len(), "face detections filtered");
        if faces.is_empty() {
            return Err(RetouchError::NoFacesFound);
        }
        Ok(faces)
    }

    /// Apply `effect` to `faces` as one batch and commit one artifact.
    #[tracing::instrument(skip(self, faces, sink), fields(faces = faces.len()))]
    pub fn apply_face_effects(
        &mut self,
        faces: &[FaceDetection],
        effect: FaceEffect,
        sink: &mut dyn ArtifactSink,
    ) -> RetouchResult<FaceEffectReport> {
        self.ensure_idle("apply face effects")?;
        let report = apply_face_effects(&mut self.surface, faces, effect)?;
        sink.push(Artifact::capture(ArtifactKind::FaceEffects, &self.surface)?)?;
        Ok(report)
    }

    /// Send the filter-flattened surface to `service` and adopt the returned image.
    ///
    /// On success the result becomes both surface and checkpoint and the display filters reset,
    /// since they are now part of the pixels. On any failure the surface is left as it was.
    #[tracing::instrument(skip(self, service, sink))]
    pub fn apply_ai_edit(
        &mut self,
        service: &mut dyn ImageEditService,
        instruction: &str,
        sink: &mut dyn ArtifactSink,
    ) -> RetouchResult<()> {
        self.ensure_idle("request an AI edit")?;
        if instruction.trim().is_empty() {
            return Err(RetouchError::validation("edit instruction must not be empty"));
        }
        service.ensure_ready()?;

        let flattened = bake_filters(self.surface.pixels(), &self.filters)?;
        let request = EditRequest {
            image_png: codec::encode_png(&flattened)?,
            instruction: instruction.to_string(),
        };
        let result = service.edit(&request).map_err(|e| {
            tracing::warn!(error = %e, "edit service call failed");
            match e {
                RetouchError::EditServiceFailure(_) | RetouchError::ConfigurationMissing(_) => e,
                other => RetouchError::edit_service(other.to_string()),
            }
        })?;
        let pixels = codec::decode_rgba8(&result).map_err(|e| {
            RetouchError::edit_service(format!("service returned an unusable image: {e}"))
        })?;
        let surface = RasterSurface::from_buffer(pixels).map_err(|e| {
            RetouchError::edit_service(format!("service returned an unusable image: {e}"))
        })?;

        self.checkpoint = Some(surface.pixels().clone());
        self.surface = surface;
        self.filters = FilterSettings::default();
        sink.push(Artifact::capture(ArtifactKind::AiEdit, &self.surface)?)
    }

    /// Bake the display filters into the surface (and checkpoint) and reset them.
    #[tracing::instrument(skip(self, sink))]
    pub fn bake_filters(&mut self, sink: &mut dyn ArtifactSink) -> RetouchResult<()> {
        self.ensure_idle("bake filters")?;
        let baked = bake_filters(self.surface.pixels(), &self.filters)?;
        let checkpoint = self
            .checkpoint
            .as_ref()
            .map(|c| bake_filters(c, &self.filters))
            .transpose()?;
        self.surface = RasterSurface::from_buffer(baked)?;
        self.checkpoint = checkpoint;
        self.filters = FilterSettings::default();
        sink.push(Artifact::capture(ArtifactKind::Filters, &self.surface)?)
    }

    /// Encode the surface, with display filters re-applied, using the session's export options.
    pub fn export(&self) -> RetouchResult<Vec<u8>> {
        self.export_with(&self.export)
    }

    /// Encode the surface, with display filters re-applied, using `options`.
    pub fn export_with(&self, options: &ExportOptions) -> RetouchResult<Vec<u8>> {
        export_image(self.surface.pixels(), &self.filters, options)
    }
}

fn paint_sample(
    surface: &mut RasterSurface,
    checkpoint: Option<&PixelBuffer>,
    active: &mut ActiveStroke,
    cur: Point,
) -> RetouchResult<()> {
    let prev = active.last;
    match active.blend.as_mut() {
        Some(blend) => blend.paint(surface, prev, cur)?,
        None => apply_stroke_sample(surface, checkpoint, active.tool, &active.brush, prev, cur)?,
    }
    active.last = cur;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/edit_session.rs"]
mod tests;
