//! Retouch is a raster photo-editing engine.
//!
//! An [`EditSession`] owns one fixed-resolution [`RasterSurface`] plus an optional checkpoint and
//! drives pointer strokes through two tool engines:
//!
//! - Stroke tools (brush, censor, eraser, blur, pixelate) write straight onto the surface once per
//!   sample.
//! - Blend tools (lighten, darken, tint, desaturate, invert) recompose a stroke-start snapshot with
//!   an accumulated stroke mask, so overlap within a stroke never compounds.
//!
//! Face privacy effects consume [`FaceDetection`] records from an external detector and are
//! applied as one atomic batch in each face's rotated frame. Every commit is published to an
//! [`ArtifactSink`] as a lossless PNG.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod faces;
pub(crate) mod geometry;
pub(crate) mod raster;
pub(crate) mod script;
pub(crate) mod services;
pub(crate) mod session;
pub(crate) mod tools;

pub use crate::foundation::core::{
    Affine, BLACK, Point, Rect, Rgb, Rgba8, Size, Vec2, WHITE, pixel_center,
};
pub use crate::foundation::error::{RetouchError, RetouchResult};

pub use crate::config::editor::EditorConfig;
pub use crate::encode::export::{
    DEFAULT_JPEG_QUALITY, ExportFormat, ExportOptions, export_image,
};
pub use crate::encode::filters::{FilterSettings, bake_filters};
pub use crate::encode::sink::{Artifact, ArtifactKind, ArtifactSink, DiscardSink, InMemorySink};
pub use crate::faces::detection::{BoundingBox, DetectionFilter, FaceDetection, FaceEffect};
pub use crate::faces::effects::{
    FaceEffectReport, apply_face_effects, blur_sigma, censor_eyes, pixelate_blocks,
    pixelate_block_size,
};
pub use crate::geometry::face::FaceGeometry;
pub use crate::geometry::interpolate::{interpolate_segment, interpolation_step};
pub use crate::geometry::mapping::map_display_point;
pub use crate::raster::blend::{CompositeMode, blend_pixel};
pub use crate::raster::blur::gaussian_blur;
pub use crate::raster::coverage::{
    Bar, Capsule, Coverage, Disk, FramedEllipse, FramedRect, Intersect, covered_pixels,
};
pub use crate::raster::surface::{PixelBuffer, RasterSurface, SampledRegion};
pub use crate::script::{EditScript, Operation};
pub use crate::services::detector::{FaceDetector, FixedDetections};
pub use crate::services::edit::{CredentialGate, EditRequest, EditServiceConfig, ImageEditService};
pub use crate::session::edit_session::EditSession;
pub use crate::tools::blend_stroke::{BlendParams, BlendStroke, blend_params, compose};
pub use crate::tools::stroke::{
    apply_stroke_sample, blur_segment, blur_stamp, brush_segment, censor_segment, erase_segment,
    pixelate_segment, pixelate_stamp,
};
pub use crate::tools::{BrushSettings, Tool, ToolFamily};
