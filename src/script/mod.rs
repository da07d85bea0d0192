//! Serializable edit scripts: a headless way to replay strokes and batch operations against a
//! session.
//!
//! ```json
//! {"operations": [
//!   {"op": "stroke", "tool": "brush", "points": [{"x": 10, "y": 10}, {"x": 90, "y": 90}]},
//!   {"op": "face_effect", "effect": "blur-face", "faces": [ ... ]},
//!   {"op": "commit_checkpoint"}
//! ]}
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::encode::filters::FilterSettings;
use crate::encode::sink::ArtifactSink;
use crate::faces::detection::{FaceDetection, FaceEffect};
use crate::foundation::core::Point;
use crate::foundation::error::{RetouchError, RetouchResult};
use crate::session::edit_session::EditSession;
use crate::tools::{BrushSettings, Tool};

/// One scripted editing step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// A full stroke: pointer-down at the first point, moves through the rest, pointer-up.
    Stroke {
        /// Tool for this stroke.
        tool: Tool,
        /// Brush override; the session's current brush is used when absent.
        #[serde(default)]
        brush: Option<BrushSettings>,
        /// Raster-space samples, at least one.
        points: Vec<Point>,
    },
    /// Apply a face effect batch.
    FaceEffect {
        /// Effect to apply.
        effect: FaceEffect,
        /// Faces, as a detector would report them.
        faces: Vec<FaceDetection>,
    },
    /// Make the current surface the eraser's restore target.
    CommitCheckpoint,
    /// Drop the checkpoint.
    ClearCheckpoint,
    /// Set display filters and bake them into the surface.
    Filters {
        /// Filter values to bake.
        filters: FilterSettings,
    },
}

/// Ordered list of operations.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditScript {
    /// Operations in replay order.
    pub operations: Vec<Operation>,
}

impl EditScript {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RetouchResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RetouchError::serde(format!("parse edit script JSON: {e}")))
    }

    /// Parse a script from a JSON string.
    pub fn from_json_str(s: &str) -> RetouchResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RetouchResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RetouchError::validation(format!("open edit script '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Replay every operation against `session`, stopping at the first error.
    ///
    /// A stroke's brush override is scoped to that stroke; the session's brush is restored after.
    #[tracing::instrument(skip(self, session, sink), fields(ops = self.operations.len()))]
    pub fn apply(&self, session: &mut EditSession, sink: &mut dyn ArtifactSink) -> RetouchResult<()> {
        for (idx, op) in self.operations.iter().enumerate() {
            tracing::debug!(idx, ?op, "replaying operation");
            apply_operation(op, session, sink).map_err(|e| match e {
                RetouchError::Validation(msg) => {
                    RetouchError::validation(format!("operation {idx}: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

fn apply_operation(
    op: &Operation,
    session: &mut EditSession,
    sink: &mut dyn ArtifactSink,
) -> RetouchResult<()> {
    match op {
        Operation::Stroke {
            tool,
            brush,
            points,
        } => {
            let Some((first, rest)) = points.split_first() else {
                return Err(RetouchError::validation("stroke needs at least one point"));
            };
            let saved = session.brush();
            if let Some(b) = brush {
                session.set_brush(*b)?;
            }
            session.set_tool(*tool)?;
            let painted = stroke(session, *first, rest, sink);
            if session.is_drawing() {
                session.pointer_leave(sink)?;
            }
            session.set_brush(saved)?;
            painted
        }
        Operation::FaceEffect { effect, faces } => {
            session.apply_face_effects(faces, *effect, sink).map(|_| ())
        }
        Operation::CommitCheckpoint => session.commit_checkpoint(),
        Operation::ClearCheckpoint => session.clear_checkpoint(),
        Operation::Filters { filters } => {
            session.set_filters(*filters)?;
            session.bake_filters(sink)
        }
    }
}

fn stroke(
    session: &mut EditSession,
    first: Point,
    rest: &[Point],
    sink: &mut dyn ArtifactSink,
) -> RetouchResult<()> {
    session.pointer_down(first)?;
    for p in rest {
        session.pointer_move(*p)?;
    }
    session.pointer_up(sink)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/script/mod.rs"]
mod tests;
