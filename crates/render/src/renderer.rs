use std::fmt::Write as _;

use stagehand_assets::{AssetError, ResourceRegistry};

use crate::frame::Frame;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("draw item for entity {entity} has dangling resources: {source}")]
    Resource {
        entity: String,
        #[source]
        source: AssetError,
    },
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer consumes a captured frame and resolves handles through the
/// registry. It never mutates scene or camera state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    fn render(
        &self,
        frame: &Frame,
        resources: &ResourceRegistry,
    ) -> Result<Self::Output, RenderError>;
}

/// Headless renderer producing a human-readable frame dump.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame, resources: &ResourceRegistry) -> Result<String, RenderError> {
        let mut out = String::new();
        let eye = frame.camera_position;
        let _ = writeln!(out, "=== Frame (tick={}) ===", frame.tick);
        let _ = writeln!(out, "Draws: {}", frame.items.len());
        let _ = writeln!(out, "Camera: eye=({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z);

        let mut indices = 0;
        for item in &frame.items {
            let (mesh, material) = resources.resolve(item.renderable).map_err(|source| {
                RenderError::Resource {
                    entity: item.entity.short(),
                    source,
                }
            })?;
            indices += mesh.index_count();
            let p = item.world.w_axis;
            let _ = writeln!(
                out,
                "  [{}] {} / {} pos=({:.2}, {:.2}, {:.2})",
                item.entity.short(),
                mesh.name,
                material.name,
                p.x,
                p.y,
                p.z
            );
        }
        tracing::debug!(tick = frame.tick, draws = frame.items.len(), indices, "rendered frame");
        Ok(out)
    }
}
