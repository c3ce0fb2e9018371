//! Rendering boundary: what a renderer is allowed to see of a tick.
//!
//! # Invariants
//! - A renderer reads a captured [`Frame`], never the live scene or camera.
//! - Captured world matrices are the ones committed by the last scene update.
//!
//! The [`Renderer`] trait is the seam for a GPU backend; [`DebugTextRenderer`]
//! is the headless implementation used by the CLI and tests.

mod frame;
mod renderer;

pub use frame::{DrawItem, Frame, ShaderConstants};
pub use renderer::{DebugTextRenderer, RenderError, Renderer};

pub fn crate_info() -> &'static str {
    "stagehand-render v0.1.0"
}
