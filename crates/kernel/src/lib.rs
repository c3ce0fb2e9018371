//! Transform kernel: the deferred command queue, entities that own one, and
//! the scene that updates them once per tick.
//!
//! # Invariants
//! - Commands apply strictly in enqueue order; Ignore-scoped commands never apply.
//! - A queue is fully drained before heading, up or the world matrix are read.
//! - Each entity owns its pose and queue; no entity mutates another.

pub mod buffer;
pub mod command;
pub mod entity;
pub mod scene;

pub use buffer::{DrainSummary, TransformBuffer};
pub use command::TransformCommand;
pub use entity::{Entity, Motion, Transformable};
pub use scene::{Scene, SceneError, TickReport};

pub fn crate_info() -> &'static str {
    "stagehand-kernel v0.1.0"
}
