//! Shared math and pose types for the stagehand frame loop.
//!
//! # Invariants
//! - A `UnitVector` always has length 1; degenerate input is rejected, never stored.
//! - A `Pose` recomputes heading and up eagerly on every rotation change.
//! - Scale is unconstrained; rotation is never a zero-length quaternion.

mod error;
pub mod pose;
pub mod remap;
pub mod types;
pub mod unit_vector;

pub use error::MathError;
pub use pose::Pose;
pub use remap::{Span, remap};
pub use types::{CommandScope, EntityId, TransformKind};
pub use unit_vector::UnitVector;

/// Returns `values[index]`, or `OutOfRange` when the index is past the end.
pub fn component(values: &[f32], index: usize) -> Result<f32, MathError> {
    values
        .get(index)
        .copied()
        .ok_or(MathError::OutOfRange {
            index,
            len: values.len(),
        })
}

pub fn crate_info() -> &'static str {
    "stagehand-common v0.1.0"
}
