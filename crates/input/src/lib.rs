//! Input interpretation: raw samples in, camera actions and mouse deltas out.
//!
//! # Invariants
//! - The tracker's current sample is always the latest update; previous is the one before it.
//! - Nothing here polls a device; the host hands over booleans and positions.

pub mod action;
pub mod mouse;

pub use action::{CameraAction, KeyBindings, KeyboardState};
pub use mouse::{MouseSample, MouseTracker};

pub fn crate_info() -> &'static str {
    "stagehand-input v0.1.0"
}
