//! First-person camera: settings, cached view/projection matrices and an
//! action-driven controller.
//!
//! # Invariants
//! - Aspect ratio is always derived from the last width and height.
//! - Camera motion mutates the pose directly; only entities defer through a queue.
//! - Cached matrices change only through `update_*_matrix` or a mutator that calls it.

mod camera;
mod controller;
mod settings;

pub use camera::Camera;
pub use controller::CameraController;
pub use settings::CameraSettings;

pub fn crate_info() -> &'static str {
    "stagehand-camera v0.1.0"
}
