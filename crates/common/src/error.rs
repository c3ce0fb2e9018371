/// Errors from math and validation on poses, vectors and ranges.
///
/// Raised at the call that detects them; the value being mutated is left
/// exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("component index {index} out of range for {len}-component value")]
    OutOfRange { index: usize, len: usize },
    #[error("cannot normalize a zero-length or non-finite vector")]
    DegenerateVector,
    #[error("rotation quaternion has zero length or non-finite components")]
    DegenerateRotation,
    #[error("range [{low}, {high}] is empty or unusable")]
    DegenerateRange { low: f32, high: f32 },
    #[error("viewport dimensions must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("projection needs 0 < fov < pi and 0 < near < far, got fov {fov}, near {near}, far {far}")]
    InvalidProjection { fov: f32, near: f32, far: f32 },
}
