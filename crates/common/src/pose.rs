//! Position, scale and rotation of a camera or entity, with derived heading
//! and up vectors.
//!
//! Orientation in Euler form is `(yaw, pitch, roll)` stored as `x, y, z`:
//! yaw turns about Y, pitch about X, roll about Z. The rotation quaternion is
//! composed so that roll applies first, then pitch, then yaw.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::{MathError, UnitVector, component};

/// Builds the roll-pitch-yaw rotation for an Euler orientation `(yaw, pitch, roll)`.
pub fn orientation_quat(orientation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::YXZ, orientation.x, orientation.y, orientation.z)
}

/// Inverse of [`orientation_quat`], up to the usual Euler ambiguities.
pub fn quat_orientation(rotation: Quat) -> Vec3 {
    let (yaw, pitch, roll) = rotation.normalize().to_euler(EulerRot::YXZ);
    Vec3::new(yaw, pitch, roll)
}

/// Rejects quaternions that cannot represent a rotation.
pub fn validate_rotation(rotation: Quat) -> Result<Quat, MathError> {
    let length = rotation.length();
    if !length.is_finite() || length <= f32::EPSILON {
        return Err(MathError::DegenerateRotation);
    }
    Ok(rotation)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Snapshot {
    position: Vec3,
    orientation: Vec3,
    rotation: Quat,
}

/// Placement of a camera or entity.
///
/// Heading and up are recomputed on every rotation change, never lazily.
/// The start snapshot taken at construction (or by [`Pose::snapshot`]) is
/// what [`Pose::reset`] restores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    position: Vec3,
    scale: Vec3,
    rotation: Quat,
    orientation: Vec3,
    heading: UnitVector,
    up: UnitVector,
    start: Snapshot,
}

impl Default for Pose {
    fn default() -> Self {
        Self::from_orientation(Vec3::ZERO, Vec3::ZERO)
    }
}

impl Pose {
    /// Pose from explicit position, scale and rotation quaternion.
    ///
    /// The quaternion is stored exactly as given; only its normalized form is
    /// used to derive heading and up.
    pub fn new(position: Vec3, scale: Vec3, rotation: Quat) -> Result<Self, MathError> {
        let rotation = validate_rotation(rotation)?;
        let orientation = quat_orientation(rotation);
        Ok(Self::build(position, scale, rotation, orientation))
    }

    /// Pose at `position` facing the Euler `orientation`, with unit scale.
    pub fn from_orientation(position: Vec3, orientation: Vec3) -> Self {
        Self::build(position, Vec3::ONE, orientation_quat(orientation), orientation)
    }

    pub fn at(position: Vec3) -> Self {
        Self::from_orientation(position, Vec3::ZERO)
    }

    fn build(position: Vec3, scale: Vec3, rotation: Quat, orientation: Vec3) -> Self {
        let mut pose = Self {
            position,
            scale,
            rotation,
            orientation,
            heading: UnitVector::FORWARD,
            up: UnitVector::UP,
            start: Snapshot {
                position,
                orientation,
                rotation,
            },
        };
        pose.recompute_basis();
        pose
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Euler orientation `(yaw, pitch, roll)` in radians.
    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    pub fn heading(&self) -> UnitVector {
        self.heading
    }

    pub fn up(&self) -> UnitVector {
        self.up
    }

    /// Right-hand side of the view in a left-handed basis: `up x heading`.
    pub fn right(&self) -> UnitVector {
        self.up.cross(&self.heading).unwrap_or(UnitVector::RIGHT)
    }

    pub fn start_position(&self) -> Vec3 {
        self.start.position
    }

    pub fn start_orientation(&self) -> Vec3 {
        self.start.orientation
    }

    /// Quaternion component by index: 0 = x, 1 = y, 2 = z, 3 = w.
    pub fn rotation_component(&self, index: usize) -> Result<f32, MathError> {
        component(&self.rotation.to_array(), index)
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Moves `distance` along `direction`.
    pub fn translate_along(&mut self, direction: UnitVector, distance: f32) {
        self.translate(direction.scale(distance));
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Adds `delta` to each scale component.
    pub fn grow(&mut self, delta: Vec3) {
        self.scale += delta;
    }

    /// Replaces the rotation. Zero-length quaternions are rejected.
    pub fn set_rotation(&mut self, rotation: Quat) -> Result<(), MathError> {
        self.rotation = validate_rotation(rotation)?;
        self.orientation = quat_orientation(rotation);
        self.recompute_basis();
        Ok(())
    }

    /// Composes `delta` onto the current rotation: `normalize(current * delta)`.
    pub fn compose_rotation(&mut self, delta: Quat) -> Result<(), MathError> {
        let delta = validate_rotation(delta)?;
        self.set_rotation((self.rotation * delta).normalize())
    }

    /// Replaces the Euler orientation. Non-finite angles are rejected and
    /// leave the pose untouched.
    pub fn set_orientation(&mut self, orientation: Vec3) -> Result<(), MathError> {
        if !orientation.is_finite() {
            return Err(MathError::DegenerateRotation);
        }
        self.orientation = orientation;
        self.rotation = orientation_quat(orientation);
        self.recompute_basis();
        Ok(())
    }

    /// Adds `delta` to the Euler orientation.
    pub fn rotate(&mut self, delta: Vec3) -> Result<(), MathError> {
        self.set_orientation(self.orientation + delta)
    }

    /// Restores the position and rotation captured by the last snapshot.
    pub fn reset(&mut self) {
        self.position = self.start.position;
        self.orientation = self.start.orientation;
        self.rotation = self.start.rotation;
        self.recompute_basis();
    }

    /// Makes the current position and rotation the new reset target.
    pub fn snapshot(&mut self) {
        self.start = Snapshot {
            position: self.position,
            orientation: self.orientation,
            rotation: self.rotation,
        };
    }

    /// Scale, then rotation, then translation, in glam's column-vector
    /// layout (the transpose of the row-vector `S * R * T` product).
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation.normalize(), self.position)
    }

    fn recompute_basis(&mut self) {
        let rotation = self.rotation.normalize();
        let heading = rotation * UnitVector::FORWARD.get();
        let up = rotation * UnitVector::UP.get();
        // rotation is validated non-degenerate, so neither set can fail
        let _ = self.heading.set(heading);
        let _ = self.up.set(up);
    }
}
