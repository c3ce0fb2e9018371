use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use stagehand_assets::Renderable;
use stagehand_common::pose::orientation_quat;
use stagehand_common::{CommandScope, EntityId, MathError, Pose};

use crate::buffer::{DrainSummary, TransformBuffer};

/// The move/scale/rotate capability shared by everything with a queued pose.
///
/// `*_by` requests are Relative, `*_to` requests are Absolute. Nothing takes
/// effect until the owner drains its queue.
pub trait Transformable {
    fn move_by(&mut self, delta: Vec3);
    fn move_to(&mut self, position: Vec3);
    fn scale_by(&mut self, delta: Vec3);
    fn scale_to(&mut self, scale: Vec3);
    fn rotate_by(&mut self, delta: Quat) -> Result<(), MathError>;
    fn rotate_to(&mut self, rotation: Quat) -> Result<(), MathError>;
}

/// Constant per-second drift applied on every update.
///
/// `rotation` is in degrees per second about X, Y and Z (pitch, yaw, roll).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Motion {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Amplitude of the sine modulation on top of the plain `dt` step.
    pub wobble: f32,
}

impl Motion {
    pub fn is_still(&self) -> bool {
        self.position == Vec3::ZERO && self.rotation == Vec3::ZERO && self.scale == Vec3::ZERO
    }

    /// Step factor for one tick: `dt + wobble * dt * (sin(total + dt) - sin(total))`.
    pub fn factor(&self, dt: f32, total: f32) -> f32 {
        dt + self.wobble * dt * ((total + dt).sin() - total.sin())
    }
}

/// A placed, drawable object.
///
/// Transform requests queue up in `pending` and only reach `local` and the
/// cached world matrix during [`Entity::update`].
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    local: Pose,
    pending: TransformBuffer,
    renderable: Renderable,
    motion: Motion,
    world: Mat4,
}

impl Entity {
    pub fn new(renderable: Renderable, local: Pose) -> Self {
        Self {
            id: EntityId::new(),
            world: local.world_matrix(),
            local,
            pending: TransformBuffer::new(),
            renderable,
            motion: Motion::default(),
        }
    }

    pub fn at(renderable: Renderable, position: Vec3) -> Self {
        Self::new(renderable, Pose::at(position))
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn local(&self) -> &Pose {
        &self.local
    }

    pub fn renderable(&self) -> Renderable {
        self.renderable
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn set_motion(&mut self, motion: Motion) {
        self.motion = motion;
    }

    pub fn set_position_speed(&mut self, speed: Vec3) {
        self.motion.position = speed;
    }

    pub fn set_rotation_speed(&mut self, degrees_per_second: Vec3) {
        self.motion.rotation = degrees_per_second;
    }

    pub fn set_scale_speed(&mut self, speed: Vec3) {
        self.motion.scale = speed;
    }

    /// Commands waiting for the next update.
    pub fn pending(&self) -> &TransformBuffer {
        &self.pending
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// World matrix as of the last [`Entity::update`].
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// Queue a Relative rotation from Euler angles in radians, composed
    /// roll first, then pitch, then yaw.
    pub fn rotate_euler(&mut self, pitch: f32, yaw: f32, roll: f32) -> Result<(), MathError> {
        self.rotate_by(orientation_quat(Vec3::new(yaw, pitch, roll)))
    }

    /// Queue this tick's motion, drain every pending command into the local
    /// pose, then rebuild the world matrix.
    pub fn update(&mut self, dt: f32, total: f32) -> DrainSummary {
        self.queue_motion(dt, total);
        let summary = self.pending.drain_into(&mut self.local);
        self.world = self.local.world_matrix();
        if summary.applied > 0 {
            tracing::trace!(
                id = %self.id.short(),
                applied = summary.applied,
                skipped = summary.skipped,
                "entity drained"
            );
        }
        summary
    }

    fn queue_motion(&mut self, dt: f32, total: f32) {
        if self.motion.is_still() {
            return;
        }
        let step = self.motion.factor(dt, total);
        let Motion {
            position,
            rotation,
            scale,
            ..
        } = self.motion;

        if position != Vec3::ZERO {
            self.pending.push_position(position * step, CommandScope::Relative);
        }
        if rotation != Vec3::ZERO {
            let radians = Vec3::new(
                rotation.x.to_radians(),
                rotation.y.to_radians(),
                rotation.z.to_radians(),
            ) * step;
            // a unit quaternion built from finite angles is always accepted
            if let Err(e) = self.rotate_euler(radians.x, radians.y, radians.z) {
                tracing::warn!(id = %self.id.short(), "skipping motion rotation: {e}");
            }
        }
        if scale != Vec3::ZERO {
            self.pending.push_scale(scale * step, CommandScope::Relative);
        }
    }
}

impl Transformable for Entity {
    fn move_by(&mut self, delta: Vec3) {
        self.pending.push_position(delta, CommandScope::Relative);
    }

    fn move_to(&mut self, position: Vec3) {
        self.pending.push_position(position, CommandScope::Absolute);
    }

    fn scale_by(&mut self, delta: Vec3) {
        self.pending.push_scale(delta, CommandScope::Relative);
    }

    fn scale_to(&mut self, scale: Vec3) {
        self.pending.push_scale(scale, CommandScope::Absolute);
    }

    fn rotate_by(&mut self, delta: Quat) -> Result<(), MathError> {
        self.pending.push_rotation(delta, CommandScope::Relative)
    }

    fn rotate_to(&mut self, rotation: Quat) -> Result<(), MathError> {
        self.pending.push_rotation(rotation, CommandScope::Absolute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_assets::{MaterialHandle, MeshHandle};
    use std::f32::consts::FRAC_PI_2;

    fn quad() -> Renderable {
        Renderable {
            mesh: MeshHandle(1),
            material: MaterialHandle(2),
        }
    }

    #[test]
    fn requests_wait_for_update() {
        let mut e = Entity::at(quad(), Vec3::ZERO);
        e.move_by(Vec3::X);
        e.scale_to(Vec3::splat(3.0));
        assert_eq!(e.local().position(), Vec3::ZERO);
        assert_eq!(e.pending().len(), 2);
        assert_eq!(e.world_matrix(), Mat4::IDENTITY);

        let summary = e.update(0.016, 1.0);
        assert_eq!(summary.applied, 2);
        assert_eq!(e.local().position(), Vec3::X);
        assert_eq!(e.local().scale(), Vec3::splat(3.0));
        assert!(e.pending().is_empty());
    }

    #[test]
    fn world_matrix_cached_until_update() {
        let mut e = Entity::at(quad(), Vec3::ZERO);
        e.move_to(Vec3::new(4.0, 5.0, 6.0));
        let before = e.world_matrix();
        e.update(0.0, 0.0);
        assert_ne!(e.world_matrix(), before);
        assert!(
            e.world_matrix()
                .w_axis
                .truncate()
                .abs_diff_eq(Vec3::new(4.0, 5.0, 6.0), 1e-6)
        );
    }

    #[test]
    fn absolute_move_discards_earlier_relative() {
        let mut e = Entity::at(quad(), Vec3::ONE);
        e.move_by(Vec3::new(5.0, 0.0, 0.0));
        e.move_to(Vec3::ZERO);
        e.update(0.016, 0.0);
        assert_eq!(e.local().position(), Vec3::ZERO);
    }

    #[test]
    fn rotate_by_composes_in_order() {
        let mut e = Entity::at(quad(), Vec3::ZERO);
        e.rotate_by(Quat::from_rotation_y(FRAC_PI_2)).unwrap();
        e.update(0.0, 0.0);
        assert!(e.local().heading().get().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn rotate_euler_matches_pose_convention() {
        let mut e = Entity::at(quad(), Vec3::ZERO);
        e.rotate_euler(0.0, FRAC_PI_2, 0.0).unwrap();
        e.update(0.0, 0.0);
        let expected = Pose::from_orientation(Vec3::ZERO, Vec3::new(FRAC_PI_2, 0.0, 0.0));
        assert!(e.local().heading().get().abs_diff_eq(expected.heading().get(), 1e-5));
    }

    #[test]
    fn motion_advances_each_update() {
        let mut e = Entity::at(quad(), Vec3::ZERO).with_motion(Motion {
            position: Vec3::new(2.0, 0.0, 0.0),
            scale: Vec3::new(1.0, 1.0, 0.0),
            ..Motion::default()
        });
        e.update(0.5, 0.0);
        e.update(0.5, 0.5);
        assert!(e.local().position().abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-6));
        assert!(e.local().scale().abs_diff_eq(Vec3::new(2.0, 2.0, 1.0), 1e-6));
    }

    #[test]
    fn rotation_speed_is_degrees_per_second() {
        let mut e = Entity::at(quad(), Vec3::ZERO);
        e.set_rotation_speed(Vec3::new(0.0, 90.0, 0.0));
        e.update(1.0, 0.0);
        assert!(e.local().heading().get().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn wobble_modulates_step() {
        let still = Motion::default();
        assert_eq!(still.factor(0.1, 2.0), 0.1);

        let wobbly = Motion {
            wobble: 1.0,
            ..Motion::default()
        };
        let expected = 0.1 + 0.1 * ((2.1f32).sin() - (2.0f32).sin());
        assert!((wobbly.factor(0.1, 2.0) - expected).abs() < 1e-6);
    }

    #[test]
    fn degenerate_rotation_leaves_queue_alone() {
        let mut e = Entity::at(quad(), Vec3::ZERO);
        let zero = Quat::from_xyzw(0.0, 0.0, 0.0, 0.0);
        assert_eq!(e.rotate_to(zero), Err(MathError::DegenerateRotation));
        assert!(e.pending().is_empty());
    }

    #[test]
    fn clear_pending_drops_requests() {
        let mut e = Entity::at(quad(), Vec3::ZERO);
        e.move_by(Vec3::X);
        e.clear_pending();
        e.update(0.016, 0.0);
        assert_eq!(e.local().position(), Vec3::ZERO);
    }
}
