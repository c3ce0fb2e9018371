use glam::Vec3;
use serde::{Deserialize, Serialize};
use stagehand_common::CommandScope;
use stagehand_input::CameraAction;

use crate::camera::Camera;

/// Turns held actions and mouse motion into camera movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraController {
    /// Units per second.
    pub move_speed: f32,
    /// Radians per second.
    pub turn_speed: f32,
    /// Radians per pixel of mouse travel.
    pub mouse_sensitivity: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            turn_speed: 1.5,
            mouse_sensitivity: 0.005,
        }
    }
}

impl CameraController {
    /// Drive `camera` for one tick of length `dt`.
    ///
    /// `Reset` wins over everything else held in the same tick. Mouse look
    /// uses the tracker's raw delta while the button was held for both
    /// samples, or whenever `RotateModifier` is held.
    pub fn apply(&self, camera: &mut Camera, actions: &[CameraAction], dt: f32) {
        if actions.contains(&CameraAction::Reset) {
            camera.reset();
            return;
        }

        // x = right, y = up, z = forward
        let mut travel = Vec3::ZERO;
        // x = yaw, y = pitch, z = roll
        let mut turn = Vec3::ZERO;
        for action in actions {
            match action {
                CameraAction::MoveForward => travel.z += 1.0,
                CameraAction::MoveBackward => travel.z -= 1.0,
                CameraAction::MoveRight => travel.x += 1.0,
                CameraAction::MoveLeft => travel.x -= 1.0,
                CameraAction::MoveUp => travel.y += 1.0,
                CameraAction::MoveDown => travel.y -= 1.0,
                CameraAction::TurnRight => turn.x += 1.0,
                CameraAction::TurnLeft => turn.x -= 1.0,
                CameraAction::PitchDown => turn.y += 1.0,
                CameraAction::PitchUp => turn.y -= 1.0,
                CameraAction::RollLeft => turn.z += 1.0,
                CameraAction::RollRight => turn.z -= 1.0,
                CameraAction::Reset | CameraAction::RotateModifier => {}
            }
        }

        if travel != Vec3::ZERO {
            let step = self.move_speed * dt;
            camera.move_right(travel.x * step);
            camera.move_up(travel.y * step);
            camera.move_forward(travel.z * step);
        }
        if turn != Vec3::ZERO {
            camera.update_rotation_scaled(dt, turn * self.turn_speed, CommandScope::Relative);
        }

        let looking = camera.mouse().is_dragging() || actions.contains(&CameraAction::RotateModifier);
        if looking {
            let delta = camera.mouse().raw_delta() * self.mouse_sensitivity;
            if delta != glam::Vec2::ZERO {
                camera.update_rotation(Vec3::new(delta.x, delta.y, 0.0), CommandScope::Relative);
            }
        }

        tracing::trace!(?travel, ?turn, looking, "camera controller tick");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CameraSettings;

    #[test]
    fn forward_moves_along_heading() {
        let mut cam = Camera::default();
        let ctl = CameraController {
            move_speed: 2.0,
            ..CameraController::default()
        };
        ctl.apply(&mut cam, &[CameraAction::MoveForward], 0.5);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-6));

        ctl.apply(&mut cam, &[CameraAction::MoveLeft, CameraAction::MoveUp], 0.5);
        assert!(cam.position().abs_diff_eq(Vec3::new(-1.0, 1.0, 1.0), 1e-6));
    }

    #[test]
    fn opposite_actions_cancel() {
        let mut cam = Camera::default();
        let ctl = CameraController::default();
        ctl.apply(
            &mut cam,
            &[CameraAction::MoveForward, CameraAction::MoveBackward],
            1.0,
        );
        assert_eq!(cam.position(), Vec3::ZERO);
    }

    #[test]
    fn turning_is_dt_scaled() {
        let mut cam = Camera::default();
        let ctl = CameraController {
            turn_speed: std::f32::consts::PI,
            ..CameraController::default()
        };
        ctl.apply(&mut cam, &[CameraAction::TurnRight], 0.5);
        assert!(cam.heading().get().abs_diff_eq(Vec3::X, 1e-5));
        ctl.apply(&mut cam, &[CameraAction::TurnLeft], 0.5);
        assert!(cam.heading().get().abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn reset_wins() {
        let start = Vec3::new(1.0, 2.0, 3.0);
        let mut cam = Camera::looking(start, Vec3::ZERO, CameraSettings::default()).unwrap();
        let ctl = CameraController::default();
        ctl.apply(&mut cam, &[CameraAction::MoveForward], 1.0);
        assert_ne!(cam.position(), start);
        ctl.apply(&mut cam, &[CameraAction::MoveForward, CameraAction::Reset], 1.0);
        assert_eq!(cam.position(), start);
    }

    #[test]
    fn mouse_look_needs_button_held() {
        let ctl = CameraController {
            mouse_sensitivity: 0.01,
            ..CameraController::default()
        };

        let mut cam = Camera::default();
        cam.update_mouse(false, 0.0, 0.0);
        cam.update_mouse(true, 10.0, 0.0);
        ctl.apply(&mut cam, &[], 0.016);
        assert_eq!(cam.orientation(), Vec3::ZERO);

        cam.update_mouse(true, 20.0, 0.0);
        ctl.apply(&mut cam, &[], 0.016);
        assert!((cam.orientation().x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn rotate_modifier_looks_without_button() {
        let ctl = CameraController {
            mouse_sensitivity: 0.01,
            ..CameraController::default()
        };
        let mut cam = Camera::default();
        cam.update_mouse(false, 0.0, 0.0);
        cam.update_mouse(false, 0.0, 5.0);
        ctl.apply(&mut cam, &[CameraAction::RotateModifier], 0.016);
        assert!((cam.orientation().y - 0.05).abs() < 1e-6);
        assert_eq!(cam.position(), Vec3::ZERO);
    }
}
