use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use stagehand_common::{CommandScope, TransformKind};

/// One pending transform request.
///
/// The payload is homogeneous: position and scale carry `w = 0`, rotation
/// carries a quaternion as `(x, y, z, w)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformCommand {
    pub kind: TransformKind,
    pub payload: Vec4,
    pub scope: CommandScope,
}

impl TransformCommand {
    pub fn position(value: Vec3, scope: CommandScope) -> Self {
        Self {
            kind: TransformKind::Position,
            payload: value.extend(0.0),
            scope,
        }
    }

    pub fn scale(value: Vec3, scope: CommandScope) -> Self {
        Self {
            kind: TransformKind::Scale,
            payload: value.extend(0.0),
            scope,
        }
    }

    pub fn rotation(value: Quat, scope: CommandScope) -> Self {
        Self {
            kind: TransformKind::Rotation,
            payload: Vec4::from(value),
            scope,
        }
    }

    /// A command that never changes anything.
    pub fn none() -> Self {
        Self {
            kind: TransformKind::None,
            payload: Vec4::ZERO,
            scope: CommandScope::Ignore,
        }
    }

    pub fn vector(&self) -> Vec3 {
        self.payload.truncate()
    }

    pub fn quat(&self) -> Quat {
        Quat::from_vec4(self.payload)
    }

    /// Whether draining this command would leave the pose untouched.
    pub fn is_noop(&self) -> bool {
        self.scope.is_ignored() || self.kind == TransformKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_payloads_are_homogeneous() {
        let c = TransformCommand::position(Vec3::new(1.0, 2.0, 3.0), CommandScope::Relative);
        assert_eq!(c.payload, Vec4::new(1.0, 2.0, 3.0, 0.0));
        assert_eq!(c.vector(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn rotation_payload_keeps_quaternion() {
        let q = Quat::from_rotation_z(0.5);
        let c = TransformCommand::rotation(q, CommandScope::Absolute);
        assert_eq!(c.quat(), q);
        assert_eq!(c.kind, TransformKind::Rotation);
    }

    #[test]
    fn noop_detection() {
        assert!(TransformCommand::none().is_noop());
        assert!(TransformCommand::scale(Vec3::ONE, CommandScope::Ignore).is_noop());
        assert!(!TransformCommand::scale(Vec3::ONE, CommandScope::Absolute).is_noop());
    }
}
