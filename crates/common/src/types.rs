use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an entity in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for log lines and debug output.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Which part of a pose a transform command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformKind {
    /// Placeholder kind; commands of this kind never change a pose.
    None,
    Position,
    Scale,
    Rotation,
}

/// How a transform request combines with the current value.
///
/// `Absolute` overwrites, `Relative` accumulates, `Ignore` is dropped
/// without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CommandScope {
    Ignore,
    Absolute,
    #[default]
    Relative,
}

impl CommandScope {
    pub fn is_ignored(self) -> bool {
        self == Self::Ignore
    }
}
