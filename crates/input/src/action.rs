use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a held key asks the camera to do.
///
/// The host maps raw keys to actions through [`KeyBindings`]; the camera
/// controller only ever sees actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraAction {
    MoveUp,
    MoveDown,
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    PitchUp,
    PitchDown,
    /// Yaw left.
    TurnLeft,
    /// Yaw right.
    TurnRight,
    RollLeft,
    RollRight,
    /// Restore the camera to its start pose.
    Reset,
    /// Mouse look without holding a mouse button.
    RotateModifier,
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}

/// Key name to action table. Key names are matched case-insensitively,
/// including names read from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, CameraAction>",
    into = "BTreeMap<String, CameraAction>"
)]
pub struct KeyBindings {
    keys: BTreeMap<String, CameraAction>,
}

impl From<BTreeMap<String, CameraAction>> for KeyBindings {
    fn from(raw: BTreeMap<String, CameraAction>) -> Self {
        let keys = raw
            .into_iter()
            .map(|(key, action)| (normalize_key(&key), action))
            .collect();
        Self { keys }
    }
}

impl From<KeyBindings> for BTreeMap<String, CameraAction> {
    fn from(bindings: KeyBindings) -> Self {
        bindings.keys
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use CameraAction::*;
        let keys = [
            ("W", MoveForward),
            ("S", MoveBackward),
            ("A", MoveLeft),
            ("D", MoveRight),
            ("E", MoveUp),
            ("Q", MoveDown),
            ("UP", PitchUp),
            ("DOWN", PitchDown),
            ("LEFT", TurnLeft),
            ("RIGHT", TurnRight),
            ("Z", RollLeft),
            ("C", RollRight),
            ("R", Reset),
            ("SHIFT", RotateModifier),
        ]
        .into_iter()
        .map(|(k, a)| (k.to_string(), a))
        .collect();
        Self { keys }
    }
}

impl KeyBindings {
    /// A table with no bindings at all.
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Bind `key` to `action`, returning the action it replaced.
    pub fn bind(&mut self, key: &str, action: CameraAction) -> Option<CameraAction> {
        self.keys.insert(normalize_key(key), action)
    }

    pub fn unbind(&mut self, key: &str) -> Option<CameraAction> {
        self.keys.remove(&normalize_key(key))
    }

    pub fn action(&self, key: &str) -> Option<CameraAction> {
        self.keys.get(&normalize_key(key)).copied()
    }

    /// Key names bound to `action`.
    pub fn keys_for(&self, action: CameraAction) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(move |(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Raw key-down flags as last reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    down: BTreeMap<String, bool>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, is_down: bool) {
        self.down.insert(normalize_key(key), is_down);
    }

    pub fn press(&mut self, key: &str) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: &str) {
        self.set(key, false);
    }

    pub fn release_all(&mut self) {
        self.down.clear();
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.down.get(&normalize_key(key)).copied().unwrap_or(false)
    }

    /// Actions whose bound key is currently held, in action order, each
    /// reported once.
    pub fn actions(&self, bindings: &KeyBindings) -> Vec<CameraAction> {
        let mut actions: Vec<CameraAction> = bindings
            .keys
            .iter()
            .filter(|(key, _)| self.is_down(key))
            .map(|(_, action)| *action)
            .collect();
        actions.sort();
        actions.dedup();
        if !actions.is_empty() {
            tracing::trace!(?actions, "held actions");
        }
        actions
    }
}
