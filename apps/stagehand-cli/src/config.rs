use std::path::Path;

use anyhow::{Context, bail};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use stagehand_camera::{CameraController, CameraSettings};
use stagehand_input::KeyBindings;

/// Where the camera starts, and where `Reset` returns it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraStart {
    pub position: Vec3,
    /// Euler `(yaw, pitch, roll)` in radians.
    pub orientation: Vec3,
}

impl Default for CameraStart {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -5.0),
            orientation: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub seed: u64,
    pub count: usize,
    /// Entities are scattered in `[-extent, extent]` on every axis.
    pub extent: f32,
    /// Rotation speed given to every entity, degrees per second.
    pub spin: Vec3,
    /// Sine modulation on the spin.
    pub wobble: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            count: 8,
            extent: 4.0,
            spin: Vec3::new(0.0, 0.0, 45.0),
            wobble: 1.0,
        }
    }
}

/// Everything the frame loop reads from disk. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub camera: CameraSettings,
    pub camera_start: CameraStart,
    pub controller: CameraController,
    pub bindings: KeyBindings,
    pub scene: SceneConfig,
}

impl StageConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config: Self = match ext.as_deref() {
            Some("yaml" | "yml") => serde_yaml::from_str(&text)
                .with_context(|| format!("parsing YAML config {}", path.display()))?,
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("parsing JSON config {}", path.display()))?,
            _ => bail!("unsupported config format: {}", path.display()),
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.camera.validate().context("invalid camera settings")?;
        if !(self.scene.extent.is_finite() && self.scene.extent >= 0.0) {
            bail!("scene extent must be a non-negative number, got {}", self.scene.extent);
        }
        if !self.scene.wobble.is_finite() {
            bail!("scene wobble must be finite, got {}", self.scene.wobble);
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_input::CameraAction;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        let file = write_temp(".yaml", "{}\n");
        let config = StageConfig::load(file.path()).unwrap();
        assert_eq!(config, StageConfig::default());
    }

    #[test]
    fn yaml_overrides() {
        let file = write_temp(
            ".yml",
            "camera:\n  field_of_view: 0.5\n  width: 1920\n  height: 1080\n\
             camera_start:\n  position: [0.0, 2.0, -10.0]\n\
             bindings:\n  i: move_forward\n\
             scene:\n  seed: 7\n  count: 3\n",
        );
        let config = StageConfig::load(file.path()).unwrap();
        assert_eq!(config.camera.aspect_ratio(), 1920.0 / 1080.0);
        assert!((config.camera.field_of_view() - 0.5).abs() < 1e-6);
        assert_eq!(config.camera_start.position, Vec3::new(0.0, 2.0, -10.0));
        assert_eq!(config.bindings.action("I"), Some(CameraAction::MoveForward));
        assert_eq!(config.bindings.action("W"), None);
        assert_eq!(config.scene.seed, 7);
        assert_eq!(config.scene.extent, 4.0);
        assert_eq!(config.scene.wobble, 1.0);
    }

    #[test]
    fn json_by_extension() {
        let file = write_temp(".json", r#"{"controller": {"move_speed": 12.5}}"#);
        let config = StageConfig::load(file.path()).unwrap();
        assert_eq!(config.controller.move_speed, 12.5);
        assert_eq!(
            config.controller.turn_speed,
            CameraController::default().turn_speed
        );
    }

    #[test]
    fn unknown_extension_rejected() {
        let file = write_temp(".toml", "");
        let err = StageConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }

    #[test]
    fn invalid_camera_rejected() {
        let file = write_temp(".yaml", "camera:\n  width: 0\n");
        let err = StageConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid camera settings"));
    }

    #[test]
    fn missing_file_has_context() {
        let err = StageConfig::load(Path::new("/nonexistent/stage.yaml")).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn yaml_dump_reloads() {
        let yaml = StageConfig::default().to_yaml().unwrap();
        let file = write_temp(".yaml", &yaml);
        assert_eq!(StageConfig::load(file.path()).unwrap(), StageConfig::default());
    }
}
