use std::f32::consts::PI;

use serde::{Deserialize, Serialize};
use stagehand_common::MathError;

/// Projection parameters for a [`crate::Camera`].
///
/// Field of view is kept in radians but read and written as a fraction of
/// pi, so `0.25` is a 45 degree vertical field of view. The aspect ratio is
/// always derived from width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    #[serde(rename = "field_of_view", with = "fraction_of_pi")]
    fov: f32,
    width: f32,
    height: f32,
    near: f32,
    far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 0.25 * PI,
            width: 1280.0,
            height: 720.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraSettings {
    /// Checked constructor; `field_of_view` is a fraction of pi.
    pub fn new(
        field_of_view: f32,
        width: f32,
        height: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, MathError> {
        let mut settings = Self::default();
        settings.set_dimensions(width, height)?;
        settings.set_clipping_planes(near, far)?;
        settings.set_field_of_view(field_of_view)?;
        Ok(settings)
    }

    /// Field of view as a fraction of pi.
    pub fn field_of_view(&self) -> f32 {
        self.fov / PI
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_field_of_view(&mut self, fraction: f32) -> Result<(), MathError> {
        let fov = fraction * PI;
        if !(fov > 0.0 && fov < PI) {
            return Err(projection_error(fov, self.near, self.far));
        }
        self.fov = fov;
        Ok(())
    }

    pub fn set_dimensions(&mut self, width: f32, height: f32) -> Result<(), MathError> {
        check_viewport(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Width becomes `ratio * height`.
    pub fn set_width_by_aspect_ratio(&mut self, ratio: f32, height: f32) -> Result<(), MathError> {
        self.set_dimensions(ratio * height, height)
    }

    /// Height becomes `width / ratio`.
    pub fn set_height_by_aspect_ratio(&mut self, ratio: f32, width: f32) -> Result<(), MathError> {
        self.set_dimensions(width, width / ratio)
    }

    pub fn set_clipping_planes(&mut self, near: f32, far: f32) -> Result<(), MathError> {
        if !(near > 0.0 && far > near && far.is_finite()) {
            return Err(projection_error(self.fov, near, far));
        }
        self.near = near;
        self.far = far;
        Ok(())
    }

    /// Re-checks every field; used after deserializing.
    pub fn validate(&self) -> Result<(), MathError> {
        check_viewport(self.width, self.height)?;
        let fov_ok = self.fov > 0.0 && self.fov < PI;
        let planes_ok = self.near > 0.0 && self.far > self.near && self.far.is_finite();
        if !(fov_ok && planes_ok) {
            return Err(projection_error(self.fov, self.near, self.far));
        }
        Ok(())
    }
}

fn projection_error(fov: f32, near: f32, far: f32) -> MathError {
    MathError::InvalidProjection { fov, near, far }
}

fn check_viewport(width: f32, height: f32) -> Result<(), MathError> {
    let ok = |v: f32| v.is_finite() && v > 0.0;
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(MathError::InvalidViewport { width, height })
    }
}

mod fraction_of_pi {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::f32::consts::PI;

    pub fn serialize<S: Serializer>(radians: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(radians / PI)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        Ok(f32::deserialize(deserializer)? * PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = CameraSettings::default();
        assert!((s.field_of_view() - 0.25).abs() < 1e-6);
        assert!((s.fov_radians() - PI / 4.0).abs() < 1e-6);
        assert!((s.aspect_ratio() - 1280.0 / 720.0).abs() < 1e-6);
        assert_eq!((s.near(), s.far()), (0.1, 100.0));
    }

    #[test]
    fn aspect_follows_dimensions() {
        let mut s = CameraSettings::default();
        s.set_dimensions(1920.0, 1080.0).unwrap();
        assert_eq!(s.aspect_ratio(), 1920.0 / 1080.0);

        s.set_width_by_aspect_ratio(2.0, 500.0).unwrap();
        assert_eq!((s.width(), s.height()), (1000.0, 500.0));

        s.set_height_by_aspect_ratio(4.0, 800.0).unwrap();
        assert_eq!((s.width(), s.height()), (800.0, 200.0));
        assert_eq!(s.aspect_ratio(), 4.0);
    }

    #[test]
    fn rejects_bad_viewport() {
        let mut s = CameraSettings::default();
        assert_eq!(
            s.set_dimensions(800.0, 0.0),
            Err(MathError::InvalidViewport {
                width: 800.0,
                height: 0.0
            })
        );
        assert!(s.set_height_by_aspect_ratio(0.0, 800.0).is_err());
        assert_eq!(s.width(), 1280.0);
    }

    #[test]
    fn rejects_bad_projection() {
        let mut s = CameraSettings::default();
        assert!(s.set_field_of_view(0.0).is_err());
        assert!(s.set_field_of_view(1.0).is_err());
        assert!(s.set_clipping_planes(0.0, 10.0).is_err());
        assert!(s.set_clipping_planes(5.0, 1.0).is_err());
        assert_eq!(s, CameraSettings::default());

        s.set_field_of_view(0.5).unwrap();
        s.set_clipping_planes(1.0, 500.0).unwrap();
        assert!((s.fov_radians() - PI / 2.0).abs() < 1e-6);
        assert_eq!(s.far(), 500.0);
    }

    #[test]
    fn serialized_fov_is_fraction_of_pi() {
        let s: CameraSettings =
            serde_json::from_str(r#"{"field_of_view": 0.5, "width": 640, "height": 480}"#).unwrap();
        assert!((s.fov_radians() - PI / 2.0).abs() < 1e-6);
        assert_eq!(s.near(), 0.1);
        assert!(s.validate().is_ok());

        let json = serde_json::to_value(s).unwrap();
        assert!((json["field_of_view"].as_f64().unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn validate_catches_bad_files() {
        let s: CameraSettings = serde_json::from_str(r#"{"height": -1}"#).unwrap();
        assert!(matches!(s.validate(), Err(MathError::InvalidViewport { .. })));
        let s: CameraSettings = serde_json::from_str(r#"{"near": 10, "far": 1}"#).unwrap();
        assert!(matches!(s.validate(), Err(MathError::InvalidProjection { .. })));
    }
}
