use glam::{Mat4, Vec2, Vec3};
use stagehand_common::{CommandScope, MathError, Pose, UnitVector};
use stagehand_input::MouseTracker;

use crate::settings::CameraSettings;

/// First-person camera with cached view and projection matrices.
///
/// Camera motion applies to the pose immediately rather than through a
/// command queue. Position and rotation updates refresh the view matrix;
/// only [`Camera::set_dimensions`] refreshes the projection on its own.
/// Any other settings change needs an explicit
/// [`Camera::update_projection_matrix`].
///
/// Matrices are left-handed and stored column-major, so their raw memory is
/// the transpose of the row-vector form and can be uploaded as-is.
#[derive(Debug, Clone)]
pub struct Camera {
    pose: Pose,
    settings: CameraSettings,
    mouse: MouseTracker,
    view: Mat4,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_parts(Pose::default(), CameraSettings::default())
    }
}

impl Camera {
    /// Camera at `start`, which also becomes the [`Camera::reset`] target.
    pub fn new(start: Pose, settings: CameraSettings) -> Result<Self, MathError> {
        settings.validate()?;
        Ok(Self::from_parts(start, settings))
    }

    pub fn looking(
        position: Vec3,
        orientation: Vec3,
        settings: CameraSettings,
    ) -> Result<Self, MathError> {
        Self::new(Pose::from_orientation(position, orientation), settings)
    }

    fn from_parts(pose: Pose, settings: CameraSettings) -> Self {
        let mut camera = Self {
            pose,
            settings,
            mouse: MouseTracker::new(),
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_view_matrix();
        camera.update_projection_matrix();
        camera
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Mutable settings. Changes reach the projection only after
    /// [`Camera::update_projection_matrix`].
    pub fn settings_mut(&mut self) -> &mut CameraSettings {
        &mut self.settings
    }

    pub fn mouse(&self) -> &MouseTracker {
        &self.mouse
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position()
    }

    pub fn orientation(&self) -> Vec3 {
        self.pose.orientation()
    }

    pub fn heading(&self) -> UnitVector {
        self.pose.heading()
    }

    pub fn up(&self) -> UnitVector {
        self.pose.up()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.settings.aspect_ratio()
    }

    /// Cached view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Cached projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Look-to view matrix for the current position, heading and up.
    pub fn calculate_view_matrix(&self) -> Mat4 {
        Mat4::look_to_lh(
            self.pose.position(),
            self.pose.heading().get(),
            self.pose.up().get(),
        )
    }

    /// Perspective matrix for the current settings.
    pub fn calculate_projection_matrix(&self) -> Mat4 {
        let s = &self.settings;
        Mat4::perspective_lh(s.fov_radians(), s.aspect_ratio(), s.near(), s.far())
    }

    pub fn update_view_matrix(&mut self) {
        self.view = self.calculate_view_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection = self.calculate_projection_matrix();
    }

    /// Resize the viewport and refresh the projection.
    pub fn set_dimensions(&mut self, width: f32, height: f32) -> Result<(), MathError> {
        self.settings.set_dimensions(width, height)?;
        self.update_projection_matrix();
        tracing::debug!(width, height, aspect = self.aspect_ratio(), "camera resized");
        Ok(())
    }

    pub fn set_field_of_view(&mut self, fraction: f32) -> Result<(), MathError> {
        self.settings.set_field_of_view(fraction)
    }

    pub fn set_clipping_planes(&mut self, near: f32, far: f32) -> Result<(), MathError> {
        self.settings.set_clipping_planes(near, far)
    }

    /// Apply `speed` once, as if one second had passed.
    pub fn update_position(&mut self, speed: Vec3, scope: CommandScope) {
        self.update_position_scaled(1.0, speed, scope);
    }

    /// Apply `speed * dt` to the position: Absolute sets it, Relative moves
    /// by it, Ignore does nothing. A zero speed leaves the position alone.
    pub fn update_position_scaled(&mut self, dt: f32, speed: Vec3, scope: CommandScope) {
        if speed != Vec3::ZERO {
            let delta = speed * dt;
            match scope {
                CommandScope::Absolute => self.pose.set_position(delta),
                CommandScope::Relative => self.pose.translate(delta),
                CommandScope::Ignore => {}
            }
        }
        self.update_view_matrix();
    }

    /// Apply an Euler `(yaw, pitch, roll)` speed once.
    pub fn update_rotation(&mut self, speed: Vec3, scope: CommandScope) {
        self.update_rotation_scaled(1.0, speed, scope);
    }

    /// Apply `speed * dt` to the Euler orientation: Absolute sets it,
    /// Relative adds to it, Ignore does nothing. A non-finite step is
    /// dropped and the orientation kept.
    pub fn update_rotation_scaled(&mut self, dt: f32, speed: Vec3, scope: CommandScope) {
        if speed != Vec3::ZERO {
            let delta = speed * dt;
            let applied = match scope {
                CommandScope::Absolute => self.pose.set_orientation(delta),
                CommandScope::Relative => self.pose.rotate(delta),
                CommandScope::Ignore => Ok(()),
            };
            if let Err(e) = applied {
                tracing::warn!(?delta, "dropping camera rotation: {e}");
            }
        }
        self.update_view_matrix();
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.pose.translate_along(self.pose.heading(), distance);
        self.update_view_matrix();
    }

    pub fn move_right(&mut self, distance: f32) {
        self.pose.translate_along(self.pose.right(), distance);
        self.update_view_matrix();
    }

    pub fn move_up(&mut self, distance: f32) {
        self.pose.translate_along(self.pose.up(), distance);
        self.update_view_matrix();
    }

    /// Back to the start pose, with both matrices refreshed.
    pub fn reset(&mut self) {
        self.pose.reset();
        self.update_view_matrix();
        self.update_projection_matrix();
        tracing::debug!(position = ?self.position(), "camera reset");
    }

    /// Make the current pose the reset target.
    pub fn snapshot(&mut self) {
        self.pose.snapshot();
    }

    /// Feed one cursor sample from the host.
    pub fn update_mouse(&mut self, button_down: bool, x: f32, y: f32) {
        self.mouse.update(button_down, Vec2::new(x, y));
    }
}
