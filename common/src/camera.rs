//! Camera pose with orbital controls

use glam::{DMat4, DVec3};

/// Closest the free zoom control may bring the camera to its target
pub const MIN_ZOOM_DISTANCE: f64 = 0.05;

/// Pitch limit for free orbiting, just shy of straight up/down
pub const MAX_PITCH: f64 = 1.5;

/// 3D perspective camera orbiting a look-at target
#[derive(Debug, Clone, PartialEq)]
pub struct Camera3D {
    pub position: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    pub fov: f64,
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera3D {
    pub fn new(aspect_ratio: f64) -> Self {
        let mut camera = Self {
            position: DVec3::ZERO,
            target: DVec3::ZERO,
            up: DVec3::Y,
            fov: 45.0f64.to_radians(),
            aspect_ratio,
            near: 0.01,
            far: 100_000.0,
        };
        camera.place_orbital(10.0, 0.0, 0.3);
        camera
    }

    /// Camera at `position` looking at `target`
    pub fn looking_at(position: DVec3, target: DVec3, aspect_ratio: f64) -> Self {
        Self {
            position,
            target,
            ..Self::new(aspect_ratio)
        }
    }

    /// Vector from the target to the camera
    pub fn offset(&self) -> DVec3 {
        self.position - self.target
    }

    pub fn distance(&self) -> f64 {
        self.offset().length()
    }

    /// Yaw and pitch of the camera around its target, in radians
    pub fn angles(&self) -> (f64, f64) {
        let offset = self.offset();
        let distance = offset.length();
        if distance <= f64::EPSILON {
            return (0.0, 0.0);
        }
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        (yaw, pitch)
    }

    fn place_orbital(&mut self, distance: f64, yaw: f64, pitch: f64) {
        self.position = self.target
            + DVec3::new(
                distance * pitch.cos() * yaw.sin(),
                distance * pitch.sin(),
                distance * pitch.cos() * yaw.cos(),
            );
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f64, delta_pitch: f64) {
        let (yaw, pitch) = self.angles();
        let distance = self.distance();
        self.place_orbital(
            distance,
            yaw + delta_yaw,
            (pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH),
        );
    }

    /// Zoom in/out
    pub fn zoom(&mut self, delta: f64) {
        let (yaw, pitch) = self.angles();
        let distance = (self.distance() - delta).max(MIN_ZOOM_DISTANCE);
        self.place_orbital(distance, yaw, pitch);
    }

    /// Move camera and target together
    pub fn translate(&mut self, delta: DVec3) {
        self.position += delta;
        self.target += delta;
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Get the combined view-projection matrix
    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f64) {
        self.aspect_ratio = aspect_ratio;
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera_3d(camera: &Camera3D) -> Self {
        let position = camera.position.as_vec3();
        Self {
            view_proj: camera.view_projection().as_mat4().to_cols_array_2d(),
            position: [position.x, position.y, position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_keeps_distance_to_target() {
        let mut camera = Camera3D::looking_at(DVec3::new(0.0, 3.0, 4.0), DVec3::ZERO, 1.5);
        camera.orbit(0.7, -0.2);
        assert!((camera.distance() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn pitch_is_clamped_short_of_the_pole() {
        let mut camera = Camera3D::new(1.0);
        camera.orbit(0.0, 10.0);
        let (_, pitch) = camera.angles();
        assert!((pitch - MAX_PITCH).abs() < 1e-9);
    }

    #[test]
    fn zoom_never_reaches_the_target() {
        let mut camera = Camera3D::new(1.0);
        camera.zoom(1_000.0);
        assert!((camera.distance() - MIN_ZOOM_DISTANCE).abs() < 1e-9);
    }

    #[test]
    fn translate_moves_pose_rigidly() {
        let mut camera = Camera3D::new(1.0);
        let before = camera.offset();
        camera.translate(DVec3::new(1.0, -2.0, 3.0));
        assert_eq!(camera.target, DVec3::new(1.0, -2.0, 3.0));
        assert!((camera.offset() - before).length() < 1e-12);
    }
}
