//! Orbit camera and its uniform

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;

/// Pitch stays short of the poles so `look_at` keeps a valid up vector
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Camera data as laid out in the `Camera` WGSL struct
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub light_position: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0, 0.0, 0.0, 1.0],
            light_position: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Camera orbiting a target point at a fixed distance
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation about +Y, zero looking down -Z
    pub yaw: f32,
    pub pitch: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl OrbitCamera {
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let target = Vec3::from(config.target);
        let offset = Vec3::from(config.eye) - target;
        let distance = offset.length().max(config.near_plane);
        let (yaw, pitch) = if offset.length_squared() > 0.0 {
            let dir = offset / offset.length();
            (dir.x.atan2(dir.z), dir.y.clamp(-1.0, 1.0).asin())
        } else {
            (0.0, 0.0)
        };

        Self {
            target,
            distance,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            fov_degrees: config.fov_degrees,
            near: config.near_plane,
            far: config.far_plane,
            aspect,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Rotate around the target by (yaw, pitch) radians
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x;
        self.pitch = (self.pitch - delta.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn update_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.proj() * self.view()
    }

    /// Uniform with the light placed at `eye + light_offset`
    pub fn uniform(&self, light_offset: Vec3) -> CameraUniform {
        let view = self.view();
        let proj = self.proj();
        let eye = self.eye();
        CameraUniform {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            view_proj: (proj * view).to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
            light_position: (eye + light_offset).extend(1.0).to_array(),
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_default_eye_matches_config() {
        let camera = OrbitCamera::default();
        let eye = camera.eye();
        assert_relative_eq!(eye.x, 10.0, epsilon = 1e-4);
        assert_relative_eq!(eye.y, 10.0, epsilon = 1e-4);
        assert_relative_eq!(eye.z, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = OrbitCamera::default();
        let clip = camera.view_proj() * camera.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_orbit_keeps_distance_and_clamps_pitch() {
        let mut camera = OrbitCamera::default();
        let distance = camera.eye().distance(camera.target);

        camera.orbit(Vec2::new(0.7, 0.0));
        assert_relative_eq!(camera.eye().distance(camera.target), distance, epsilon = 1e-4);

        camera.orbit(Vec2::new(0.0, -10.0));
        assert_relative_eq!(camera.pitch, PITCH_LIMIT);
        assert!(camera.view().is_finite());
    }

    #[test]
    fn test_light_follows_eye() {
        let camera = OrbitCamera::default();
        let uniform = camera.uniform(Vec3::new(-5.0, 0.0, 0.0));
        assert_relative_eq!(uniform.light_position[0], uniform.eye[0] - 5.0);
        assert_relative_eq!(uniform.light_position[1], uniform.eye[1]);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 224);
    }
}
