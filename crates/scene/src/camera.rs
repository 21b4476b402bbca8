use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use isleworld_input::Ray;
use isleworld_render::RenderView;

/// Fixed scene camera, read-only after mount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 25.0, 60.0),
            target: Vec3::new(0.0, 0.0, -10.0),
            fov_degrees: 60.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl CameraConfig {
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// World-space ray through a point in normalized device coordinates.
    pub fn screen_ray(&self, ndc: Vec2, aspect: f32) -> Option<Ray> {
        let inverse = self.view_projection(aspect).inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::through(near, far)
    }

    /// Normalized device coordinates of a world point, or `None` if it is
    /// behind the camera.
    pub fn project(&self, point: Vec3, aspect: f32) -> Option<Vec2> {
        let clip = self.view_projection(aspect) * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(Vec2::new(clip.x, clip.y) / clip.w)
    }

    pub fn view(&self) -> RenderView {
        RenderView {
            eye: self.position,
            target: self.target,
            fov_degrees: self.fov_degrees,
            near: self.near,
            far: self.far,
        }
    }
}
