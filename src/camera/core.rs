use glam::{Mat4, Vec3, Vec4};

use crate::{options::CameraOptions, transform::ClipProjection};

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix.
/// Must match `CameraUniform` in `modules/camera.wgsl`.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Camera {
    /// Camera configured from options with the given aspect ratio.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::from_array(options.eye),
            target: Vec3::from_array(options.target),
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }
}

impl ClipProjection for Camera {
    fn project(&self, world_from_local: Mat4, position: Vec4) -> Vec4 {
        self.build_matrix() * (world_from_local * position)
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    /// Uniform reflecting the given camera's current state.
    #[must_use]
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.build_matrix().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::from_options(&CameraOptions::default(), 1.0)
    }

    #[test]
    fn uniform_matches_wgsl_layout() {
        assert_eq!(size_of::<CameraUniform>(), 64);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let clip =
            camera().project(Mat4::IDENTITY, Vec4::new(0.0, 0.0, 0.0, 1.0));
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6, "got {ndc}");
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn uniform_carries_view_projection() {
        let camera = camera();
        let uniform = CameraUniform::from_camera(&camera);
        assert_eq!(
            Mat4::from_cols_array_2d(&uniform.view_proj),
            camera.build_matrix()
        );
    }
}
