//! Camera state, principal-axis orientation, and transition animation.

pub mod animation;
pub mod orientation;

use glam::{Mat4, Vec3};

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
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

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 150.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.6,
            fovy: 45.0,
            znear: 5.0,
            zfar: 2000.0,
        }
    }
}

impl Camera {
    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Get just the projection matrix for depth-aware overlay passes.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Unit direction the camera is facing (eye toward target).
    #[must_use]
    pub fn view_direction(&self) -> Vec3 {
        (self.target - self.eye).normalize_or(Vec3::NEG_Z)
    }

    /// Distance from eye to target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        (self.target - self.eye).length()
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_direction_is_unit_length() {
        let camera = Camera::default();
        assert!((camera.view_direction().length() - 1.0).abs() < 1e-6);
        assert_eq!(camera.view_direction(), Vec3::NEG_Z);
    }

    #[test]
    fn degenerate_view_direction_falls_back() {
        let mut camera = Camera::default();
        camera.target = camera.eye;
        assert_eq!(camera.view_direction(), Vec3::NEG_Z);
    }

    #[test]
    fn resize_ignores_zero_height() {
        let mut camera = Camera::default();
        camera.resize(800, 0);
        assert_eq!(camera.aspect, 1.6);
        camera.resize(800, 400);
        assert_eq!(camera.aspect, 2.0);
    }
}
