//! Perspective camera.

use glam::{Mat4, Vec3};

use crate::viewport::Viewport;

pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }

    /// Move the camera and keep looking at the origin.
    pub fn placed_at(mut self, position: Vec3) -> Self {
        self.position = position;
        self.target = Vec3::ZERO;
        self
    }

    /// Track the container's aspect ratio. A collapsed container keeps the
    /// previous ratio instead of producing an infinite projection.
    pub fn fit(&mut self, viewport: &Viewport) {
        if let Some(aspect) = viewport.aspect() {
            self.aspect = aspect;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_tracks_container_aspect() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.fit(&Viewport::new(1920, 1080, 1.0));
        assert_eq!(camera.aspect, 1920.0 / 1080.0);
        camera.fit(&Viewport::new(1920, 0, 1.0));
        assert_eq!(camera.aspect, 1920.0 / 1080.0);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = PerspectiveCamera::new(75.0, 4.0 / 3.0, 0.1, 1000.0)
            .placed_at(Vec3::new(0.0, 0.0, 5.0));
        let clip = camera.view_proj() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }
}
