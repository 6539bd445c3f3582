//! Orbit camera controls.
//!
//! Dragging rotates the camera around a target on a sphere, a secondary drag
//! pans the target in the view plane, and the wheel or a pinch dollies in
//! and out. Input handlers only queue deltas, [`OrbitControls::update`]
//! applies them once per frame.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::camera::PerspectiveCamera;

const EPS: f32 = 1e-6;

/// Spherical coordinates with Y up. `phi` is the polar angle from +Y,
/// `theta` the azimuth around Y measured from +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius < EPS {
            return Self {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

pub struct OrbitControls {
    pub target: Vec3,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    spherical: Spherical,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
}

impl OrbitControls {
    pub fn new(camera: &PerspectiveCamera) -> Self {
        Self {
            target: camera.target,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            enable_damping: false,
            damping_factor: 0.05,
            spherical: Spherical::from_offset(camera.position - camera.target),
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }

    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    /// Queue a drag of `dx`/`dy` CSS pixels over an element `height` tall.
    /// A drag across the full height is one full turn.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, height: f32) {
        if height <= 0.0 {
            return;
        }
        self.delta_theta -= TAU * dx / height * self.rotate_speed;
        self.delta_phi -= TAU * dy / height * self.rotate_speed;
    }

    /// Queue a wheel step. Positive `delta_y` (scrolling down) moves away.
    pub fn dolly(&mut self, delta_y: f32) {
        let step = 0.95f32.powf(self.zoom_speed);
        if delta_y > 0.0 {
            self.scale /= step;
        } else if delta_y < 0.0 {
            self.scale *= step;
        }
    }

    /// Queue a pan drag of `dx`/`dy` CSS pixels over an element `height`
    /// tall. The point under the cursor at the target's depth follows the
    /// pointer: dragging right moves the target left along the camera's
    /// right vector, dragging down moves it up along the camera's up vector.
    pub fn pan_by_pixels(&mut self, dx: f32, dy: f32, height: f32, camera: &PerspectiveCamera) {
        if height <= 0.0 {
            return;
        }
        let offset = camera.position - self.target;
        // half the visible height at the target's distance
        let half_height = offset.length() * (camera.fov.to_radians() / 2.0).tan();
        let scale = 2.0 * half_height / height * self.pan_speed;

        let forward = (self.target - camera.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(camera.up).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        self.pan_offset += -right * dx * scale + up * dy * scale;
    }

    /// Queue a pinch. `ratio` is the previous finger spread over the current
    /// one, so spreading the fingers (`ratio < 1`) moves in.
    pub fn dolly_by_ratio(&mut self, ratio: f32) {
        if ratio.is_finite() && ratio > 0.0 {
            self.scale *= ratio.powf(self.zoom_speed);
        }
    }

    /// Apply queued input to the camera. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;

        let mut spherical = Spherical::from_offset(camera.position - self.target);
        let (theta, phi, pan) = if self.enable_damping {
            (
                self.delta_theta * self.damping_factor,
                self.delta_phi * self.damping_factor,
                self.pan_offset * self.damping_factor,
            )
        } else {
            (self.delta_theta, self.delta_phi, self.pan_offset)
        };
        spherical.theta += theta;
        spherical.phi = (spherical.phi + phi).clamp(EPS, PI - EPS);
        spherical.radius =
            (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += pan;
        camera.position = self.target + spherical.to_offset();
        camera.target = self.target;
        self.spherical = spherical;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.position.distance_squared(before) > EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0).placed_at(Vec3::new(0.0, 0.0, 5.0))
    }

    #[test]
    fn idle_update_leaves_camera_alone() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(&cam);
        assert!(!controls.update(&mut cam));
        assert!((cam.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn half_height_drag_is_half_a_turn() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(&cam);
        controls.rotate_by_pixels(300.0, 0.0, 600.0);
        assert!(controls.update(&mut cam));
        assert!((cam.position - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-4);
        assert!((controls.distance() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(&cam);
        controls.rotate_by_pixels(0.0, 10_000.0, 600.0);
        controls.update(&mut cam);
        assert!(cam.position.is_finite());
        assert!((cam.position.y - 5.0).abs() < 0.01);
        assert!(cam.position.y <= 5.0);
    }

    #[test]
    fn wheel_dollies_within_limits() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(&cam);
        controls.max_distance = 5.2;
        controls.dolly(-1.0);
        controls.update(&mut cam);
        assert!((controls.distance() - 4.75).abs() < 1e-4);
        controls.dolly(1.0);
        controls.dolly(1.0);
        controls.update(&mut cam);
        assert!((controls.distance() - 5.2).abs() < 1e-4);
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(&cam);
        controls.pan_by_pixels(100.0, 60.0, 600.0, &cam);
        assert!(controls.update(&mut cam));

        let half_height = 5.0 * (75.0f32.to_radians() / 2.0).tan();
        let per_pixel = 2.0 * half_height / 600.0;
        let expected = Vec3::new(-100.0 * per_pixel, 60.0 * per_pixel, 0.0);
        assert!((controls.target - expected).length() < 1e-4);
        assert!((cam.target - expected).length() < 1e-4);
        // orbit offset is untouched
        assert!((cam.position - cam.target - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
        assert!((controls.distance() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn pan_is_consumed_once() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(&cam);
        controls.pan_by_pixels(30.0, 0.0, 600.0, &cam);
        controls.update(&mut cam);
        let target = controls.target;
        assert!(!controls.update(&mut cam));
        assert_eq!(controls.target, target);
    }

    #[test]
    fn pinch_spread_moves_in() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(&cam);
        // fingers went from 100px to 200px apart
        controls.dolly_by_ratio(100.0 / 200.0);
        controls.update(&mut cam);
        assert!((controls.distance() - 2.5).abs() < 1e-4);
        controls.dolly_by_ratio(0.0);
        assert!(!controls.update(&mut cam));
    }

    #[test]
    fn damping_eases_towards_rest() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(&cam);
        controls.enable_damping = true;
        controls.rotate_by_pixels(60.0, 0.0, 600.0);
        assert!(controls.update(&mut cam));
        let first = cam.position;
        assert!(controls.update(&mut cam));
        assert_ne!(first, cam.position);
    }
}
