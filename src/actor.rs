//! Actors: a mesh placed in the scene with an optional per-frame spin.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::material::{Color, Material};

/// Index of a geometry in [`crate::scene::Scene::geometries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// Constant angular velocity around X and Y, in radians per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin(pub Vec2);

impl Spin {
    pub fn new(x: f32, y: f32) -> Self {
        Spin(Vec2::new(x, y))
    }
}

/// Inverted-hull outline drawn behind the actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub visible: bool,
    pub thickness: f32,
    pub color: Color,
}

impl Default for Outline {
    fn default() -> Self {
        Self {
            visible: true,
            thickness: 0.03,
            color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Actor {
    pub geometry: GeometryId,
    pub material: Material,
    pub transform: Transform,
    pub spin: Option<Spin>,
    pub outline: Option<Outline>,
}

impl Actor {
    pub fn new(geometry: GeometryId, material: Material) -> Self {
        Self {
            geometry,
            material,
            transform: Transform::default(),
            spin: None,
            outline: None,
        }
    }

    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = Some(spin);
        self
    }

    pub fn with_outline(mut self, outline: Outline) -> Self {
        self.outline = Some(outline);
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Per-frame hook.
    pub fn update(&mut self, delta: f32) {
        if let Some(Spin(velocity)) = self.spin {
            self.transform.rotation.x += velocity.x * delta;
            self.transform.rotation.y += velocity.y * delta;
        }
    }

    pub fn set_outline_visible(&mut self, visible: bool) {
        if let Some(outline) = self.outline.as_mut() {
            outline.visible = visible;
        }
    }

    pub fn visible_outline(&self) -> Option<&Outline> {
        self.outline.as_ref().filter(|outline| outline.visible)
    }
}
