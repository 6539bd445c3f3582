use glam::Vec3;

use crate::actor::{Actor, GeometryId};
use crate::geometry::Geometry;
use crate::material::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the surface towards the light.
    pub fn direction(&self) -> Vec3 {
        (self.position - self.target)
            .try_normalize()
            .unwrap_or(Vec3::Y)
    }
}

/// Root of everything drawn in a demo.
pub struct Scene {
    pub geometries: Vec<Geometry>,
    pub actors: Vec<Actor>,
    pub ambient: AmbientLight,
    pub directional: Option<DirectionalLight>,
    pub background: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            geometries: Vec::new(),
            actors: Vec::new(),
            ambient: AmbientLight {
                color: Color::WHITE,
                intensity: 0.0,
            },
            directional: None,
            background: Color::BLACK,
        }
    }
}

impl Scene {
    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() - 1)
    }

    pub fn add(&mut self, actor: Actor) -> usize {
        debug_assert!(actor.geometry.0 < self.geometries.len());
        self.actors.push(actor);
        self.actors.len() - 1
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0)
    }

    /// Run every actor's update hook, in insertion order.
    pub fn update(&mut self, delta: f32) {
        for actor in &mut self.actors {
            actor.update(delta);
        }
    }

    pub fn set_outlines_visible(&mut self, visible: bool) {
        for actor in &mut self.actors {
            actor.set_outline_visible(visible);
        }
    }
}

/// Vertical offsets for `count` items stacked top to bottom around y = 0,
/// `spacing` apart.
pub fn column_offsets(count: usize, spacing: f32) -> Vec<f32> {
    let top = spacing * count.saturating_sub(1) as f32 / 2.0;
    (0..count).map(|i| top - spacing * i as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Spin;
    use crate::material::Material;

    #[test]
    fn column_is_centred() {
        assert_eq!(column_offsets(5, 1.25), vec![2.5, 1.25, 0.0, -1.25, -2.5]);
        assert_eq!(column_offsets(1, 1.25), vec![0.0]);
        assert!(column_offsets(0, 1.25).is_empty());
    }

    #[test]
    fn update_reaches_every_actor() {
        let mut scene = Scene::default();
        let cube = scene.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0));
        for _ in 0..3 {
            scene.add(Actor::new(cube, Material::Normal).with_spin(Spin::new(1.0, 1.0)));
        }
        scene.update(0.5);
        assert!(scene
            .actors
            .iter()
            .all(|actor| actor.transform.rotation.x == 0.5 && actor.transform.rotation.y == 0.5));
    }

    #[test]
    fn light_direction_points_at_the_light() {
        let light = DirectionalLight {
            color: Color::WHITE,
            intensity: 0.5,
            position: Vec3::new(0.0, 10.0, 0.0),
            target: Vec3::ZERO,
        };
        assert_eq!(light.direction(), Vec3::Y);
    }
}
