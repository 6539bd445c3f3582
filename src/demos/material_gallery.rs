use glam::Vec3;

use crate::actor::{Actor, Spin};
use crate::geometry::Geometry;
use crate::material::{Color, Material};
use crate::scene::{column_offsets, AmbientLight, DirectionalLight, Scene};
use crate::stage::Stage;
use crate::viewport::Viewport;

const SPACING: f32 = 1.25;

pub(super) fn build(viewport: Viewport) -> Stage {
    // Lights at full strength from straight above. The gallery was tuned
    // for ambient 0.5 and a key light at (0, 10, 0), but that is not what
    // it renders: its light setup is ignored and the defaults apply.
    let mut scene = Scene {
        ambient: AmbientLight {
            color: Color::WHITE,
            intensity: 1.0,
        },
        directional: Some(DirectionalLight {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vec3::Y,
            target: Vec3::ZERO,
        }),
        ..Scene::default()
    };

    let cube = scene.add_geometry(Geometry::cuboid(0.5, 0.5, 0.5));
    let materials = Material::gallery();
    for (material, y) in materials.into_iter().zip(column_offsets(materials.len(), SPACING)) {
        scene.add(
            Actor::new(cube, material)
                .at(Vec3::new(0.0, y, 0.0))
                .with_spin(Spin::new(1.0, 1.0)),
        );
    }

    Stage::new(scene, super::default_camera(&viewport), viewport)
}
