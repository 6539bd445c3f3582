use crate::actor::{Actor, Spin};
use crate::geometry::Geometry;
use crate::material::{Color, Material};
use crate::scene::Scene;
use crate::stage::Stage;
use crate::viewport::Viewport;

pub(super) fn build(viewport: Viewport) -> Stage {
    let mut scene = Scene::default();
    let cube = scene.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0));
    scene.add(
        Actor::new(cube, Material::basic(Color::from_hex(0x00ff00))).with_spin(Spin::new(1.0, 1.0)),
    );

    Stage::new(scene, super::default_camera(&viewport), viewport)
}
