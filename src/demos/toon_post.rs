use glam::Vec3;

use crate::actor::{Actor, Outline, Spin};
use crate::composer::{Composer, FilmGrain, PassKind};
use crate::config::DemoConfig;
use crate::controls::OrbitControls;
use crate::geometry::Geometry;
use crate::glitch::GlitchState;
use crate::material::{Color, Material};
use crate::params::{Flag, ParamPanel};
use crate::scene::{AmbientLight, DirectionalLight, Scene};
use crate::stage::Stage;
use crate::viewport::Viewport;

pub(super) fn build(config: &DemoConfig, viewport: Viewport) -> Stage {
    let mut scene = Scene {
        ambient: AmbientLight {
            color: Color::WHITE,
            intensity: 0.4,
        },
        directional: Some(DirectionalLight {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vec3::new(3.0, 5.0, 4.0),
            target: Vec3::ZERO,
        }),
        background: Color::from_hex(0x202028),
        ..Scene::default()
    };

    let torus = scene.add_geometry(Geometry::torus(1.0, 0.4, 16, 64));
    scene.add(
        Actor::new(
            torus,
            Material::Toon {
                color: Color::from_hex(0x049ef4),
            },
        )
        .with_spin(Spin::new(0.5, 1.0))
        .with_outline(Outline::default()),
    );

    let mut composer = Composer::new();
    composer.add_pass(PassKind::Scene);
    let film_grain = composer.add_pass(PassKind::FilmGrain(FilmGrain::new(
        config.film_grain_strength,
        config.film_grain_speed,
    )));
    let seed = config.glitch_seed.unwrap_or(super::DEFAULT_GLITCH_SEED);
    let glitch = composer.add_pass(PassKind::Glitch(GlitchState::new(seed)));
    composer.add_pass(PassKind::Output);

    let mut stage = Stage::new(scene, super::default_camera(&viewport), viewport);
    stage.controls = Some(OrbitControls::new(&stage.camera));
    stage.composer = composer;
    stage.film_grain = Some(film_grain);
    stage.glitch = Some(glitch);
    stage.panel = ParamPanel::new()
        .with(Flag::ToonOutline, true)
        .with(Flag::FilmGrain, true)
        .with(Flag::Glitch, true);
    stage
}
