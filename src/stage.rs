//! A running demo: scene, camera, post chain and controls, advanced once per
//! frame by the host loop.

use crate::camera::PerspectiveCamera;
use crate::composer::{Composer, FramePlan, PassId};
use crate::controls::OrbitControls;
use crate::params::{Flag, ParamPanel};
use crate::scene::Scene;
use crate::viewport::Viewport;

pub struct Stage {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub composer: Composer,
    pub controls: Option<OrbitControls>,
    pub panel: ParamPanel,
    pub film_grain: Option<PassId>,
    pub glitch: Option<PassId>,
    viewport: Viewport,
}

impl Stage {
    pub fn new(scene: Scene, camera: PerspectiveCamera, viewport: Viewport) -> Self {
        let mut stage = Self {
            scene,
            camera,
            composer: Composer::direct(),
            controls: None,
            panel: ParamPanel::new(),
            film_grain: None,
            glitch: None,
            viewport,
        };
        stage.resize(viewport);
        stage
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Keep the camera and the drawing buffer in step with the container.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.fit(&viewport);
    }

    /// Run update hooks and return the passes to draw this frame.
    pub fn advance(&mut self, delta: f32) -> FramePlan {
        self.scene.update(delta);
        if let Some(controls) = self.controls.as_mut() {
            controls.update(&mut self.camera);
        }
        self.composer.update(delta);
        self.composer.plan()
    }

    /// Apply a panel toggle. Takes effect from the next [`Stage::advance`].
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        if !self.panel.set(flag, value) {
            log::warn!("flag {} is not part of this demo", flag.label());
            return;
        }
        match flag {
            Flag::ToonOutline => self.scene.set_outlines_visible(value),
            Flag::FilmGrain => {
                if let Some(id) = self.film_grain {
                    self.composer.set_enabled(id, value);
                }
            }
            Flag::Glitch => {
                if let Some(id) = self.glitch {
                    self.composer.set_enabled(id, value);
                }
            }
        }
    }
}
