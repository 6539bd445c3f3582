//! The demo catalogue.

use std::fmt;
use std::str::FromStr;

use crate::camera::PerspectiveCamera;
use crate::config::DemoConfig;
use crate::error::ConfigError;
use crate::stage::Stage;
use crate::viewport::Viewport;

mod material_gallery;
mod simple_scene;
mod toon_post;

/// Seed used by the glitch pass when the config does not provide one.
pub const DEFAULT_GLITCH_SEED: u64 = 0x5eed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoKind {
    /// One spinning unlit cube.
    SimpleScene,
    /// A column of cubes, one per material variant.
    MaterialGallery,
    /// Toon torus behind film grain and glitch passes.
    ToonPost,
}

impl DemoKind {
    pub const ALL: [DemoKind; 3] = [
        DemoKind::SimpleScene,
        DemoKind::MaterialGallery,
        DemoKind::ToonPost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DemoKind::SimpleScene => "simple-scene",
            DemoKind::MaterialGallery => "material-gallery",
            DemoKind::ToonPost => "toon-post",
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DemoKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DemoKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownDemo(s.to_string()))
    }
}

/// Camera shared by every demo: 75 degree fov, five units back on +Z.
pub(crate) fn default_camera(viewport: &Viewport) -> PerspectiveCamera {
    PerspectiveCamera::new(75.0, viewport.aspect().unwrap_or(1.0), 0.1, 1000.0)
        .placed_at(glam::Vec3::new(0.0, 0.0, 5.0))
}

/// Build the stage for the configured demo.
pub fn build(config: &DemoConfig, viewport: Viewport) -> Stage {
    log::info!("building demo `{}`", config.demo);
    match config.demo {
        DemoKind::SimpleScene => simple_scene::build(viewport),
        DemoKind::MaterialGallery => material_gallery::build(viewport),
        DemoKind::ToonPost => toon_post::build(config, viewport),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_round_trip_through_their_names() {
        for kind in DemoKind::ALL {
            assert_eq!(kind.to_string().parse::<DemoKind>(), Ok(kind));
        }
        assert_eq!("Toon-Post".parse::<DemoKind>(), Ok(DemoKind::ToonPost));
        assert!(matches!(
            "teapot".parse::<DemoKind>(),
            Err(ConfigError::UnknownDemo(_))
        ));
    }
}
