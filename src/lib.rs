pub mod actor;
pub mod bootstrap;
pub mod camera;
pub mod clock;
pub mod composer;
pub mod config;
pub mod controls;
pub mod demos;
pub mod error;
pub mod geometry;
pub mod glitch;
pub mod material;
pub mod params;
pub mod scene;
pub mod stage;
pub mod viewport;

pub use config::DemoConfig;
pub use demos::DemoKind;
pub use error::{ConfigError, DemoError};
pub use stage::Stage;

// Only compile browser glue when targeting wasm32.

#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    mod app;
    pub mod dom;
    mod gui;
    mod input;
    mod post;
    mod render;
    mod shader;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Info) {
            log::debug!("logger already installed: {err}");
        }

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let config = dom::load_config(&window, &document);

        match app::start(&window, &document, config) {
            Ok(()) => Ok(()),
            // a missing container aborts quietly
            Err(crate::DemoError::ContainerNotFound(_)) => Ok(()),
            Err(err) => {
                log::error!("{err}");
                Err(err.into())
            }
        }
    }
}
