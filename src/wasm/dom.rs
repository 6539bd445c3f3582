use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, Performance, UrlSearchParams, Window};

use crate::bootstrap::{Container, FALLBACK_ID};
use crate::clock::TimeSource;
use crate::config::DemoConfig;
use crate::error::DemoError;

/// `performance.now()` as a clock source.
pub struct PerformanceClock(pub Performance);

impl TimeSource for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.0.now()
    }
}

/// Build the config: defaults, then the container's `data-demo`, then the
/// URL query.
pub fn load_config(window: &Window, document: &Document) -> DemoConfig {
    DemoConfig::from_page(&query_pairs(window), |id| {
        document
            .get_element_by_id(id)
            .and_then(|element| element.get_attribute("data-demo"))
    })
}

fn query_pairs(window: &Window) -> Vec<(String, String)> {
    let Ok(search) = window.location().search() else {
        return Vec::new();
    };
    let Ok(params) = UrlSearchParams::new_with_str(&search) else {
        log::warn!("unreadable query string `{search}`");
        return Vec::new();
    };
    DemoConfig::KEYS
        .iter()
        .filter_map(|&key| params.get(key).map(|value| (key.to_string(), value)))
        .collect()
}

/// Ask a throwaway canvas for a WebGL2 context.
pub fn webgl2_available(window: &Window, document: &Document) -> bool {
    let has_api = js_sys::Reflect::has(window, &"WebGL2RenderingContext".into()).unwrap_or(false);
    if !has_api {
        return false;
    }
    document
        .create_element("canvas")
        .ok()
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        .is_some_and(|canvas| matches!(canvas.get_context("webgl2"), Ok(Some(_))))
}

pub struct DomContainer {
    window: Window,
    document: Document,
    element: HtmlElement,
    id: String,
    config: DemoConfig,
}

impl DomContainer {
    pub fn find(window: &Window, document: &Document, config: &DemoConfig) -> Option<Self> {
        let element = document
            .get_element_by_id(&config.container_id)?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(Self {
            window: window.clone(),
            document: document.clone(),
            element,
            id: config.container_id.clone(),
            config: config.clone(),
        })
    }
}

impl Container for DomContainer {
    type Surface = HtmlCanvasElement;

    fn id(&self) -> &str {
        &self.id
    }

    fn client_size(&self) -> (u32, u32) {
        (
            self.element.client_width().max(0) as u32,
            self.element.client_height().max(0) as u32,
        )
    }

    fn pixel_ratio(&self) -> f32 {
        self.config.pixel_ratio(self.window.device_pixel_ratio())
    }

    fn supports_webgl2(&self) -> bool {
        webgl2_available(&self.window, &self.document)
    }

    fn mount_surface(&mut self) -> Result<HtmlCanvasElement, DemoError> {
        let canvas = self
            .document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DemoError::Dom("created element is not a canvas".into()))?;
        canvas.style().set_property("display", "block")?;
        self.element.append_child(&canvas)?;
        Ok(canvas)
    }

    fn mount_fallback(&mut self, message: &str) -> Result<(), DemoError> {
        let node = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DemoError::Dom("created element is not an HTML element".into()))?;
        node.set_id(FALLBACK_ID);
        node.set_text_content(Some(message));
        let style = node.style();
        for (property, value) in [
            ("font-family", "monospace"),
            ("font-size", "13px"),
            ("text-align", "center"),
            ("background", "#fff"),
            ("color", "#000"),
            ("padding", "1.5em"),
            ("width", "400px"),
            ("margin", "5em auto 0"),
        ] {
            style.set_property(property, value)?;
        }
        self.element.append_child(&node)?;
        Ok(())
    }
}
