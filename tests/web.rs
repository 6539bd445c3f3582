#![cfg(target_arch = "wasm32")]

use scene_demos::bootstrap::{launch, Container, Launch, FALLBACK_ID, FALLBACK_MESSAGE};
use scene_demos::wasm::dom::{self, DomContainer};
use scene_demos::{DemoConfig, DemoKind};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement, Window};

wasm_bindgen_test_configure!(run_in_browser);

fn page() -> (Window, Document) {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    (window, document)
}

fn sized_div(document: &Document, id: &str, width: u32, height: u32) -> HtmlElement {
    let div = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    div.set_id(id);
    let style = div.style();
    style.set_property("width", &format!("{width}px")).unwrap();
    style.set_property("height", &format!("{height}px")).unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

fn config_for(id: &str) -> DemoConfig {
    DemoConfig {
        container_id: id.to_string(),
        ..DemoConfig::default()
    }
}

#[wasm_bindgen_test]
fn launch_mounts_exactly_one_canvas() {
    let (window, document) = page();
    let div = sized_div(&document, "launch-target", 800, 600);
    let config = config_for("launch-target");

    let mut container = DomContainer::find(&window, &document, &config);
    assert!(container.is_some());
    assert_eq!(container.as_ref().unwrap().client_size(), (800, 600));

    match launch(container.as_mut(), &config.container_id).unwrap() {
        Launch::Ready(canvas) => {
            assert_eq!(div.child_element_count(), 1);
            let child = div.first_element_child().unwrap();
            assert_eq!(child.tag_name().to_lowercase(), "canvas");
            assert!(canvas.is_same_node(Some(child.as_ref())));
            let aspect = container.as_ref().unwrap().viewport().aspect().unwrap();
            assert!((aspect - 800.0 / 600.0).abs() < 1e-3);
        }
        Launch::Fallback => {
            // only a browser without WebGL2 lands here
            assert!(!dom::webgl2_available(&window, &document));
            assert_eq!(div.child_element_count(), 1);
            assert!(document.get_element_by_id(FALLBACK_ID).is_some());
        }
    }

    div.remove();
}

#[wasm_bindgen_test]
fn fallback_replaces_the_canvas() {
    let (window, document) = page();
    let div = sized_div(&document, "fallback-target", 400, 300);
    let config = config_for("fallback-target");

    let mut container = DomContainer::find(&window, &document, &config).unwrap();
    container.mount_fallback(FALLBACK_MESSAGE).unwrap();

    assert_eq!(div.child_element_count(), 1);
    let message = document.get_element_by_id(FALLBACK_ID).unwrap();
    assert_eq!(message.text_content().as_deref(), Some(FALLBACK_MESSAGE));
    assert_eq!(div.get_elements_by_tag_name("canvas").length(), 0);

    div.remove();
}

#[wasm_bindgen_test]
fn missing_container_is_reported() {
    let (window, document) = page();
    let config = config_for("no-such-element");
    let mut container = DomContainer::find(&window, &document, &config);
    assert!(container.is_none());
    assert!(launch(container.as_mut(), &config.container_id).is_err());
}

#[wasm_bindgen_test]
fn capability_check_matches_the_browser() {
    let (window, document) = page();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    let native = matches!(canvas.get_context("webgl2"), Ok(Some(_)));
    assert_eq!(dom::webgl2_available(&window, &document), native);
}

#[wasm_bindgen_test]
fn data_demo_attribute_feeds_the_config() {
    let (window, document) = page();
    let div = sized_div(&document, "container", 200, 100);
    div.set_attribute("data-demo", "toon-post").unwrap();

    // the test page carries no query string, so the attribute wins
    let config = dom::load_config(&window, &document);
    assert_eq!(config.demo, DemoKind::ToonPost);

    div.remove();
}
