//! Parameter panel: one checkbox per flag, pinned to the top-right corner.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, HtmlElement, HtmlInputElement};

use super::app::App;
use crate::error::DemoError;

fn element<T: JsCast>(document: &Document, tag: &str) -> Result<T, DemoError> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| DemoError::Dom(format!("<{tag}> has an unexpected type")))
}

pub fn mount(document: &Document, app: &Rc<RefCell<App>>) -> Result<(), DemoError> {
    let entries = app.borrow().stage.panel.entries().to_vec();
    if entries.is_empty() {
        return Ok(());
    }

    let panel: HtmlElement = element(document, "div")?;
    let style = panel.style();
    for (property, value) in [
        ("position", "fixed"),
        ("top", "0"),
        ("right", "15px"),
        ("padding", "6px 10px"),
        ("background", "#1f1f1f"),
        ("color", "#ebebeb"),
        ("font", "11px sans-serif"),
        ("display", "flex"),
        ("flex-direction", "column"),
        ("gap", "4px"),
    ] {
        style.set_property(property, value)?;
    }

    for (flag, value) in entries {
        let row: HtmlElement = element(document, "label")?;
        let input: HtmlInputElement = element(document, "input")?;
        input.set_type("checkbox");
        input.set_checked(value);
        row.append_child(&input)?;
        row.insert_adjacent_text("beforeend", flag.label())?;

        let on_change = {
            let app = app.clone();
            let input = input.clone();
            Closure::wrap(Box::new(move || {
                app.borrow_mut().stage.set_flag(flag, input.checked());
            }) as Box<dyn FnMut()>)
        };
        input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
        on_change.forget();

        panel.append_child(&row)?;
    }

    let body = document
        .body()
        .ok_or_else(|| DemoError::Dom("document has no body".into()))?;
    body.append_child(&panel)?;
    Ok(())
}
