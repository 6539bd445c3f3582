//! Mouse and touch input routed to the orbit controls.
//!
//! Primary drag or one finger rotates; secondary drag, a modified primary
//! drag or two fingers pan; the wheel or a pinch dollies.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, HtmlCanvasElement, MouseEvent, TouchEvent, WheelEvent, Window};

use super::app::App;
use crate::error::DemoError;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Rotate { x: f32, y: f32 },
    Pan { x: f32, y: f32 },
    Pinch { x: f32, y: f32, spread: f32 },
}

impl Gesture {
    fn from_mouse(event: &MouseEvent) -> Option<Self> {
        let (x, y) = (event.client_x() as f32, event.client_y() as f32);
        let modified = event.shift_key() || event.ctrl_key() || event.meta_key();
        match event.button() {
            0 if modified => Some(Self::Pan { x, y }),
            0 => Some(Self::Rotate { x, y }),
            2 => Some(Self::Pan { x, y }),
            _ => None,
        }
    }

    fn from_touches(event: &TouchEvent) -> Option<Self> {
        let touches = event.touches();
        let point = |i| {
            touches
                .get(i)
                .map(|t| (t.client_x() as f32, t.client_y() as f32))
        };
        match touches.length() {
            1 => point(0).map(|(x, y)| Self::Rotate { x, y }),
            2 => {
                let ((ax, ay), (bx, by)) = (point(0)?, point(1)?);
                Some(Self::Pinch {
                    x: (ax + bx) / 2.0,
                    y: (ay + by) / 2.0,
                    spread: (ax - bx).hypot(ay - by),
                })
            }
            _ => None,
        }
    }
}

/// Feed the step from `from` to `to` into the controls.
fn apply(app: &RefCell<App>, height: f32, from: Gesture, to: Gesture) {
    let mut app = app.borrow_mut();
    let stage = &mut app.stage;
    let Some(controls) = stage.controls.as_mut() else {
        return;
    };
    match (from, to) {
        (Gesture::Rotate { x, y }, Gesture::Rotate { x: nx, y: ny }) => {
            controls.rotate_by_pixels(nx - x, ny - y, height);
        }
        (Gesture::Pan { x, y }, Gesture::Pan { x: nx, y: ny }) => {
            controls.pan_by_pixels(nx - x, ny - y, height, &stage.camera);
        }
        (
            Gesture::Pinch { x, y, spread },
            Gesture::Pinch {
                x: nx,
                y: ny,
                spread: nspread,
            },
        ) => {
            if nspread > 0.0 {
                controls.dolly_by_ratio(spread / nspread);
            }
            controls.pan_by_pixels(nx - x, ny - y, height, &stage.camera);
        }
        // finger count changed mid-gesture; the next move continues from here
        _ => {}
    }
}

fn listen<E: 'static>(
    target: &web_sys::EventTarget,
    name: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), DemoError>
where
    E: wasm_bindgen::convert::FromWasmAbi,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn attach(
    window: &Window,
    canvas: &HtmlCanvasElement,
    app: &Rc<RefCell<App>>,
) -> Result<(), DemoError> {
    // pointer state of the gesture in progress
    let gesture: Rc<Cell<Option<Gesture>>> = Rc::new(Cell::new(None));
    canvas.style().set_property("touch-action", "none")?;

    // right-drag pans, so keep the context menu off the canvas
    listen(canvas, "contextmenu", |event: Event| event.prevent_default())?;

    {
        let gesture = gesture.clone();
        listen(canvas, "mousedown", move |event: MouseEvent| {
            gesture.set(Gesture::from_mouse(&event));
        })?;
    }
    {
        let gesture = gesture.clone();
        let app = app.clone();
        let element = canvas.clone();
        listen(window, "mousemove", move |event: MouseEvent| {
            let Some(from) = gesture.get() else {
                return;
            };
            let (x, y) = (event.client_x() as f32, event.client_y() as f32);
            let to = match from {
                Gesture::Pan { .. } => Gesture::Pan { x, y },
                _ => Gesture::Rotate { x, y },
            };
            gesture.set(Some(to));
            apply(&app, element.client_height() as f32, from, to);
        })?;
    }
    {
        let gesture = gesture.clone();
        listen(window, "mouseup", move |_: MouseEvent| gesture.set(None))?;
    }
    {
        let app = app.clone();
        listen(canvas, "wheel", move |event: WheelEvent| {
            event.prevent_default();
            if let Some(controls) = app.borrow_mut().stage.controls.as_mut() {
                controls.dolly(event.delta_y() as f32);
            }
        })?;
    }

    {
        let gesture = gesture.clone();
        listen(canvas, "touchstart", move |event: TouchEvent| {
            event.prevent_default();
            gesture.set(Gesture::from_touches(&event));
        })?;
    }
    {
        let gesture = gesture.clone();
        let app = app.clone();
        let element = canvas.clone();
        listen(canvas, "touchmove", move |event: TouchEvent| {
            event.prevent_default();
            let to = Gesture::from_touches(&event);
            if let (Some(from), Some(to)) = (gesture.get(), to) {
                apply(&app, element.client_height() as f32, from, to);
            }
            gesture.set(to);
        })?;
    }
    for name in ["touchend", "touchcancel"] {
        let gesture = gesture.clone();
        listen(canvas, name, move |event: TouchEvent| {
            // lifting one of two fingers continues as a one-finger rotate
            gesture.set(Gesture::from_touches(&event));
        })?;
    }

    Ok(())
}
