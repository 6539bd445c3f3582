use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, HtmlCanvasElement, WebGl2RenderingContext as GL, Window};

use super::dom::{DomContainer, PerformanceClock};
use super::post::{self, PostChain};
use super::render::{fit_canvas, SceneRenderer};
use super::{gui, input};
use crate::bootstrap::{launch, Container, Launch};
use crate::clock::Clock;
use crate::config::DemoConfig;
use crate::demos;
use crate::error::DemoError;
use crate::stage::Stage;

/// Everything the frame, resize and input callbacks share.
pub struct App {
    pub stage: Stage,
    gl: GL,
    canvas: HtmlCanvasElement,
    container: DomContainer,
    scene: SceneRenderer,
    post: Option<PostChain>,
    clock: Clock<PerformanceClock>,
}

impl App {
    fn frame(&mut self) -> Result<(), DemoError> {
        let delta = self.clock.delta();
        let plan = self.stage.advance(delta);
        post::execute(&self.gl, &plan, &self.stage, &self.scene, self.post.as_ref())
    }

    fn resize(&mut self) -> Result<(), DemoError> {
        let viewport = self.container.viewport();
        fit_canvas(&self.canvas, &viewport)?;
        self.stage.resize(viewport);
        if let Some(post) = self.post.as_mut() {
            post.resize(&self.gl, viewport.drawing_buffer())?;
        }
        Ok(())
    }
}

pub fn start(window: &Window, document: &Document, mut config: DemoConfig) -> Result<(), DemoError> {
    let performance = window
        .performance()
        .ok_or_else(|| DemoError::Dom("performance API unavailable".into()))?;
    if config.glitch_seed.is_none() {
        config.glitch_seed = Some(performance.now().to_bits());
    }

    let mut container = DomContainer::find(window, document, &config);
    let canvas = match launch(container.as_mut(), &config.container_id)? {
        Launch::Ready(canvas) => canvas,
        Launch::Fallback => return Ok(()),
    };
    let container =
        container.ok_or_else(|| DemoError::ContainerNotFound(config.container_id.clone()))?;

    let gl = canvas
        .get_context("webgl2")?
        .ok_or(DemoError::WebGl2Unavailable)?
        .dyn_into::<GL>()
        .map_err(|_| DemoError::WebGl2Unavailable)?;

    let viewport = container.viewport();
    fit_canvas(&canvas, &viewport)?;
    let mut stage = demos::build(&config, viewport);
    let scene = SceneRenderer::new(&gl, &stage.scene)?;
    let post = if stage.composer.needs_targets() {
        Some(PostChain::new(&gl, &mut stage, viewport.drawing_buffer())?)
    } else {
        None
    };

    let has_controls = stage.controls.is_some();
    let app = Rc::new(RefCell::new(App {
        stage,
        gl,
        canvas: canvas.clone(),
        container,
        scene,
        post,
        clock: Clock::new(PerformanceClock(performance)),
    }));

    // Keep the camera and back-buffer in sync with the container.
    let on_resize = {
        let app = app.clone();
        Closure::wrap(Box::new(move || {
            if let Err(err) = app.borrow_mut().resize() {
                log::error!("resize failed: {err}");
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    if has_controls {
        input::attach(window, &canvas, &app)?;
    }
    gui::mount(document, &app)?;

    log::info!("demo `{}` running", config.demo);
    animate(app)
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Drive `App::frame` from `requestAnimationFrame`.
fn animate(app: Rc<RefCell<App>>) -> Result<(), DemoError> {
    // `f` holds the animation-frame closure so that it can reschedule
    // itself; it is filled in after the closure is created.
    let f: FrameSlot = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Err(err) = app.borrow_mut().frame() {
            log::error!("frame failed: {err}");
        }
        if let Err(err) = request_frame(&f) {
            log::error!("could not schedule next frame: {err}");
        }
    }) as Box<dyn FnMut()>));

    request_frame(&g)
}

fn request_frame(slot: &FrameSlot) -> Result<(), DemoError> {
    let window = web_sys::window().ok_or_else(|| DemoError::Dom("no window".into()))?;
    if let Some(closure) = slot.borrow().as_ref() {
        window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    }
    Ok(())
}
