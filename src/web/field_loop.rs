//! Background particle field bound to a canvas
//!
//! One `requestAnimationFrame` chain drives [`Simulation::tick`]. The chain,
//! the pointer listener and the resize listener all belong to
//! [`FieldRunner`]; cancelling or dropping it tears everything down.

use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::canvas::CanvasSurface;
use super::dom::{self, js_err, Listener};
use crate::core::{FieldConfig, FrameStats, FxError, Result, Simulation};

const CANVAS_ID: &str = "bg-canvas";

struct LoopState {
    sim: Simulation,
    surface: CanvasSurface,
    /// Pending animation frame request
    handle: Option<i32>,
    running: bool,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct FieldRunner {
    state: Rc<RefCell<LoopState>>,
    frame_cb: FrameCallback,
    #[allow(dead_code)]
    listeners: Vec<Listener>,
}

impl FieldRunner {
    /// Find or create the background canvas and start animating
    pub fn start(config: FieldConfig) -> Result<Self> {
        let window = dom::window()?;
        let canvas = background_canvas()?;
        let mut surface = CanvasSurface::new(canvas)?;

        let (width, height) = dom::viewport_size(&window);
        surface.resize(width, height)?;
        let sim = Simulation::new(config, width, height);

        let state = Rc::new(RefCell::new(LoopState {
            sim,
            surface,
            handle: None,
            running: true,
        }));

        // Pointer position feeds repulsion on the next frame
        let state_clone = state.clone();
        let on_move = Listener::new(&window, "mousemove", move |e| {
            if let Some(e) = e.dyn_ref::<MouseEvent>() {
                state_clone
                    .borrow_mut()
                    .sim
                    .pointer_moved(e.client_x() as f64, e.client_y() as f64);
            }
        })?;

        let state_clone = state.clone();
        let on_resize = Listener::new(&window, "resize", move |_| {
            let Ok(window) = dom::window() else { return };
            let (width, height) = dom::viewport_size(&window);
            let mut s = state_clone.borrow_mut();
            if let Err(e) = s.surface.resize(width, height) {
                warn!(error = %e, "Canvas resize failed");
            }
            s.sim.resize(width, height);
        })?;

        let runner = Self {
            state,
            frame_cb: Rc::new(RefCell::new(None)),
            listeners: vec![on_move, on_resize],
        };
        runner.schedule_loop()?;
        info!(width, height, "Background field running");
        Ok(runner)
    }

    fn schedule_loop(&self) -> Result<()> {
        let state = self.state.clone();
        let frame_cb = self.frame_cb.clone();

        *self.frame_cb.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let mut s = state.borrow_mut();
            s.handle = None;
            if !s.running {
                return;
            }

            let LoopState { sim, surface, .. } = &mut *s;
            let stats = sim.tick(surface);
            if stats.frames % 600 == 0 {
                debug!(
                    frames = stats.frames,
                    failed = stats.failed_frames,
                    edges = stats.last_edges,
                    "Field stats"
                );
            }

            // Reschedule even after a failed frame
            if let Some(cb) = frame_cb.borrow().as_ref() {
                match request_frame(cb) {
                    Ok(handle) => s.handle = Some(handle),
                    Err(e) => warn!(error = %e, "Could not schedule next frame"),
                }
            }
        }) as Box<dyn FnMut()>));

        let handle = match self.frame_cb.borrow().as_ref() {
            Some(cb) => request_frame(cb)?,
            None => return Ok(()),
        };
        self.state.borrow_mut().handle = Some(handle);
        Ok(())
    }

    pub fn stats(&self) -> FrameStats {
        self.state.borrow().sim.stats()
    }

    /// Stop the animation; listeners go when the runner is dropped
    pub fn cancel(&self) {
        let mut s = self.state.borrow_mut();
        s.running = false;
        if let Some(handle) = s.handle.take() {
            if let Ok(window) = dom::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
        info!(frames = s.sim.stats().frames, "Background field stopped");
    }
}

impl Drop for FieldRunner {
    fn drop(&mut self) {
        self.cancel();
        // Breaks the closure -> frame_cb reference cycle
        self.frame_cb.borrow_mut().take();
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Result<i32> {
    dom::window()?
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(js_err)
}

fn background_canvas() -> Result<HtmlCanvasElement> {
    if let Ok(canvas) = dom::by_id::<HtmlCanvasElement>(CANVAS_ID) {
        return Ok(canvas);
    }

    let document = dom::document()?;
    let canvas = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| FxError::Host("created element is not a canvas".into()))?;
    canvas.set_id(CANVAS_ID);
    let body = document
        .body()
        .ok_or_else(|| FxError::MissingElement("body".into()))?;
    body.prepend_with_node_1(&canvas).map_err(js_err)?;
    debug!("Created background canvas");
    Ok(canvas)
}
