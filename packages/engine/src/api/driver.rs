//! Self-contained browser driver: owns the animation-frame loop, the
//! housekeeping interval and the resize listener for one canvas.
//!
//! The renderer never schedules itself; this is the host side of that
//! contract for pages that don't want to write the loop in JS.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

use crate::core::{RendererError, RendererResult};
use crate::render::CanvasSurface;
use crate::simulation::AmbientRenderer;

use super::wasm::random_seed;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct DriverState {
    renderer: AmbientRenderer<CanvasSurface>,
    frame_request: Option<i32>,
    interval: Option<i32>,
    disposed: bool,
}

/// `(innerWidth, innerHeight, devicePixelRatio)`
fn viewport_metrics(window: &Window) -> (f64, f64, f64) {
    let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (
        read(window.inner_width()),
        read(window.inner_height()),
        window.device_pixel_ratio(),
    )
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Option<i32> {
    let callback = callback.borrow();
    let closure = callback.as_ref()?;
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(err) => {
            log::warn!("requestAnimationFrame failed: {err:?}");
            None
        }
    }
}

/// A running background: the shared state plus the JS callbacks keeping
/// it alive.
struct Mounted {
    window: Window,
    state: Rc<RefCell<DriverState>>,
    frame_callback: FrameCallback,
    housekeeping: Closure<dyn FnMut()>,
    resize: Closure<dyn FnMut()>,
}

impl Mounted {
    fn start(canvas: HtmlCanvasElement) -> RendererResult<Self> {
        let window = web_sys::window().ok_or(RendererError::SurfaceUnavailable)?;
        let surface = CanvasSurface::from_canvas(canvas)?;

        let mut renderer = AmbientRenderer::new(surface, random_seed());
        let (width, height, dpr) = viewport_metrics(&window);
        renderer.initialize(width, height, dpr);
        let interval_ms = renderer.core().config().housekeeping_interval_ms;

        let state = Rc::new(RefCell::new(DriverState {
            renderer,
            frame_request: None,
            interval: None,
            disposed: false,
        }));

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        {
            let state = Rc::clone(&state);
            let window = window.clone();
            let callback = Rc::clone(&frame_callback);
            *frame_callback.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
                let mut state = state.borrow_mut();
                if state.disposed {
                    return;
                }
                state.renderer.render_frame(now_ms);
                state.frame_request = request_frame(&window, &callback);
            }));
        }

        let housekeeping = {
            let state = Rc::clone(&state);
            Closure::<dyn FnMut()>::new(move || {
                let mut state = state.borrow_mut();
                if !state.disposed {
                    state.renderer.housekeep();
                }
            })
        };

        let resize = {
            let state = Rc::clone(&state);
            let window = window.clone();
            Closure::<dyn FnMut()>::new(move || {
                let mut state = state.borrow_mut();
                if state.disposed {
                    return;
                }
                let (width, height, dpr) = viewport_metrics(&window);
                state.renderer.on_resize(width, height, dpr);
            })
        };

        window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(|err| RendererError::from_js("addEventListener", err))?;
        let mut mounted = Self {
            window,
            state,
            frame_callback,
            housekeeping,
            resize,
        };

        let interval = match mounted.window.set_interval_with_callback_and_timeout_and_arguments_0(
            mounted.housekeeping.as_ref().unchecked_ref(),
            interval_ms.min(i32::MAX as u32) as i32,
        ) {
            Ok(id) => id,
            Err(err) => {
                mounted.stop();
                return Err(RendererError::from_js("setInterval", err));
            }
        };
        {
            let mut state = mounted.state.borrow_mut();
            state.interval = Some(interval);
            state.frame_request = request_frame(&mounted.window, &mounted.frame_callback);
        }

        log::info!("ambient background mounted ({width}x{height} @{dpr}x)");
        Ok(mounted)
    }

    fn stop(&mut self) {
        {
            let mut state = self.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.disposed = true;

            if let Some(id) = state.frame_request.take() {
                if let Err(err) = self.window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {err:?}");
                }
            }
            if let Some(id) = state.interval.take() {
                self.window.clear_interval_with_handle(id);
            }
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref())
            {
                log::warn!("removeEventListener failed: {err:?}");
            }
            state.renderer.dispose();
        }
        // Breaks the closure's reference to itself
        self.frame_callback.borrow_mut().take();
    }
}

/// Handle returned by [`mount_background`]. Dropping it (or calling
/// `free()` from JS) disposes the background.
///
/// When the canvas has no 2D context the handle is inert: nothing is
/// drawn, no callbacks are registered and `is_active` is false.
#[wasm_bindgen]
pub struct BackgroundHandle {
    mounted: Option<Mounted>,
}

/// Attach the spark background to `canvas` and start animating.
///
/// Never throws. Without a window or a 2D context the returned handle
/// does nothing.
#[wasm_bindgen(js_name = mountBackground)]
pub fn mount_background(canvas: HtmlCanvasElement) -> BackgroundHandle {
    let mounted = match Mounted::start(canvas) {
        Ok(mounted) => Some(mounted),
        Err(err) => {
            log::warn!("ambient background disabled: {err}");
            None
        }
    };
    BackgroundHandle { mounted }
}

#[wasm_bindgen]
impl BackgroundHandle {
    /// Stop the frame loop, the housekeeping timer and the resize listener,
    /// then drop cached sprites. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.stop();
        }
    }

    /// False when mounting found no drawing surface, or after `dispose`.
    #[wasm_bindgen(getter)]
    pub fn is_active(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|mounted| !mounted.state.borrow().disposed)
    }

    #[wasm_bindgen(getter)]
    pub fn active_sparks(&self) -> usize {
        self.mounted
            .as_ref()
            .map_or(0, |mounted| mounted.state.borrow().renderer.core().active_count())
    }
}

impl Drop for BackgroundHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}
