//! Browser wiring for the animation loop: `requestAnimationFrame` scheduling
//! and the window resize listener.
//!
//! Both JS callbacks hold only a weak handle to the mounted state, so dropping
//! the handle on the JS side releases everything once the loop has stopped.

use crate::canvas::CanvasSurface;
use crate::constants::RESIZE_EVENT;
use crate::dom;
use instant::Instant;
use nebula_core::{AnimationLoop, NebulaConfig, NebulaError, Scheduler, Surface, Viewport};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct Mounted {
    pub anim: AnimationLoop<WebScheduler>,
    pub surface: CanvasSurface,
}

// Filled in once the mounted state exists; callbacks see an empty Weak until then.
type Slot = Rc<RefCell<Weak<RefCell<Mounted>>>>;

pub struct WebScheduler {
    window: web::Window,
    tick: Closure<dyn FnMut(f64)>,
    on_resize: Closure<dyn FnMut()>,
}

fn js_err(context: &str, e: JsValue) -> NebulaError {
    NebulaError::Scheduler(format!("{context}: {e:?}"))
}

impl Scheduler for WebScheduler {
    type FrameToken = i32;
    type ListenerToken = ();

    fn attach_resize(&mut self) -> nebula_core::Result<()> {
        self.window
            .add_event_listener_with_callback(RESIZE_EVENT, self.on_resize.as_ref().unchecked_ref())
            .map_err(|e| js_err("addEventListener", e))
    }

    fn detach_resize(&mut self, _token: ()) {
        let _ = self.window.remove_event_listener_with_callback(
            RESIZE_EVENT,
            self.on_resize.as_ref().unchecked_ref(),
        );
    }

    fn request_frame(&mut self) -> nebula_core::Result<i32> {
        self.window
            .request_animation_frame(self.tick.as_ref().unchecked_ref())
            .map_err(|e| js_err("requestAnimationFrame", e))
    }

    fn cancel_frame(&mut self, id: i32) {
        let _ = self.window.cancel_animation_frame(id);
    }
}

fn tick_closure(slot: Slot) -> Closure<dyn FnMut(f64)> {
    Closure::wrap(Box::new(move |_timestamp: f64| {
        let Some(mounted) = slot.borrow().upgrade() else {
            return;
        };
        let mut guard = mounted.borrow_mut();
        let Mounted { anim, surface } = &mut *guard;
        if let Err(e) = anim.on_frame(Instant::now(), surface) {
            log::error!("frame error: {e}");
        }
    }) as Box<dyn FnMut(f64)>)
}

fn resize_closure(slot: Slot, window: web::Window) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let Some(mounted) = slot.borrow().upgrade() else {
            return;
        };
        let (width, height) = dom::window_inner_size(&window);
        let mut guard = mounted.borrow_mut();
        let Mounted { anim, surface } = &mut *guard;
        anim.on_resize(width, height, surface);
    }) as Box<dyn FnMut()>)
}

/// Look up the canvas, size it to the window and mount the loop.
///
/// `Ok(None)` means the page cannot host the backdrop (no such canvas, or no
/// 2D context); the caller keeps an inert handle in that case.
pub fn mount(canvas_id: &str, config: NebulaConfig) -> anyhow::Result<Option<Rc<RefCell<Mounted>>>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let Some(canvas) = dom::canvas_by_id(&document, canvas_id) else {
        log::warn!("canvas #{canvas_id} not found; backdrop disabled");
        return Ok(None);
    };
    let Some(mut surface) = CanvasSurface::new(canvas) else {
        log::warn!("2d context unavailable on #{canvas_id}; backdrop disabled");
        return Ok(None);
    };

    let (width, height) = dom::window_inner_size(&window);
    surface.resize(width, height);

    let slot: Slot = Rc::new(RefCell::new(Weak::new()));
    let scheduler = WebScheduler {
        tick: tick_closure(slot.clone()),
        on_resize: resize_closure(slot.clone(), window.clone()),
        window,
    };
    let anim = AnimationLoop::mount(scheduler, config, Viewport::new(width, height))?;

    let mounted = Rc::new(RefCell::new(Mounted { anim, surface }));
    *slot.borrow_mut() = Rc::downgrade(&mounted);
    log::info!("mounted on #{canvas_id} at {width}x{height}");
    Ok(Some(mounted))
}
