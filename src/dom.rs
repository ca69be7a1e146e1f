use crate::constants::{CONTEXT_2D, MIN_BACKING_DIM};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()
}

/// The 2D context, or `None` when the browser cannot provide one.
pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context(CONTEXT_2D)
        .ok()
        .flatten()?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .ok()
}

/// `innerWidth` x `innerHeight` in CSS pixels; the backdrop always fills the window.
pub fn window_inner_size(window: &web::Window) -> (u32, u32) {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (
        dim(window.inner_width()).max(MIN_BACKING_DIM),
        dim(window.inner_height()).max(MIN_BACKING_DIM),
    )
}
