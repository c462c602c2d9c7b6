use crate::constants::{POINTER_X_VAR, POINTER_Y_VAR, YEAR_ID};
use crate::core::page::year_text;
use crate::core::pointer::pointer_css_values;
use crate::core::Viewport;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Current logical viewport and device pixel ratio.
pub fn viewport(window: &web::Window) -> Viewport {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(w as f32, h as f32, window.device_pixel_ratio() as f32)
}

/// Backing store at device resolution, CSS box at logical size.
pub fn sync_canvas_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (w_px, h_px) = viewport.backing_size();
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
}

pub fn write_year(document: &web::Document) {
    let Some(el) = document.get_element_by_id(YEAR_ID) else {
        log::debug!("no #{YEAR_ID}; skipping year");
        return;
    };
    let year = js_sys::Date::new_0().get_full_year();
    el.set_text_content(Some(&year_text(year)));
}

/// Mirror the pointer into CSS custom properties on `<html>`.
pub fn publish_pointer(document: &web::Document, p: Vec2) {
    let Some(root) = document
        .document_element()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    else {
        return;
    };
    let (x, y) = pointer_css_values(p);
    let style = root.style();
    _ = style.set_property(POINTER_X_VAR, &x);
    _ = style.set_property(POINTER_Y_VAR, &y);
}

/// Run `f` once the document has been parsed.
pub fn on_ready(document: &web::Document, f: impl FnOnce() + 'static) {
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let closure = Closure::once(f);
    _ = document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn add_window_listener<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    window: &web::Window,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}
