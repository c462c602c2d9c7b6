use crate::core::{FrameSlot, PointerTracker};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Coalesce `pointermove` into at most one commit per display refresh.
///
/// Every move records the sample and replaces the pending frame request; the
/// frame that finally fires commits the newest sample and mirrors it into the
/// page's CSS variables.
pub fn wire_pointermove(
    window: &web::Window,
    document: &web::Document,
    pointer: Rc<RefCell<PointerTracker>>,
) {
    let slot = Rc::new(RefCell::new(FrameSlot::new()));

    let slot_commit = slot.clone();
    let pointer_commit = pointer.clone();
    let document = document.clone();
    let commit = Closure::wrap(Box::new(move || {
        slot_commit.borrow_mut().fired();
        let committed = pointer_commit.borrow_mut().commit();
        if let Some(p) = committed {
            dom::publish_pointer(&document, p);
        }
    }) as Box<dyn FnMut()>);

    let w = window.clone();
    dom::add_window_listener(window, "pointermove", move |ev: web::MouseEvent| {
        pointer
            .borrow_mut()
            .record(ev.client_x() as f32, ev.client_y() as f32);
        slot.borrow_mut().reschedule(
            |h| {
                _ = w.cancel_animation_frame(h);
            },
            || w.request_animation_frame(commit.as_ref().unchecked_ref()).ok(),
        );
    });
}
