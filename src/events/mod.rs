pub mod pointer;

use crate::dom;
use crate::frame::BackgroundLoop;
use web_sys as web;

pub use pointer::wire_pointermove;

/// Rebuild the mesh for the new viewport on every window resize.
pub fn wire_resize(window: &web::Window, background: BackgroundLoop) {
    let w = window.clone();
    dom::add_window_listener(window, "resize", move |_: web::Event| {
        background.resize(dom::viewport(&w));
    });
}
