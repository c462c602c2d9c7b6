#![cfg(target_arch = "wasm32")]
use crate::core::PointerTracker;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod render;
mod reveal;

thread_local! {
    static BACKGROUND: RefCell<Option<frame::BackgroundLoop>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("mesh-web starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    dom::on_ready(&document, || {
        if let Err(e) = init() {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop the background animation; the rest of the page keeps working.
#[wasm_bindgen]
pub fn stop_background() {
    BACKGROUND.with(|bg| {
        if let Some(background) = bg.borrow_mut().take() {
            background.stop();
        }
    });
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    dom::write_year(&document);

    let pointer = Rc::new(RefCell::new(PointerTracker::new(
        dom::viewport(&window).center(),
    )));
    events::wire_pointermove(&window, &document, pointer.clone());

    // features degrade independently
    match frame::BackgroundLoop::attach(&window, &document, pointer) {
        Ok(Some(background)) => {
            background.start();
            events::wire_resize(&window, background.clone());
            BACKGROUND.with(|bg| *bg.borrow_mut() = Some(background));
        }
        Ok(None) => log::warn!("[mesh] no #{} element; background disabled", constants::CANVAS_ID),
        Err(e) => log::warn!("[mesh] background disabled: {:?}", e),
    }

    if let Err(e) = reveal::observe_all(&window, &document) {
        log::warn!("[reveal] disabled: {:?}", e);
    }

    Ok(())
}
