use crate::constants::CANVAS_ID;
use crate::core::{Animator, Background, PointerTracker, Scene, Viewport};
use crate::dom;
use crate::render;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub background: Background,
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub pointer: Rc<RefCell<PointerTracker>>,
}

impl FrameContext {
    #[inline]
    fn pointer(&self) -> glam::Vec2 {
        self.pointer.borrow().position()
    }

    fn paint(&self, scene: Option<Scene>) {
        if let Some(scene) = scene {
            render::paint(&self.ctx, &scene);
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to the self-rescheduling background loop.
#[derive(Clone)]
pub struct BackgroundLoop {
    state: Rc<RefCell<FrameContext>>,
    tick: Tick,
}

impl BackgroundLoop {
    /// Find the canvas, size it and seed the mesh. `Ok(None)` when the page
    /// has no background canvas.
    pub fn attach(
        window: &web::Window,
        document: &web::Document,
        pointer: Rc<RefCell<PointerTracker>>,
    ) -> anyhow::Result<Option<Self>> {
        let Some(el) = document.get_element_by_id(CANVAS_ID) else {
            return Ok(None);
        };
        let canvas: web::HtmlCanvasElement = el
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", CANVAS_ID, e))?;
        let ctx = render::context_2d(&canvas)?;

        let viewport = dom::viewport(window);
        dom::sync_canvas_size(&canvas, &viewport);
        let animator = Animator::new(viewport);
        log::info!(
            "[mesh] {} particles on {}x{} canvas",
            animator.mesh().particles.len(),
            canvas.width(),
            canvas.height()
        );

        let frame_ctx = Rc::new(RefCell::new(FrameContext {
            background: Background::new(animator),
            canvas,
            ctx,
            pointer,
        }));
        let tick: Tick = Rc::new(RefCell::new(None));
        let frame_ctx_tick = frame_ctx.clone();
        let tick_clone = tick.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let Some(w) = web::window() else {
                return;
            };
            let tick_ref = tick_clone.borrow();
            let Some(cb) = tick_ref.as_ref() else {
                return;
            };
            let mut fc = frame_ctx_tick.borrow_mut();
            let pointer = fc.pointer();
            let scene = fc.background.on_frame(
                pointer,
                instant::now(),
                |h| {
                    _ = w.cancel_animation_frame(h);
                },
                || w.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
            );
            fc.paint(scene);
        }) as Box<dyn FnMut()>));

        Ok(Some(Self {
            state: frame_ctx,
            tick,
        }))
    }

    /// Draw a frame now and keep the loop going from here.
    pub fn start(&self) {
        let Some(w) = web::window() else {
            return;
        };
        let tick_ref = self.tick.borrow();
        let Some(cb) = tick_ref.as_ref() else {
            return;
        };
        let mut fc = self.state.borrow_mut();
        let pointer = fc.pointer();
        let scene = fc.background.start(
            pointer,
            instant::now(),
            |h| {
                _ = w.cancel_animation_frame(h);
            },
            || w.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
        );
        fc.paint(scene);
    }

    /// Cancel the pending frame, rebuild for `viewport` and restart.
    pub fn resize(&self, viewport: Viewport) {
        let Some(w) = web::window() else {
            return;
        };
        let tick_ref = self.tick.borrow();
        let Some(cb) = tick_ref.as_ref() else {
            return;
        };
        let mut fc = self.state.borrow_mut();
        if !fc.background.is_running() {
            return;
        }
        dom::sync_canvas_size(&fc.canvas, &viewport);
        let pointer = fc.pointer();
        let scene = fc.background.resize(
            viewport,
            pointer,
            instant::now(),
            |h| {
                _ = w.cancel_animation_frame(h);
            },
            || w.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
        );
        log::debug!(
            "[mesh] {}x{} @{} -> {} particles",
            viewport.width,
            viewport.height,
            viewport.dpr,
            fc.background.animator().mesh().particles.len()
        );
        fc.paint(scene);
    }

    /// Stop the loop for good.
    pub fn stop(&self) {
        let mut fc = self.state.borrow_mut();
        if let Some(w) = web::window() {
            fc.background.stop(|h| {
                _ = w.cancel_animation_frame(h);
            });
        }
        log::info!(
            "[mesh] stopped after {} frames",
            fc.background.animator().frames()
        );
    }
}
