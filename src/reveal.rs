use crate::constants::{
    RECHECK_EVENTS, REVEAL_HIDDEN_CLASS, REVEAL_SELECTOR, REVEAL_VISIBLE_CLASS,
};
use crate::core::constants::REVEAL_THRESHOLD;
use crate::core::reveal::{intersection_from_rect, viewport_coverage};
use crate::core::{Intersection, Rect, RevealTracker};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

struct Targets {
    elements: Vec<web::Element>,
    tracker: RevealTracker,
    observer: Option<web::IntersectionObserver>,
}

impl Targets {
    fn index_of(&self, el: &web::Element) -> Option<usize> {
        self.elements.iter().position(|e| e == el)
    }

    /// Apply a batch; revealed elements get the visible class and are no
    /// longer observed.
    fn apply(&mut self, batch: &[Intersection]) {
        for id in self.tracker.on_intersections(batch) {
            let el = &self.elements[id];
            _ = el.class_list().add_1(REVEAL_VISIBLE_CLASS);
            if let Some(observer) = &self.observer {
                observer.unobserve(el);
            }
        }
    }

    /// Measure `ids` against the current viewport.
    fn measure(&self, ids: Vec<usize>, (vw, vh): (f64, f64)) -> Vec<Intersection> {
        ids.into_iter()
            .map(|id| {
                let r = self.elements[id].get_bounding_client_rect();
                let rect = Rect {
                    left: r.left(),
                    top: r.top(),
                    width: r.width(),
                    height: r.height(),
                };
                intersection_from_rect(id, rect, vw, vh)
            })
            .collect()
    }
}

fn inner_size(window: &web::Window) -> (f64, f64) {
    let vw = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let vh = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (vw, vh)
}

fn collect_targets(document: &web::Document) -> anyhow::Result<Targets> {
    let list = document
        .query_selector_all(REVEAL_SELECTOR)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let mut targets = Targets {
        elements: Vec::with_capacity(list.length() as usize),
        tracker: RevealTracker::new(REVEAL_THRESHOLD),
        observer: None,
    };
    for i in 0..list.length() {
        let Some(el) = list.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        _ = el.class_list().add_1(REVEAL_HIDDEN_CLASS);
        targets.tracker.track();
        targets.elements.push(el);
    }
    Ok(targets)
}

/// Mark every revealable element hidden and reveal each one the first time
/// enough of it scrolls into view.
pub fn observe_all(window: &web::Window, document: &web::Document) -> anyhow::Result<()> {
    let targets = collect_targets(document)?;
    if targets.elements.is_empty() {
        return Ok(());
    }
    let count = targets.elements.len();
    let targets = Rc::new(RefCell::new(targets));
    match observe_with_intersection_observer(window, &targets) {
        Ok(observer) => {
            targets.borrow_mut().observer = Some(observer);
            log::info!("[reveal] observing {count} elements");
            // the observer only reports threshold crossings; elements taller
            // than the threshold allows are followed by hand once in view
            recheck_on_layout(window, targets, RevealTracker::lingering);
        }
        Err(e) => {
            log::warn!("[reveal] IntersectionObserver unavailable ({e}); falling back to scroll");
            let check = recheck_on_layout(window, targets, RevealTracker::observed);
            check();
        }
    }
    Ok(())
}

fn observe_with_intersection_observer(
    window: &web::Window,
    targets: &Rc<RefCell<Targets>>,
) -> anyhow::Result<web::IntersectionObserver> {
    let targets_cb = targets.clone();
    let w = window.clone();
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        let (vw, vh) = inner_size(&w);
        let mut t = targets_cb.borrow_mut();
        let batch: Vec<Intersection> = entries
            .iter()
            .filter_map(|v| v.dyn_into::<web::IntersectionObserverEntry>().ok())
            .filter_map(|entry| {
                let target = t.index_of(&entry.target())?;
                let visible = entry.intersection_rect();
                Some(Intersection {
                    target,
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                    viewport_coverage: viewport_coverage(
                        visible.width() * visible.height(),
                        vw,
                        vh,
                    ),
                })
            })
            .collect();
        t.apply(&batch);
    }) as Box<dyn FnMut(js_sys::Array)>);

    let init = web::IntersectionObserverInit::new();
    // 0 as well, so entering the viewport is always reported
    let thresholds = js_sys::Array::of2(&JsValue::from_f64(0.0), &JsValue::from_f64(REVEAL_THRESHOLD));
    init.set_threshold(&thresholds);
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    for el in &targets.borrow().elements {
        observer.observe(el);
    }
    callback.forget();
    Ok(observer)
}

/// Re-measure the targets `pick` selects on every scroll and resize.
/// Returns the check so callers can also run it immediately.
fn recheck_on_layout(
    window: &web::Window,
    targets: Rc<RefCell<Targets>>,
    pick: fn(&RevealTracker) -> Vec<usize>,
) -> Rc<dyn Fn()> {
    let w = window.clone();
    let check: Rc<dyn Fn()> = Rc::new(move || {
        let mut t = targets.borrow_mut();
        if t.tracker.is_done() {
            return;
        }
        let ids = pick(&t.tracker);
        if ids.is_empty() {
            return;
        }
        let batch = t.measure(ids, inner_size(&w));
        t.apply(&batch);
    });
    for event in RECHECK_EVENTS {
        let check = check.clone();
        dom::add_window_listener(window, event, move |_: web::Event| check());
    }
    check
}
