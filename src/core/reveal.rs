use super::constants::{REVEAL_RATIO_EPSILON, REVEAL_VIEWPORT_COVERAGE};
use fnv::FnvHashSet;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Revealed,
}

/// One intersection notification for target `target`.
///
/// `ratio` is the visible share of the target's own area,
/// `viewport_coverage` the share of the viewport the visible part fills.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub target: usize,
    pub is_intersecting: bool,
    pub ratio: f64,
    pub viewport_coverage: f64,
}

/// Axis-aligned box in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// One-shot reveal state for a list of targets, addressed by index.
///
/// Targets start `Hidden` and observed. A notification at or above the
/// threshold moves a target to `Revealed` and drops it from the observed set;
/// later notifications for it are ignored. Targets too tall to ever show the
/// threshold share of themselves are revealed once they fill enough of the
/// viewport instead.
#[derive(Debug)]
pub struct RevealTracker {
    states: Vec<RevealState>,
    observed: FnvHashSet<usize>,
    // in view but not yet revealed
    lingering: FnvHashSet<usize>,
    threshold: f64,
}

impl RevealTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            states: Vec::new(),
            observed: FnvHashSet::default(),
            lingering: FnvHashSet::default(),
            threshold,
        }
    }

    /// Register a target; returns its index.
    pub fn track(&mut self) -> usize {
        let id = self.states.len();
        self.states.push(RevealState::Hidden);
        self.observed.insert(id);
        id
    }

    /// Feed a batch of notifications. Returns the targets that were revealed
    /// by this batch, each exactly once, in batch order.
    pub fn on_intersections(&mut self, entries: &[Intersection]) -> SmallVec<[usize; 8]> {
        let mut revealed = SmallVec::new();
        for e in entries {
            if !self.observed.contains(&e.target) {
                continue;
            }
            if self.passes(e) {
                self.observed.remove(&e.target);
                self.lingering.remove(&e.target);
                self.states[e.target] = RevealState::Revealed;
                revealed.push(e.target);
            } else if e.is_intersecting {
                self.lingering.insert(e.target);
            } else {
                self.lingering.remove(&e.target);
            }
        }
        revealed
    }

    #[inline]
    fn passes(&self, e: &Intersection) -> bool {
        e.is_intersecting
            && (e.ratio + REVEAL_RATIO_EPSILON >= self.threshold
                || e.viewport_coverage >= REVEAL_VIEWPORT_COVERAGE)
    }

    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn state(&self, id: usize) -> Option<RevealState> {
        self.states.get(id).copied()
    }

    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_observed(&self, id: usize) -> bool {
        self.observed.contains(&id)
    }

    /// Indices still waiting to be revealed, ascending.
    pub fn observed(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.observed.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Indices last reported in view but below the reveal bar, ascending.
    /// An observer only reports threshold crossings, so these need rechecking
    /// as the page scrolls.
    pub fn lingering(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.lingering.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.observed.is_empty()
    }

    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Area of `rect` inside the viewport, or `None` when they do not touch.
fn visible_area(rect: Rect, viewport_w: f64, viewport_h: f64) -> Option<f64> {
    let x0 = rect.left.max(0.0);
    let y0 = rect.top.max(0.0);
    let x1 = (rect.left + rect.width).min(viewport_w);
    let y1 = (rect.top + rect.height).min(viewport_h);
    (x1 >= x0 && y1 >= y0).then(|| (x1 - x0) * (y1 - y0))
}

/// Fraction of `rect`'s area inside a `viewport_w` x `viewport_h` viewport.
/// Zero-area boxes count as visible once any edge touches the viewport.
pub fn visible_ratio(rect: Rect, viewport_w: f64, viewport_h: f64) -> f64 {
    let Some(visible) = visible_area(rect, viewport_w, viewport_h) else {
        return 0.0;
    };
    let area = rect.width * rect.height;
    if area <= 0.0 {
        return 1.0;
    }
    (visible / area).clamp(0.0, 1.0)
}

/// Fraction of the viewport filled by `visible_area`.
#[inline]
pub fn viewport_coverage(visible_area: f64, viewport_w: f64, viewport_h: f64) -> f64 {
    let viewport = viewport_w * viewport_h;
    if viewport <= 0.0 {
        return 0.0;
    }
    (visible_area / viewport).clamp(0.0, 1.0)
}

/// Build a notification from a bounding box, for hosts without an
/// intersection observer.
pub fn intersection_from_rect(target: usize, rect: Rect, viewport_w: f64, viewport_h: f64) -> Intersection {
    let ratio = visible_ratio(rect, viewport_w, viewport_h);
    let area = visible_area(rect, viewport_w, viewport_h).unwrap_or(0.0);
    Intersection {
        target,
        is_intersecting: ratio > 0.0,
        ratio,
        viewport_coverage: viewport_coverage(area, viewport_w, viewport_h),
    }
}
