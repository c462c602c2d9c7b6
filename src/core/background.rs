use super::animator::Animator;
use super::mesh::{Scene, Viewport};
use super::schedule::FrameSlot;
use glam::Vec2;

/// The self-rescheduling render loop, minus the browser.
///
/// Owns the animator and the single pending-frame slot. Every entry point
/// that may schedule takes the host's cancel and request primitives as
/// closures, like `FrameSlot::reschedule`. Each returns the scene to paint,
/// or `None` once stopped.
pub struct Background {
    animator: Animator,
    slot: FrameSlot,
}

impl Background {
    pub fn new(animator: Animator) -> Self {
        Self {
            animator,
            slot: FrameSlot::new(),
        }
    }

    /// Draw a frame now and request the next one.
    pub fn start(
        &mut self,
        pointer: Vec2,
        now_ms: f64,
        cancel: impl FnOnce(i32),
        request: impl FnOnce() -> Option<i32>,
    ) -> Option<Scene> {
        let scene = self.animator.tick(pointer, now_ms);
        if self.animator.is_running() {
            self.slot.reschedule(cancel, request);
        }
        scene
    }

    /// Body of the frame callback: the fired handle is spent, then draw and
    /// reschedule.
    pub fn on_frame(
        &mut self,
        pointer: Vec2,
        now_ms: f64,
        cancel: impl FnOnce(i32),
        request: impl FnOnce() -> Option<i32>,
    ) -> Option<Scene> {
        self.slot.fired();
        self.start(pointer, now_ms, cancel, request)
    }

    /// Cancel the pending frame, rebuild the mesh and restart. Ignored after
    /// `stop`.
    pub fn resize(
        &mut self,
        viewport: Viewport,
        pointer: Vec2,
        now_ms: f64,
        mut cancel: impl FnMut(i32),
        request: impl FnOnce() -> Option<i32>,
    ) -> Option<Scene> {
        if !self.animator.is_running() {
            return None;
        }
        self.slot.cancel(&mut cancel);
        self.animator.resize(viewport);
        self.start(pointer, now_ms, cancel, request)
    }

    pub fn stop(&mut self, cancel: impl FnOnce(i32)) {
        self.slot.cancel(cancel);
        self.animator.stop();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.animator.is_running()
    }

    #[inline]
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn slot(&self) -> &FrameSlot {
        &self.slot
    }
}
