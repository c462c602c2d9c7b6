/// Bookkeeping for a single pending `requestAnimationFrame` callback.
///
/// Holds at most one handle. Rescheduling always cancels whatever is still
/// pending first, so a slot can never have two callbacks in flight. The
/// scheduler itself is passed in as closures, which keeps this type free of
/// browser bindings.
#[derive(Debug, Default)]
pub struct FrameSlot {
    pending: Option<i32>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the pending frame (if any) and request a new one.
    pub fn reschedule(
        &mut self,
        cancel: impl FnOnce(i32),
        request: impl FnOnce() -> Option<i32>,
    ) {
        self.cancel(cancel);
        self.pending = request();
    }

    /// Cancel the pending frame without requesting another.
    pub fn cancel(&mut self, cancel: impl FnOnce(i32)) {
        if let Some(handle) = self.pending.take() {
            cancel(handle);
        }
    }

    /// Call from inside the frame callback: the handle is spent.
    #[inline]
    pub fn fired(&mut self) {
        self.pending = None;
    }

    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn pending(&self) -> Option<i32> {
        self.pending
    }

    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
