use glam::Vec2;

/// Last committed pointer position (logical pixels) plus the newest
/// uncommitted sample.
///
/// Move events only `record`; the frame callback calls `commit`, so a burst of
/// moves between two refreshes collapses into one update carrying the last
/// sample.
#[derive(Clone, Copy, Debug)]
pub struct PointerTracker {
    position: Vec2,
    latest: Option<Vec2>,
    commits: u64,
}

impl PointerTracker {
    pub fn new(initial: Vec2) -> Self {
        Self {
            position: initial,
            latest: None,
            commits: 0,
        }
    }

    #[inline]
    pub fn record(&mut self, x: f32, y: f32) {
        self.latest = Some(Vec2::new(x, y));
    }

    /// Apply the newest sample. Returns it, or `None` if nothing was recorded
    /// since the previous commit.
    pub fn commit(&mut self) -> Option<Vec2> {
        let p = self.latest.take()?;
        self.position = p;
        self.commits += 1;
        Some(p)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn has_pending(&self) -> bool {
        self.latest.is_some()
    }

    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn commits(&self) -> u64 {
        self.commits
    }
}

/// CSS custom property values for a pointer position.
pub fn pointer_css_values(p: Vec2) -> (String, String) {
    (css_px(p.x), css_px(p.y))
}

#[inline]
pub fn css_px(v: f32) -> String {
    format!("{}px", v)
}
