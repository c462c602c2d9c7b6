use super::constants::GLOW_RADIUS_FRACTION;
use super::mesh::{Glow, Mesh, Scene, Viewport};
use glam::Vec2;
use rand::prelude::*;

/// Owns the particle mesh and its lifecycle.
///
/// The browser loop calls `tick` once per display refresh and paints the
/// returned `Scene`; tests drive it directly for a bounded number of frames.
/// After `stop`, `tick` returns `None` and the loop must not reschedule.
pub struct Animator {
    viewport: Viewport,
    mesh: Mesh,
    rng: StdRng,
    running: bool,
    frames: u64,
}

impl Animator {
    /// Construct with an entropy-seeded RNG.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_rng(viewport, StdRng::from_entropy())
    }

    /// Construct with a fixed seed; identical seeds give identical meshes.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_seed(viewport: Viewport, seed: u64) -> Self {
        Self::with_rng(viewport, StdRng::seed_from_u64(seed))
    }

    fn with_rng(viewport: Viewport, mut rng: StdRng) -> Self {
        let mesh = Mesh::new(&viewport, &mut rng);
        Self {
            viewport,
            mesh,
            rng,
            running: true,
            frames: 0,
        }
    }

    /// Replace the whole particle set for a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.mesh = Mesh::new(&viewport, &mut self.rng);
    }

    /// Advance one frame and describe what to paint.
    ///
    /// `pointer` is in logical pixels; it is scaled to device pixels here
    /// before any distance test against the particles.
    pub fn tick(&mut self, pointer: Vec2, now_ms: f64) -> Option<Scene> {
        if !self.running {
            return None;
        }
        let pointer = self.viewport.to_device(pointer);
        self.mesh.step(pointer);
        self.frames += 1;
        Some(Scene {
            size: self.mesh.bounds,
            dpr: self.viewport.dpr,
            glow: Glow {
                center: pointer,
                radius: self.mesh.bounds.x * GLOW_RADIUS_FRACTION,
            },
            dots: self.mesh.dots(now_ms),
            links: self.mesh.links(),
        })
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
