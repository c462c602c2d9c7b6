use super::constants::*;
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Logical viewport size plus the device pixel ratio it is rendered at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Viewport {
    /// Build a viewport, treating a missing or nonsensical ratio as 1.
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Canvas backing-store size in whole device pixels.
    #[inline]
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr) as u32,
            (self.height * self.dpr) as u32,
        )
    }

    #[inline]
    pub fn to_device(&self, logical: Vec2) -> Vec2 {
        logical * self.dpr
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        particle_count_for_width(self.width)
    }
}

#[inline]
pub fn particle_count_for_width(width: f32) -> usize {
    if width < NARROW_VIEWPORT_PX {
        PARTICLES_NARROW
    } else {
        PARTICLES_WIDE
    }
}

/// A single node of the mesh. Position and velocity are in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: usize, // index into PALETTE
    pub phase: f32,
}

impl Particle {
    /// Advance one frame. Edge reflection happens before the pointer pull.
    pub fn step(&mut self, bounds: Vec2, pointer: Vec2, attract_radius: f32) {
        self.pos += self.vel;

        if self.pos.x < 0.0 || self.pos.x > bounds.x {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.vel.y = -self.vel.y;
        }

        let to_pointer = pointer - self.pos;
        let dist = to_pointer.length();
        if dist > 0.0 && dist < attract_radius {
            let force = (attract_radius - dist) / attract_radius;
            self.vel += to_pointer / dist * force * ATTRACT_GAIN;
        }
    }
}

/// Spawn one particle somewhere inside `bounds` (device pixels).
pub fn create_particle<R: Rng>(rng: &mut R, bounds: Vec2) -> Particle {
    let speed = rng.gen_range(SPEED_MIN..SPEED_MAX);
    let angle = rng.gen_range(0.0..TAU);
    Particle {
        pos: Vec2::new(
            rng.gen::<f32>() * bounds.x,
            rng.gen::<f32>() * bounds.y,
        ),
        vel: Vec2::new(angle.cos(), angle.sin()) * speed,
        radius: rng.gen_range(RADIUS_MIN..RADIUS_MAX),
        color: rng.gen_range(0..PALETTE.len()),
        phase: rng.gen::<f32>(),
    }
}

/// Normalised pulse in [0, 1] for a particle phase at a given time.
#[inline]
pub fn pulse(now_ms: f64, phase: f32) -> f32 {
    (((now_ms * PULSE_RATE_PER_MS + phase as f64).sin() + 1.0) * 0.5) as f32
}

/// Line opacity in (0, 1] for two nodes `distance` apart, or `None` when they
/// are too far apart to be linked.
#[inline]
pub fn link_opacity(distance: f32, threshold: f32) -> Option<f32> {
    (distance < threshold).then(|| 1.0 - distance / threshold)
}

/// The full particle set for one canvas size.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub particles: Vec<Particle>,
    pub bounds: Vec2,
    pub dpr: f32,
}

impl Mesh {
    pub fn new<R: Rng>(viewport: &Viewport, rng: &mut R) -> Self {
        let (w, h) = viewport.backing_size();
        let bounds = Vec2::new(w as f32, h as f32);
        let particles = (0..viewport.particle_count())
            .map(|_| create_particle(rng, bounds))
            .collect();
        Self {
            particles,
            bounds,
            dpr: viewport.dpr,
        }
    }

    /// Move every particle one frame. `pointer` is already in device pixels.
    pub fn step(&mut self, pointer: Vec2) {
        let attract_radius = ATTRACT_RADIUS_PX * self.dpr;
        for p in &mut self.particles {
            p.step(self.bounds, pointer, attract_radius);
        }
    }

    pub fn dots(&self, now_ms: f64) -> Vec<Dot> {
        self.particles
            .iter()
            .map(|p| {
                let k = pulse(now_ms, p.phase);
                Dot {
                    pos: p.pos,
                    radius: p.radius * self.dpr * (PULSE_RADIUS_BASE + k * PULSE_RADIUS_SPAN),
                    alpha: PULSE_ALPHA_BASE + k * PULSE_ALPHA_SPAN,
                    color: p.color,
                }
            })
            .collect()
    }

    /// Every unordered pair closer than the link distance. O(n²).
    pub fn links(&self) -> Vec<Link> {
        let threshold = LINK_DISTANCE_PX * self.dpr;
        let mut out = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                if let Some(opacity) = link_opacity(a.pos.distance(b.pos), threshold) {
                    out.push(Link {
                        from: a.pos,
                        to: b.pos,
                        alpha: opacity * LINK_ALPHA_MAX,
                    });
                }
            }
        }
        out
    }
}

/// Radial glow following the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub color: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    pub alpha: f32,
}

/// Everything needed to paint one frame, in paint order.
#[derive(Clone, Debug)]
pub struct Scene {
    pub size: Vec2,
    pub dpr: f32,
    pub glow: Glow,
    pub dots: Vec<Dot>,
    pub links: Vec<Link>,
}
