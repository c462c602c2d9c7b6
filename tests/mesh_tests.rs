// Host-side tests for the particle mesh.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod mesh_core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod mesh {
        include!("../src/core/mesh.rs");
    }
}

use glam::Vec2;
use mesh_core::constants::*;
use mesh_core::mesh::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const FAR_AWAY: Vec2 = Vec2::new(-1.0e6, -1.0e6);

fn particle_at(pos: Vec2, vel: Vec2) -> Particle {
    Particle {
        pos,
        vel,
        radius: 2.0,
        color: 0,
        phase: 0.0,
    }
}

fn mesh_of(positions: &[Vec2], dpr: f32) -> Mesh {
    Mesh {
        particles: positions
            .iter()
            .map(|p| particle_at(*p, Vec2::ZERO))
            .collect(),
        bounds: Vec2::new(4000.0, 4000.0),
        dpr,
    }
}

#[test]
fn particle_count_depends_on_viewport_width() {
    let mut rng = StdRng::seed_from_u64(1);
    for width in [0.0, 320.0, 719.0, 719.99] {
        let mesh = Mesh::new(&Viewport::new(width, 800.0, 1.0), &mut rng);
        assert_eq!(mesh.particles.len(), 32, "width {width}");
    }
    for width in [720.0, 1024.0, 2560.0] {
        let mesh = Mesh::new(&Viewport::new(width, 800.0, 2.0), &mut rng);
        assert_eq!(mesh.particles.len(), 56, "width {width}");
    }
}

#[test]
fn viewport_falls_back_to_unit_ratio() {
    assert_eq!(Viewport::new(100.0, 100.0, 0.0).dpr, 1.0);
    assert_eq!(Viewport::new(100.0, 100.0, -2.0).dpr, 1.0);
    assert_eq!(Viewport::new(100.0, 100.0, f32::NAN).dpr, 1.0);
    assert_eq!(Viewport::new(100.0, 100.0, 1.5).dpr, 1.5);
}

#[test]
fn backing_size_is_scaled_and_truncated() {
    let vp = Viewport::new(100.5, 50.25, 2.0);
    assert_eq!(vp.backing_size(), (201, 100));
    assert_eq!(vp.to_device(Vec2::new(10.0, 20.0)), Vec2::new(20.0, 40.0));
    assert_eq!(vp.center(), Vec2::new(50.25, 25.125));
}

#[test]
fn created_particles_fall_in_spawn_ranges() {
    let mut rng = StdRng::seed_from_u64(42);
    let bounds = Vec2::new(800.0, 600.0);
    for _ in 0..2000 {
        let p = create_particle(&mut rng, bounds);
        assert!(p.pos.x >= 0.0 && p.pos.x <= bounds.x);
        assert!(p.pos.y >= 0.0 && p.pos.y <= bounds.y);
        let speed = p.vel.length();
        assert!(speed >= SPEED_MIN - 1e-5 && speed < SPEED_MAX + 1e-5, "speed {speed}");
        assert!(p.radius >= RADIUS_MIN && p.radius < RADIUS_MAX);
        assert!(p.color < PALETTE.len());
        assert!(p.phase >= 0.0 && p.phase < 1.0);
    }
}

#[test]
fn every_palette_entry_gets_used() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut seen = [false; 4];
    for _ in 0..500 {
        seen[create_particle(&mut rng, Vec2::new(10.0, 10.0)).color] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn crossing_right_edge_flips_vx() {
    let bounds = Vec2::new(800.0, 600.0);
    let mut p = particle_at(Vec2::new(799.9, 300.0), Vec2::new(0.5, 0.1));
    p.step(bounds, FAR_AWAY, 160.0);
    assert!(p.pos.x > bounds.x);
    assert_eq!(p.vel.x, -0.5);
    assert_eq!(p.vel.y, 0.1);
}

#[test]
fn crossing_top_and_left_edges_flips_both() {
    let bounds = Vec2::new(800.0, 600.0);
    let mut p = particle_at(Vec2::new(0.1, 0.2), Vec2::new(-0.4, -0.3));
    p.step(bounds, FAR_AWAY, 160.0);
    assert!(p.vel.x > 0.0);
    assert!(p.vel.y > 0.0);
    assert_eq!(p.vel, Vec2::new(0.4, 0.3));
}

#[test]
fn reflection_does_not_clamp_position() {
    let bounds = Vec2::new(100.0, 100.0);
    let mut p = particle_at(Vec2::new(99.8, 50.0), Vec2::new(0.7, 0.0));
    p.step(bounds, FAR_AWAY, 160.0);
    assert!((p.pos.x - 100.5).abs() < 1e-4);
    p.step(bounds, FAR_AWAY, 160.0);
    assert!((p.pos.x - 99.8).abs() < 1e-4);
}

#[test]
fn interior_motion_keeps_velocity() {
    let bounds = Vec2::new(800.0, 600.0);
    let mut p = particle_at(Vec2::new(400.0, 300.0), Vec2::new(0.3, -0.2));
    p.step(bounds, FAR_AWAY, 160.0);
    assert_eq!(p.vel, Vec2::new(0.3, -0.2));
    assert!((p.pos - Vec2::new(400.3, 299.8)).length() < 1e-4);
}

#[test]
fn pointer_within_radius_attracts() {
    let bounds = Vec2::new(800.0, 600.0);
    let mut p = particle_at(Vec2::new(100.0, 100.0), Vec2::ZERO);
    p.step(bounds, Vec2::new(150.0, 100.0), 160.0);
    let expected = (160.0 - 50.0) / 160.0 * ATTRACT_GAIN;
    assert!((p.vel.x - expected).abs() < 1e-6, "vx {}", p.vel.x);
    assert_eq!(p.vel.y, 0.0);
}

#[test]
fn attraction_is_stronger_when_closer() {
    let bounds = Vec2::new(800.0, 600.0);
    let pointer = Vec2::new(400.0, 300.0);
    let mut near = particle_at(Vec2::new(380.0, 300.0), Vec2::ZERO);
    let mut far = particle_at(Vec2::new(300.0, 300.0), Vec2::ZERO);
    near.step(bounds, pointer, 160.0);
    far.step(bounds, pointer, 160.0);
    assert!(near.vel.length() > far.vel.length());
    assert!(far.vel.x > 0.0);
}

#[test]
fn pointer_outside_radius_has_no_effect() {
    let bounds = Vec2::new(800.0, 600.0);
    let mut p = particle_at(Vec2::new(100.0, 100.0), Vec2::ZERO);
    p.step(bounds, Vec2::new(260.0, 100.0), 160.0);
    assert_eq!(p.vel, Vec2::ZERO);
}

#[test]
fn particle_under_pointer_stays_finite() {
    let bounds = Vec2::new(800.0, 600.0);
    let mut p = particle_at(Vec2::new(100.0, 100.0), Vec2::ZERO);
    p.step(bounds, Vec2::new(100.0, 100.0), 160.0);
    assert!(p.vel.is_finite());
    assert!(p.pos.is_finite());
}

#[test]
fn attraction_uses_post_reflection_velocity() {
    let bounds = Vec2::new(800.0, 600.0);
    let mut p = particle_at(Vec2::new(799.9, 300.0), Vec2::new(0.5, 0.0));
    p.step(bounds, Vec2::new(700.0, 300.0), 160.0);
    // bounced to -0.5 then pulled further left towards the pointer
    assert!(p.vel.x < -0.5);
}

#[test]
fn attraction_radius_scales_with_dpr() {
    let mut mesh = Mesh {
        particles: vec![particle_at(Vec2::new(1000.0, 1000.0), Vec2::ZERO)],
        bounds: Vec2::new(4000.0, 4000.0),
        dpr: 2.0,
    };
    // 200 device px away: outside 160 at dpr 1, inside 320 at dpr 2
    mesh.step(Vec2::new(1200.0, 1000.0));
    assert!(mesh.particles[0].vel.x > 0.0);
}

#[test]
fn link_opacity_falls_linearly_to_zero() {
    let t = 180.0;
    assert_eq!(link_opacity(0.0, t), Some(1.0));
    assert!((link_opacity(90.0, t).unwrap() - 0.5).abs() < 1e-6);
    assert!(link_opacity(179.99, t).unwrap() < 1e-3);
    assert_eq!(link_opacity(180.0, t), None);
    assert_eq!(link_opacity(500.0, t), None);

    let mut prev = 2.0;
    for d in 0..180 {
        let o = link_opacity(d as f32, t).unwrap();
        assert!(o < prev);
        prev = o;
    }
}

#[test]
fn links_only_join_close_pairs() {
    // threshold at dpr 2 is 360 device px
    let mesh = mesh_of(
        &[
            Vec2::new(0.0, 0.0),
            Vec2::new(300.0, 0.0),
            Vec2::new(1000.0, 0.0),
            Vec2::new(1360.0, 0.0),
        ],
        2.0,
    );
    let links = mesh.links();
    assert_eq!(links.len(), 1);
    let l = links[0];
    assert_eq!(l.from, Vec2::new(0.0, 0.0));
    assert_eq!(l.to, Vec2::new(300.0, 0.0));
    let expected = (1.0 - 300.0 / 360.0) * LINK_ALPHA_MAX;
    assert!((l.alpha - expected).abs() < 1e-6);
}

#[test]
fn links_cover_each_unordered_pair_once() {
    let mesh = mesh_of(
        &[
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
        ],
        1.0,
    );
    assert_eq!(mesh.links().len(), 3);
}

#[test]
fn pulse_stays_in_unit_range() {
    for step in 0..500 {
        let t = step as f64 * 37.0;
        let k = pulse(t, (step % 10) as f32 / 10.0);
        assert!((0.0..=1.0).contains(&k), "pulse {k}");
    }
}

#[test]
fn dots_oscillate_within_alpha_and_radius_bands() {
    let mesh = mesh_of(&[Vec2::new(5.0, 5.0)], 2.0);
    let base = mesh.particles[0].radius * 2.0;
    for step in 0..400 {
        let dot = mesh.dots(step as f64 * 16.7)[0];
        assert!(dot.alpha >= 0.55 - 1e-6 && dot.alpha <= 0.90 + 1e-6);
        let m = dot.radius / base;
        assert!(m >= 0.7 - 1e-5 && m <= 1.6 + 1e-5, "multiplier {m}");
    }
}

#[test]
fn stepping_never_changes_particle_count() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut mesh = Mesh::new(&Viewport::new(1280.0, 720.0, 1.0), &mut rng);
    for i in 0..300 {
        mesh.step(Vec2::new(i as f32, 300.0));
    }
    assert_eq!(mesh.particles.len(), 56);
    assert!(mesh.particles.iter().all(|p| p.pos.is_finite()));
}
