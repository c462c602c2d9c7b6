// Tuning constants for the particle mesh. Lengths are logical (CSS) pixels
// unless the name says otherwise; they are scaled by the device pixel ratio
// wherever they are compared against particle positions.

// Particle budget
pub const NARROW_VIEWPORT_PX: f32 = 720.0; // below this width the mesh is thinned out
pub const PARTICLES_NARROW: usize = 32;
pub const PARTICLES_WIDE: usize = 56;

// Spawn ranges (half-open)
pub const SPEED_MIN: f32 = 0.2; // device px per frame
pub const SPEED_MAX: f32 = 0.8;
pub const RADIUS_MIN: f32 = 1.2;
pub const RADIUS_MAX: f32 = 3.4;

/// Node colours; particles pick one uniformly at spawn.
pub const PALETTE: [&str; 4] = ["#6c5ce7", "#32e0c4", "#4ea8de", "#f1f2f6"];

// Pulse: p = (sin(t_ms * RATE + phase) + 1) / 2
pub const PULSE_RATE_PER_MS: f64 = 0.002;
pub const PULSE_ALPHA_BASE: f32 = 0.55;
pub const PULSE_ALPHA_SPAN: f32 = 0.35;
pub const PULSE_RADIUS_BASE: f32 = 0.7;
pub const PULSE_RADIUS_SPAN: f32 = 0.9;

// Pointer attraction
pub const ATTRACT_RADIUS_PX: f32 = 160.0;
pub const ATTRACT_GAIN: f32 = 0.08;

// Links between nearby nodes
pub const LINK_DISTANCE_PX: f32 = 180.0;
pub const LINK_ALPHA_MAX: f32 = 0.6;
pub const LINK_WIDTH_PX: f32 = 0.8;
pub const LINK_RGB: [u8; 3] = [108, 92, 231];

// Ambient pointer glow
pub const GLOW_RADIUS_FRACTION: f32 = 0.9; // of canvas width
/// (offset, rgb, alpha) colour stops, core to edge.
pub const GLOW_STOPS: [(f32, [u8; 3], f32); 3] = [
    (0.0, [108, 92, 231], 0.18), // violet core
    (0.4, [41, 128, 185], 0.12), // blue
    (1.0, [11, 16, 38], 0.05),   // near-transparent dark edge
];

// Reveal
pub const REVEAL_THRESHOLD: f64 = 0.2; // fraction of the element's area
pub const REVEAL_RATIO_EPSILON: f64 = 1e-3; // observers report crossings slightly under the threshold
pub const REVEAL_VIEWPORT_COVERAGE: f64 = 0.5; // or this much of the viewport, for tall elements
