//! One tick of particle motion.

use crate::particle::{Bounds, Particle};
use crate::pointer::Pointer;

/// How far past an edge a particle may drift before wrapping around.
pub const WRAP_MARGIN: f32 = 20.0;
/// Particles closer than this to the pointer are pushed away.
pub const POINTER_RADIUS: f32 = 160.0;
/// Push strength at zero distance, per 60fps frame.
pub const POINTER_FORCE: f32 = 0.28;
/// Per-axis velocity bound applied while a pointer is present.
pub const MAX_VELOCITY: f32 = 2.0;
/// Floor for the particle–pointer distance.
pub const MIN_DISTANCE: f32 = 1e-4;

/// Fraction of the gap to the wander target closed every tick.
const WANDER_BLEND: f32 = 0.005;
const WANDER_AMPLITUDE: f32 = 0.02;
const WANDER_FREQUENCY: f32 = 0.001;

/// Advance every particle by one tick.
///
/// `scale` is the elapsed time in 60fps frames and `time_secs` the simulation
/// clock feeding the wander term.
pub fn step(
    particles: &mut [Particle],
    pointer: Option<Pointer>,
    scale: f32,
    bounds: Bounds,
    time_secs: f32,
) {
    for p in particles.iter_mut() {
        p.x += p.vx * scale;
        p.y += p.vy * scale;
        p.x = wrap(p.x, bounds.width);
        p.y = wrap(p.y, bounds.height);

        let (tx, ty) = wander_target(p.x, p.y, time_secs);
        p.vx += (tx - p.vx) * WANDER_BLEND;
        p.vy += (ty - p.vy) * WANDER_BLEND;

        // Velocities are only bounded while a pointer is around.
        if let Some(pointer) = pointer {
            if let Some((fx, fy)) = pointer_push(p.x - pointer.x, p.y - pointer.y, scale) {
                p.vx += fx;
                p.vy += fy;
            }
            p.vx = p.vx.clamp(-MAX_VELOCITY, MAX_VELOCITY);
            p.vy = p.vy.clamp(-MAX_VELOCITY, MAX_VELOCITY);
        }
    }
}

/// Velocity change for a particle displaced by (`dx`, `dy`) from the pointer,
/// or `None` when it is out of reach.
pub fn pointer_push(dx: f32, dy: f32, scale: f32) -> Option<(f32, f32)> {
    let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
    if dist >= POINTER_RADIUS {
        return None;
    }
    let magnitude = push_magnitude(dist, scale);
    Some((dx / dist * magnitude, dy / dist * magnitude))
}

/// Strength of the pointer push at `dist`, falling linearly to zero at
/// [`POINTER_RADIUS`].
pub fn push_magnitude(dist: f32, scale: f32) -> f32 {
    let dist = dist.max(MIN_DISTANCE);
    if dist >= POINTER_RADIUS {
        return 0.0;
    }
    (POINTER_RADIUS - dist) / POINTER_RADIUS * POINTER_FORCE * scale
}

fn wander_target(x: f32, y: f32, time_secs: f32) -> (f32, f32) {
    (
        ((x + time_secs) * WANDER_FREQUENCY).sin() * WANDER_AMPLITUDE,
        ((y - time_secs) * WANDER_FREQUENCY).cos() * WANDER_AMPLITUDE,
    )
}

/// Toroidal wrap with a margin on both sides of `[0, extent]`.
fn wrap(v: f32, extent: f32) -> f32 {
    if v < -WRAP_MARGIN {
        extent + WRAP_MARGIN
    } else if v > extent + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        v
    }
}
