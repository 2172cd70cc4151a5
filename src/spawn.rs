//! The particle factory.
//!
//! Turns a style and an origin point into the initial particle set of a
//! burst. Spawning is pure apart from the caller's [`Rng`]: feed a seeded
//! source and the same burst comes out every time, which is how the tests
//! here and in the loop pin down behavior.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use crate::particle::{Burst, Particle, ShapeVariant};
use crate::style::{Style, StyleParams};

// ========== Emission tuning ==========

// Angles are radians with 0 along +x and y growing downward, so the span
// below runs from just above the -x axis, through straight up at -PI/2, to
// just above the +x axis: a wide upward cone.
const EMIT_ANGLE_MIN: f32 = -0.9 * PI;
const EMIT_ANGLE_MAX: f32 = -0.1 * PI;

/// Uniform velocity jitter added on top of the cone draw, units/second.
const JITTER_X: f32 = 60.0;
const JITTER_Y: f32 = 40.0;

/// Angular velocity span, radians/second in either direction.
const MAX_SPIN: f32 = 6.0;

/// Create the particle set for one activation of `style` at `origin`.
pub fn spawn_burst<R: Rng + ?Sized>(style: Style, origin: Vec2, rng: &mut R) -> Burst {
    spawn_burst_with(&style.params(), origin, rng)
}

/// Like [`spawn_burst`], but with a caller-tuned parameter bundle.
pub fn spawn_burst_with<R: Rng + ?Sized>(
    params: &StyleParams,
    origin: Vec2,
    rng: &mut R,
) -> Burst {
    let particles = (0..params.count)
        .map(|_| spawn_particle(params, origin, rng))
        .collect();
    Burst::new(particles)
}

fn spawn_particle<R: Rng + ?Sized>(params: &StyleParams, origin: Vec2, rng: &mut R) -> Particle {
    let angle = rng.gen_range(EMIT_ANGLE_MIN..=EMIT_ANGLE_MAX);
    let speed = rng.gen_range(params.speed.clone());
    let velocity = Vec2::new(
        angle.cos() * speed + rng.gen_range(-JITTER_X..=JITTER_X),
        angle.sin() * speed + rng.gen_range(-JITTER_Y..=JITTER_Y),
    );

    let shape = if rng.gen_bool(params.hollow_chance) {
        ShapeVariant::Hollow
    } else {
        ShapeVariant::Filled
    };

    Particle {
        position: origin,
        velocity,
        life: 1.0,
        size: rng.gen_range(params.size.clone()),
        rotation: rng.gen_range(0.0..TAU),
        angular_velocity: rng.gen_range(-MAX_SPIN..=MAX_SPIN),
        shape,
    }
}
