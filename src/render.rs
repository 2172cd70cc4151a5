//! Per-style draw rules: post-step particle state in, surface calls out.

use glam::Vec2;
use rand::Rng;

use crate::particle::{Burst, ShapeVariant};
use crate::style::{Style, GAME_COLOR, MEDIA_COOL, MEDIA_HOT};
use crate::surface::Surface;

/// Stroke width of hollow media particles, surface units.
const HOLLOW_STROKE_WIDTH: f32 = 2.0;

/// Draw every live particle of `burst` onto `surface`.
///
/// Game bursts are solid white squares of side `size`, rotated per
/// particle. Media bursts are circles of diameter `size` whose hot/cool
/// [`ColorPair`](crate::ColorPair) is rolled fresh per particle per frame;
/// hollow particles stroke, solid ones fill. Opacity is the particle's
/// remaining life either way. Rendering never mutates the burst.
pub(crate) fn draw_burst<R: Rng + ?Sized>(
    burst: &Burst,
    style: Style,
    surface: &mut dyn Surface,
    rng: &mut R,
) {
    for particle in burst.iter() {
        if !particle.alive() {
            continue;
        }
        match style {
            Style::Game => {
                surface.fill_rect(
                    particle.position,
                    Vec2::splat(particle.size),
                    particle.rotation,
                    GAME_COLOR,
                    particle.life,
                );
            }
            Style::Media => {
                let pair = if rng.gen_bool(0.5) { MEDIA_HOT } else { MEDIA_COOL };
                let radius = particle.size / 2.0;
                match particle.shape {
                    ShapeVariant::Hollow => surface.stroke_circle(
                        particle.position,
                        radius,
                        pair.stroke,
                        particle.life,
                        HOLLOW_STROKE_WIDTH,
                    ),
                    ShapeVariant::Filled => {
                        surface.fill_circle(particle.position, radius, pair.fill, particle.life)
                    }
                }
            }
        }
    }
}
