//! Particle and burst state.
//!
//! A [`Burst`] is the particle set created by one activation. It is owned by
//! the loop that spawned it, mutated in place every frame, and only ever
//! shrinks: dead particles are culled, new ones are never added.

use glam::Vec2;

use crate::style::StyleParams;

/// Whether a particle renders as a solid shape or an outline.
///
/// Decided once at spawn and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeVariant {
    /// Solid fill.
    Filled,
    /// Outline only. A hollow particle strokes on every frame, no matter
    /// what the frame's color roll picks.
    Hollow,
}

/// One transient visual particle, in surface-local coordinates.
///
/// Fields are public: a particle is plain state, and the interesting
/// behavior lives in [`Particle::advance`] and the loop around it. The y
/// axis grows downward, matching 2D canvas conventions, so gravity is a
/// positive acceleration.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in surface-local units.
    pub position: Vec2,
    /// Velocity in units/second.
    pub velocity: Vec2,
    /// Remaining life in [0, 1]. 1 = just spawned, 0 = dead.
    pub life: f32,
    /// Rendered size (square side or circle diameter), fixed at spawn.
    pub size: f32,
    /// Accumulated rotation in radians.
    pub rotation: f32,
    /// Spin in radians/second, fixed at spawn.
    pub angular_velocity: f32,
    /// Solid or outline, fixed at spawn.
    pub shape: ShapeVariant,
}

impl Particle {
    /// Integrate one physics step of `dt` seconds.
    ///
    /// Gravity first, then drag on both axes, then position and rotation,
    /// then the life fade. Drag is a per-frame retention factor tuned
    /// against a 60 fps reference, so it is exponentiated by `dt * 60`:
    /// two 8 ms steps bleed off exactly as much velocity as one 16 ms step.
    pub fn advance(&mut self, params: &StyleParams, dt: f32) {
        self.velocity.y += params.gravity * dt;

        let drag = params.drag.powf(dt * 60.0);
        self.velocity *= drag;

        self.position += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;
        self.life = (self.life - params.fade * dt).clamp(0.0, 1.0);
    }

    /// Whether the particle still simulates and renders.
    #[inline]
    pub fn alive(&self) -> bool {
        self.life > 0.0
    }
}

/// The particle set created by one activation.
///
/// Monotonically shrinking: [`Burst::cull`] removes dead particles and
/// nothing ever adds to a live burst. Survivors keep their relative order.
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    particles: Vec<Particle>,
}

impl Burst {
    /// Wrap a freshly spawned particle set. Bursts are created through
    /// [`spawn_burst`](crate::spawn_burst); the loop owns them from there.
    pub(crate) fn new(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Number of particles still alive in the set.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True once every particle has been culled.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The current particle set.
    pub fn particles(&self) -> &[Particle] {
        self.particles.as_slice()
    }

    /// Iterate over the current particle set.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Advance every particle by `dt` seconds.
    ///
    /// Particles never interact, so order does not matter.
    pub fn advance(&mut self, params: &StyleParams, dt: f32) {
        for particle in &mut self.particles {
            particle.advance(params, dt);
        }
    }

    /// Remove every particle whose life has run out.
    pub fn cull(&mut self) {
        self.particles.retain(Particle::alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_particle() -> Particle {
        Particle {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::new(200.0, -300.0),
            life: 1.0,
            size: 5.0,
            rotation: 0.0,
            angular_velocity: 2.0,
            shape: ShapeVariant::Filled,
        }
    }

    #[test]
    fn test_one_sixtieth_step_against_hand_computed_values() {
        let mut p = test_particle();
        let params = StyleParams::game();
        let dt = 1.0 / 60.0;

        p.advance(&params, dt);

        // Gravity then drag: vy = (-300 + 520/60) * 0.86, vx = 200 * 0.86.
        assert!((p.velocity.x - 172.0).abs() < 1e-3);
        assert!((p.velocity.y - -250.546_67).abs() < 1e-3);
        // Position integrates the post-drag velocity.
        assert!((p.position.x - 102.866_67).abs() < 1e-3);
        assert!((p.position.y - 95.824_22).abs() < 1e-3);
        // Rotation and fade.
        assert!((p.rotation - 2.0 / 60.0).abs() < 1e-6);
        assert!((p.life - 0.9775).abs() < 1e-6);
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let mut p = test_particle();
        let before = p.clone();

        p.advance(&StyleParams::game(), 0.0);

        assert_eq!(p, before);
    }

    #[test]
    fn test_life_decreases_monotonically_and_clamps_at_zero() {
        let mut p = test_particle();
        let params = StyleParams::media();
        let mut previous = p.life;

        for _ in 0..80 {
            p.advance(&params, 1.0 / 60.0);
            assert!(p.life <= previous);
            assert!(p.life >= 0.0);
            previous = p.life;
        }
        assert_eq!(p.life, 0.0);
    }

    #[test]
    fn test_fifty_media_steps_leave_a_sliver_of_life() {
        let mut p = test_particle();
        let params = StyleParams::media();

        // On paper, fade 1.2 drains life 1.0 in exactly 50 steps of 1/60.
        // In f32 the fiftieth step lands a hair above zero, so death comes
        // one frame late.
        for _ in 0..50 {
            p.advance(&params, 1.0 / 60.0);
        }
        assert!(p.alive());
        assert!(p.life < 1e-5);

        p.advance(&params, 1.0 / 60.0);
        assert!(!p.alive());
        assert_eq!(p.life, 0.0);
    }

    #[test]
    fn test_spawn_attributes_stay_fixed_during_advance() {
        let mut p = test_particle();
        p.shape = ShapeVariant::Hollow;

        for _ in 0..10 {
            p.advance(&StyleParams::media(), 1.0 / 60.0);
        }

        assert_eq!(p.size, 5.0);
        assert_eq!(p.angular_velocity, 2.0);
        assert_eq!(p.shape, ShapeVariant::Hollow);
    }

    #[test]
    fn test_cull_removes_only_dead_particles() {
        let mut alive = test_particle();
        alive.life = 0.4;
        let mut dead = test_particle();
        dead.life = 0.0;

        let mut burst = Burst::new(vec![alive.clone(), dead, alive.clone(), alive]);
        burst.cull();

        assert_eq!(burst.len(), 3);
        assert!(burst.iter().all(|p| p.alive()));
    }

    #[test]
    fn test_cull_preserves_survivor_order() {
        let mut burst = Burst::new(
            (0..6)
                .map(|i| {
                    let mut p = test_particle();
                    p.size = i as f32;
                    p.life = if i % 2 == 0 { 1.0 } else { 0.0 };
                    p
                })
                .collect(),
        );

        burst.cull();

        let sizes: Vec<f32> = burst.iter().map(|p| p.size).collect();
        assert_eq!(sizes, vec![0.0, 2.0, 4.0]);
    }
}
