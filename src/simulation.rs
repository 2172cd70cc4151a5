//! The burst loop: one activation's lifecycle from spawn to empty.
//!
//! [`BurstLoop`] owns at most one [`Burst`] at a time and advances it once
//! per displayed frame. It never drives itself: the surrounding system owns
//! the frame source and wires it in through
//! [`FrameScheduler`](crate::FrameScheduler). The loop is a two-state
//! machine:
//!
//! ```text
//! Idle --activate--> Running --drained or deactivate--> Idle
//! ```
//!
//! Running means a burst exists and exactly one frame request is in flight.
//! Each activation mints a fresh [`FrameToken`]; a callback that arrives
//! with a token from an earlier burst (queued before a cancel or a
//! replacement) is discarded on entry, so frame sources that cannot unqueue
//! requests never resurrect old bursts.
//!
//! One loop per surface. The burst, the clock and the random source all
//! live inside the loop, so two surfaces can never alias each other's
//! state, and the borrow on `&mut BurstLoop` keeps every per-frame step
//! exclusive without any locking.

use glam::Vec2;
use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::particle::Burst;
use crate::render::draw_burst;
use crate::scheduler::{FrameScheduler, FrameToken};
use crate::spawn::spawn_burst_with;
use crate::style::{Style, StyleParams};
use crate::surface::Surface;
use crate::time::FrameClock;

/// The caller's activation state: an on/off flag plus a style choice.
///
/// [`BurstLoop::observe`] reacts to transitions of the armed style, so the
/// caller can feed its current state every update without retriggering a
/// running burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signal {
    /// Whether the triggering interaction is currently active.
    pub active: bool,
    /// Which style the interaction selects, if any.
    pub style: Option<Style>,
}

impl Signal {
    /// An inactive signal with no style.
    pub const OFF: Signal = Signal {
        active: false,
        style: None,
    };

    /// An active signal selecting `style`.
    pub fn active(style: Style) -> Self {
        Signal {
            active: true,
            style: Some(style),
        }
    }

    /// The style this signal currently calls for. Inactive signals arm
    /// nothing regardless of their style field.
    fn armed(&self) -> Option<Style> {
        if self.active {
            self.style
        } else {
            None
        }
    }
}

/// A running burst plus everything resolved at its activation.
struct ActiveBurst {
    burst: Burst,
    style: Style,
    params: StyleParams,
}

/// Owns and advances one burst per surface.
///
/// See the module docs for the state machine. All methods are cheap while
/// the loop is idle.
pub struct BurstLoop {
    active: Option<ActiveBurst>,
    clock: FrameClock,
    rng: SmallRng,
    /// Bumped whenever a burst starts or stops, invalidating the tokens of
    /// every frame requested before the bump.
    generation: u64,
    last_signal: Signal,
}

impl BurstLoop {
    /// Create a loop with an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Create a loop with a deterministic random source.
    ///
    /// Spawns and per-frame color rolls replay exactly for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            active: None,
            clock: FrameClock::new(),
            rng,
            generation: 0,
            last_signal: Signal::OFF,
        }
    }

    /// Whether a burst is currently running.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// The live burst, if any.
    pub fn burst(&self) -> Option<&Burst> {
        self.active.as_ref().map(|a| &a.burst)
    }

    /// The token that current frame requests carry.
    pub fn token(&self) -> FrameToken {
        FrameToken(self.generation)
    }

    /// The loop's frame clock, for fixed-delta stepping.
    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// Start a burst of `style` at `origin`, replacing any running burst.
    ///
    /// Spawns the particle set, restarts the frame clock so the first delta
    /// measures from now, and requests the first frame. Returns the token
    /// the new burst's frames will carry.
    pub fn activate(
        &mut self,
        style: Style,
        origin: Vec2,
        scheduler: &mut dyn FrameScheduler,
    ) -> FrameToken {
        self.activate_with(style, style.params(), origin, scheduler)
    }

    /// Start a burst with a caller-tuned parameter bundle.
    ///
    /// `style` still selects the draw rules; `params` replaces the bundle
    /// it would normally resolve to. A bundle with `count == 0` spawns
    /// nothing and the loop stays idle.
    pub fn activate_with(
        &mut self,
        style: Style,
        params: StyleParams,
        origin: Vec2,
        scheduler: &mut dyn FrameScheduler,
    ) -> FrameToken {
        self.retire(scheduler);

        let burst = spawn_burst_with(&params, origin, &mut self.rng);
        debug!(
            "burst activated: style={} particles={} origin=({}, {})",
            style,
            burst.len(),
            origin.x,
            origin.y
        );

        let token = self.token();
        if burst.is_empty() {
            return token;
        }

        self.active = Some(ActiveBurst {
            burst,
            style,
            params,
        });
        self.clock.restart();
        scheduler.request_frame(token);
        token
    }

    /// Cancel the running burst, if any.
    ///
    /// Takes effect synchronously: the pending frame request is canceled
    /// (best effort) and its token invalidated, the burst is dropped, and
    /// the surface is cleared when one is available. A callback already in
    /// flight arrives stale and is discarded.
    pub fn deactivate(
        &mut self,
        surface: Option<&mut dyn Surface>,
        scheduler: &mut dyn FrameScheduler,
    ) {
        if self.active.is_none() {
            return;
        }
        self.retire(scheduler);
        if let Some(surface) = surface {
            clear_all(surface);
        }
        debug!("burst deactivated");
    }

    /// Advance the running burst by one frame.
    ///
    /// The surrounding system calls this once per frame it granted through
    /// [`FrameScheduler::request_frame`], passing back the request's token.
    /// A stale token is a silent no-op. The step clears the surface,
    /// integrates and draws the survivors, culls, and either requests the
    /// next frame or goes idle once the burst has drained.
    ///
    /// `surface: None` means there is nothing to draw on right now (not
    /// mounted yet, or already torn down). The simulation still advances
    /// and keeps scheduling, so the burst finishes on its own either way.
    pub fn on_frame(
        &mut self,
        token: FrameToken,
        surface: Option<&mut dyn Surface>,
        scheduler: &mut dyn FrameScheduler,
    ) {
        if token != self.token() {
            trace!("discarding stale frame: {token:?}, current {:?}", self.token());
            return;
        }
        let Some(mut active) = self.active.take() else {
            return;
        };

        let dt = self.clock.tick();
        let mut surface = surface;

        if let Some(s) = surface.as_deref_mut() {
            clear_all(s);
        }

        active.burst.advance(&active.params, dt);
        if let Some(s) = surface.as_deref_mut() {
            draw_burst(&active.burst, active.style, s, &mut self.rng);
        }
        active.burst.cull();

        if active.burst.is_empty() {
            // Nothing was drawn this frame: a particle that died during the
            // step was already skipped by the renderer, so the surface holds
            // a bare clear.
            self.generation += 1;
            debug!("burst drained after {} frames", self.clock.frame());
        } else {
            self.active = Some(active);
            scheduler.request_frame(token);
        }
    }

    /// Feed the caller's current activation state.
    ///
    /// Acts only on transitions of the armed style: arming starts (or
    /// replaces) a burst at `origin`, disarming cancels. Feeding the same
    /// signal repeatedly does nothing, so callers may report state every
    /// update rather than edge-detect themselves.
    pub fn observe(
        &mut self,
        signal: Signal,
        origin: Vec2,
        surface: Option<&mut dyn Surface>,
        scheduler: &mut dyn FrameScheduler,
    ) {
        let was = self.last_signal.armed();
        let now = signal.armed();
        self.last_signal = signal;
        if was == now {
            return;
        }
        match now {
            Some(style) => {
                self.activate(style, origin, scheduler);
            }
            None => self.deactivate(surface, scheduler),
        }
    }

    /// Drop the running burst and invalidate its pending frame.
    fn retire(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.active.take().is_some() {
            scheduler.cancel_frame(FrameToken(self.generation));
        }
        self.generation += 1;
    }
}

impl Default for BurstLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Clear the surface's full logical extent.
fn clear_all(surface: &mut dyn Surface) {
    let size = surface.size();
    surface.clear(Vec2::ZERO, size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCmd, RecordingSurface};

    const ORIGIN: Vec2 = Vec2::new(160.0, 120.0);

    /// Records requests and cancels; tests hand tokens back manually.
    #[derive(Default)]
    struct StubScheduler {
        requested: Vec<FrameToken>,
        canceled: Vec<FrameToken>,
    }

    impl FrameScheduler for StubScheduler {
        fn request_frame(&mut self, token: FrameToken) {
            self.requested.push(token);
        }

        fn cancel_frame(&mut self, token: FrameToken) {
            self.canceled.push(token);
        }
    }

    fn fixed_loop(seed: u64) -> BurstLoop {
        let mut fx = BurstLoop::seeded(seed);
        fx.clock_mut().set_fixed_delta(Some(1.0 / 60.0));
        fx
    }

    #[test]
    fn test_activation_spawns_and_requests_first_frame() {
        let mut fx = fixed_loop(1);
        let mut sched = StubScheduler::default();

        let token = fx.activate(Style::Game, ORIGIN, &mut sched);

        assert!(fx.is_running());
        assert_eq!(fx.burst().map(Burst::len), Some(55));
        assert_eq!(sched.requested, vec![token]);
        assert!(sched.canceled.is_empty());
    }

    #[test]
    fn test_burst_runs_to_empty_and_goes_idle() {
        let mut fx = fixed_loop(2);
        let mut sched = StubScheduler::default();
        let mut surface = RecordingSurface::new(320.0, 240.0);

        fx.activate(Style::Game, ORIGIN, &mut sched);

        let mut frames = 0;
        while let Some(token) = sched.requested.pop() {
            fx.on_frame(token, Some(&mut surface), &mut sched);
            frames += 1;
            assert!(frames < 1000, "burst should drain");
        }

        assert!(!fx.is_running());
        assert!(fx.burst().is_none());
        // Life 1.0 fading at 1.35/s in 1/60 steps drains in 45 frames.
        assert_eq!(frames, 45);
        // The drain frame leaves a bare clear on the surface.
        assert!(matches!(surface.commands().last(), Some(DrawCmd::Clear { .. })));
        assert!(surface.frame_commands().is_empty());
    }

    #[test]
    fn test_frames_after_drain_are_discarded() {
        let mut fx = fixed_loop(3);
        let mut sched = StubScheduler::default();

        let token = fx.activate(Style::Game, ORIGIN, &mut sched);
        while let Some(token) = sched.requested.pop() {
            fx.on_frame(token, None, &mut sched);
        }
        assert!(!fx.is_running());

        // A duplicate delivery of the last token changes nothing.
        fx.on_frame(token, None, &mut sched);
        assert!(!fx.is_running());
        assert!(sched.requested.is_empty());
    }

    #[test]
    fn test_replacement_cancels_and_invalidates_previous_burst() {
        let mut fx = fixed_loop(4);
        let mut sched = StubScheduler::default();
        let mut surface = RecordingSurface::new(320.0, 240.0);

        let first = fx.activate(Style::Game, ORIGIN, &mut sched);
        let second = fx.activate(Style::Media, ORIGIN, &mut sched);

        assert_ne!(first, second);
        assert_eq!(sched.canceled, vec![first]);

        // The first burst's queued frame arrives anyway and is dropped.
        surface.reset();
        fx.on_frame(first, Some(&mut surface), &mut sched);
        assert!(surface.commands().is_empty());
        assert_eq!(fx.burst().map(Burst::len), Some(45));
    }

    #[test]
    fn test_deactivate_clears_surface_and_goes_idle() {
        let mut fx = fixed_loop(5);
        let mut sched = StubScheduler::default();
        let mut surface = RecordingSurface::new(320.0, 240.0);

        let token = fx.activate(Style::Media, ORIGIN, &mut sched);
        fx.on_frame(token, Some(&mut surface), &mut sched);

        fx.deactivate(Some(&mut surface), &mut sched);

        assert!(!fx.is_running());
        assert_eq!(sched.canceled, vec![token]);
        assert!(matches!(surface.commands().last(), Some(DrawCmd::Clear { .. })));
        assert!(surface.frame_commands().is_empty());
    }

    #[test]
    fn test_deactivate_when_idle_is_a_no_op() {
        let mut fx = fixed_loop(6);
        let mut sched = StubScheduler::default();
        let mut surface = RecordingSurface::new(320.0, 240.0);

        let before = fx.token();
        fx.deactivate(Some(&mut surface), &mut sched);

        assert_eq!(fx.token(), before);
        assert!(surface.commands().is_empty());
        assert!(sched.canceled.is_empty());
    }

    #[test]
    fn test_missing_surface_still_simulates_to_completion() {
        let mut fx = fixed_loop(7);
        let mut sched = StubScheduler::default();

        fx.activate(Style::Media, ORIGIN, &mut sched);

        let mut frames = 0;
        while let Some(token) = sched.requested.pop() {
            fx.on_frame(token, None, &mut sched);
            frames += 1;
            assert!(frames < 1000, "burst should drain without a surface");
        }

        assert!(!fx.is_running());
        // Nominally 50 frames at fade 1.2, but f32 rounding leaves a
        // sliver of life after the fiftieth step, so one extra frame runs.
        assert_eq!(frames, 51);
    }

    #[test]
    fn test_empty_bundle_stays_idle() {
        let mut fx = fixed_loop(8);
        let mut sched = StubScheduler::default();
        let params = StyleParams {
            count: 0,
            ..StyleParams::game()
        };

        fx.activate_with(Style::Game, params, ORIGIN, &mut sched);

        assert!(!fx.is_running());
        assert!(sched.requested.is_empty());
    }

    #[test]
    fn test_observe_acts_on_transitions_only() {
        let mut fx = fixed_loop(9);
        let mut sched = StubScheduler::default();
        let mut surface = RecordingSurface::new(320.0, 240.0);

        fx.observe(Signal::OFF, ORIGIN, Some(&mut surface), &mut sched);
        assert!(!fx.is_running());

        fx.observe(Signal::active(Style::Game), ORIGIN, Some(&mut surface), &mut sched);
        assert!(fx.is_running());
        assert_eq!(sched.requested.len(), 1);

        // Same signal again: no retrigger, no new request.
        fx.observe(Signal::active(Style::Game), ORIGIN, Some(&mut surface), &mut sched);
        assert_eq!(sched.requested.len(), 1);

        // Style change while armed replaces the burst.
        fx.observe(Signal::active(Style::Media), ORIGIN, Some(&mut surface), &mut sched);
        assert_eq!(fx.burst().map(Burst::len), Some(45));
        assert_eq!(sched.requested.len(), 2);

        fx.observe(Signal::OFF, ORIGIN, Some(&mut surface), &mut sched);
        assert!(!fx.is_running());
    }

    #[test]
    fn test_inactive_signal_style_is_ignored() {
        let mut fx = fixed_loop(10);
        let mut sched = StubScheduler::default();

        let off_with_style = Signal {
            active: false,
            style: Some(Style::Game),
        };
        fx.observe(off_with_style, ORIGIN, None, &mut sched);

        assert!(!fx.is_running());
        assert!(sched.requested.is_empty());
    }
}
