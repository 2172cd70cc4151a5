//! # popfx - Pop FX
//!
//! Short-lived 2D particle bursts for interactive surfaces, with no opinion
//! about how you draw or when frames happen.
//!
//! popfx plays the little celebration that fires when a user clicks an
//! interactive element: a one-shot set of particles spawns at the click
//! point, flies up and outward, falls, fades and disappears, usually in
//! under a second. The crate owns the particle math and the burst
//! lifecycle; the surrounding system supplies a drawing [`Surface`] and a
//! [`FrameScheduler`], which is what keeps the core portable across canvas,
//! GPU and terminal backends.
//!
//! ## Quick Start
//!
//! ```ignore
//! use popfx::prelude::*;
//!
//! let mut fx = BurstLoop::new();
//!
//! // Interaction handler: start a burst where the user clicked.
//! fx.activate(Style::Game, Vec2::new(click_x, click_y), &mut scheduler);
//!
//! // Frame callback: hand the token back, the loop does the rest.
//! fx.on_frame(token, Some(&mut surface), &mut scheduler);
//! ```
//!
//! Callers that would rather report state than detect edges can feed
//! [`BurstLoop::observe`] every update with a [`Signal`] and let the loop
//! spot the transitions.
//!
//! ## Core Concepts
//!
//! ### Styles
//!
//! A [`Style`] picks the whole personality of a burst: particle count,
//! emission envelope, gravity, drag, fade rate and draw rules. Styles
//! resolve to a [`StyleParams`] bundle once at activation; tweak a preset
//! and pass it to [`BurstLoop::activate_with`] for a custom burst.
//!
//! ### The loop
//!
//! [`BurstLoop`] is a two-state machine (idle or running one burst) that
//! advances the burst once per granted frame: clear, integrate, draw,
//! cull, request the next frame. When the last particle dies the loop
//! goes idle on its own. Activating while running replaces the burst, and
//! the stale frame request is invalidated through its [`FrameToken`].
//!
//! ### The seams
//!
//! | Seam | Trait | Supplied by |
//! |------|-------|-------------|
//! | Drawing | [`Surface`] | canvas/GPU/terminal backend |
//! | Frame timing | [`FrameScheduler`] | vsync callback, timer, test harness |
//!
//! Both are object-safe and take `&mut self`, so the whole crate runs
//! single-threaded with no interior mutability.

mod error;
mod particle;
mod render;
pub mod scheduler;
mod simulation;
mod spawn;
pub mod style;
pub mod surface;
pub mod time;

pub use error::ParseStyleError;
pub use glam::{Vec2, Vec3};
pub use particle::{Burst, Particle, ShapeVariant};
pub use scheduler::{FrameScheduler, FrameToken};
pub use simulation::{BurstLoop, Signal};
pub use spawn::{spawn_burst, spawn_burst_with};
pub use style::{parse_selector, ColorPair, Style, StyleParams};
pub use surface::{DrawCmd, RecordingSurface, Surface};
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use popfx::prelude::*;
/// ```
pub mod prelude {
    pub use crate::particle::{Burst, Particle, ShapeVariant};
    pub use crate::scheduler::{FrameScheduler, FrameToken};
    pub use crate::simulation::{BurstLoop, Signal};
    pub use crate::spawn::{spawn_burst, spawn_burst_with};
    pub use crate::style::{parse_selector, ColorPair, Style, StyleParams};
    pub use crate::surface::{DrawCmd, RecordingSurface, Surface};
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3};
}
