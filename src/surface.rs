//! The drawing-surface seam.
//!
//! The burst core never owns a canvas, window or GPU context. It emits draw
//! calls through the [`Surface`] trait and the surrounding system maps them
//! onto whatever 2D context it has. Coordinates are surface-local logical
//! units; pixel-density scaling belongs to the provider.
//!
//! [`RecordingSurface`] is a ready-made implementation that captures the
//! call stream instead of rasterizing, for tests and headless runs.

use glam::{Vec2, Vec3};

/// A canvas-like 2D drawing context supplied by the caller.
///
/// Colors are linear RGB in [0, 1] with opacity passed per call. Rectangles
/// rotate around their own center. `size` must report the current logical
/// size on every call; the core never caches it, so resizing the backing
/// canvas mid-burst is fine.
pub trait Surface {
    /// Current logical width and height.
    fn size(&self) -> Vec2;

    /// Clear the region with top-left corner `origin` and extent `size`.
    fn clear(&mut self, origin: Vec2, size: Vec2);

    /// Fill a rectangle centered at `center`, rotated by `rotation` radians.
    fn fill_rect(&mut self, center: Vec2, size: Vec2, rotation: f32, color: Vec3, opacity: f32);

    /// Fill a circle of `radius` around `center`.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3, opacity: f32);

    /// Stroke the outline of a circle of `radius` around `center`.
    fn stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Vec3,
        opacity: f32,
        width: f32,
    );
}

/// One recorded draw call. See [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        origin: Vec2,
        size: Vec2,
    },
    FillRect {
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Vec3,
        opacity: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Vec3,
        opacity: f32,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: Vec3,
        opacity: f32,
        width: f32,
    },
}

/// A [`Surface`] that records every call instead of rasterizing.
///
/// The crate's own tests drive a [`BurstLoop`](crate::BurstLoop) against one
/// of these and assert on the command stream.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Vec2,
    commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    /// Create a recording surface with the given logical size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    /// All commands recorded so far, in call order.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Commands recorded since the most recent clear, i.e. the frame
    /// currently on screen.
    pub fn frame_commands(&self) -> &[DrawCmd] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCmd::Clear { .. }))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Drop the recorded history. The surface keeps its size.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Change the reported logical size, as a resize of the backing canvas
    /// would.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, origin: Vec2, size: Vec2) {
        self.commands.push(DrawCmd::Clear { origin, size });
    }

    fn fill_rect(&mut self, center: Vec2, size: Vec2, rotation: f32, color: Vec3, opacity: f32) {
        self.commands.push(DrawCmd::FillRect {
            center,
            size,
            rotation,
            color,
            opacity,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3, opacity: f32) {
        self.commands.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
            opacity,
        });
    }

    fn stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Vec3,
        opacity: f32,
        width: f32,
    ) {
        self.commands.push(DrawCmd::StrokeCircle {
            center,
            radius,
            color,
            opacity,
            width,
        });
    }
}
