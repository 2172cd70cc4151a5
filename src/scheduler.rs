//! Frame scheduling seam.
//!
//! The burst loop never drives itself. The surrounding system owns a frame
//! source (a vsync callback, a display-link timer, a test harness stepping
//! manually) and the loop registers interest in the next frame through
//! [`FrameScheduler`]. Every request carries a [`FrameToken`]; the loop
//! hands the token back when the frame fires and discards it if the burst
//! it belonged to has since been replaced or canceled. Schedulers that
//! cannot unqueue a request are therefore still safe to use.

/// Identifies which burst a frame request belongs to.
///
/// Opaque to the scheduler: store it with the request and hand it back
/// unchanged via [`BurstLoop::on_frame`](crate::BurstLoop::on_frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub(crate) u64);

/// A frame source owned by the surrounding system.
///
/// The contract mirrors display-frame callbacks: at most one callback per
/// request, delivered on the same thread, never while another frame is
/// still running.
pub trait FrameScheduler {
    /// Register interest in exactly one future frame.
    fn request_frame(&mut self, token: FrameToken);

    /// Cancel a pending request, best effort.
    ///
    /// Schedulers that cannot unqueue may keep this default no-op; a
    /// callback that fires anyway arrives with a stale token and the loop
    /// drops it.
    fn cancel_frame(&mut self, token: FrameToken) {
        let _ = token;
    }
}
