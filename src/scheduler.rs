//! Frame scheduling capability
//!
//! Animators never call the host's animation-frame API directly; they are
//! handed a [`FrameScheduler`] instead. The browser crate wraps
//! `requestAnimationFrame`, and [`ManualScheduler`](crate::headless::ManualScheduler)
//! lets tests and the CLI step frames by hand.

/// Callback run once on the next frame, given a timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Opaque id of a pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

pub trait FrameScheduler {
    /// Run `callback` once before the next repaint
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Drop a pending request; unknown or already-run handles are ignored
    fn cancel_frame(&self, handle: FrameHandle);
}
