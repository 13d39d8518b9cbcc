//! `requestAnimationFrame` as a [`FrameScheduler`]

use qcanvas::{FrameCallback, FrameHandle, FrameScheduler};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Schedules frames on the page's window
pub struct WindowScheduler {
    window: Window,
}

impl WindowScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        // Freed by the browser after it runs; a cancelled frame leaks its closure once
        let closure = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        match self
            .window
            .request_animation_frame(closure.unchecked_ref())
        {
            Ok(id) => FrameHandle(id),
            Err(err) => {
                tracing::warn!("requestAnimationFrame failed: {err:?}");
                // rAF ids start at 1, so 0 never cancels a real request
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if handle.0 != 0 {
            self.window.cancel_animation_frame(handle.0).ok();
        }
    }
}
