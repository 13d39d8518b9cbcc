//! DOM event wiring
//!
//! Each [`Listener`] removes itself from its target when dropped, so a
//! mounted canvas releases all of its handlers on destroy.

use std::rc::{Rc, Weak};

use qcanvas::{Animator, Point, Scene};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use crate::scheduler::WindowScheduler;
use crate::surface::CanvasSurface;

pub type WebAnimator<A> = Animator<A, CanvasSurface, WindowScheduler>;

/// A registered event handler, unregistered on drop
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
            .ok();
    }
}

/// Convert viewport coordinates to canvas-local ones
pub fn local_point(client_x: f64, client_y: f64, left: f64, top: f64) -> Point {
    Point::new(client_x - left, client_y - top)
}

fn event_point(canvas: &HtmlCanvasElement, event: &Event) -> Option<Point> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    let rect = canvas.get_bounding_client_rect();
    Some(local_point(
        f64::from(mouse.client_x()),
        f64::from(mouse.client_y()),
        rect.left(),
        rect.top(),
    ))
}

/// Forward pointer events on `canvas` to the animator
pub fn pointer_listeners<A: Scene + 'static>(
    canvas: &HtmlCanvasElement,
    animator: &Rc<WebAnimator<A>>,
) -> Result<Vec<Listener>, JsValue> {
    let target: &EventTarget = canvas.as_ref();

    let on_move = {
        let (canvas, animator) = (canvas.clone(), Rc::downgrade(animator));
        move |event: Event| {
            if let (Some(animator), Some(at)) = (animator.upgrade(), event_point(&canvas, &event)) {
                animator.pointer_move(at);
            }
        }
    };
    let on_click = {
        let (canvas, animator) = (canvas.clone(), Rc::downgrade(animator));
        move |event: Event| {
            if let (Some(animator), Some(at)) = (animator.upgrade(), event_point(&canvas, &event)) {
                animator.click(at);
            }
        }
    };
    let on_leave = {
        let animator: Weak<WebAnimator<A>> = Rc::downgrade(animator);
        move |_: Event| {
            if let Some(animator) = animator.upgrade() {
                animator.pointer_leave();
            }
        }
    };

    Ok(vec![
        Listener::new(target, "mousemove", on_move)?,
        Listener::new(target, "click", on_click)?,
        Listener::new(target, "mouseleave", on_leave)?,
    ])
}

/// Re-measure the animator's surface whenever the window resizes
pub fn resize_listener<A: Scene + 'static>(
    window: &Window,
    animator: &Rc<WebAnimator<A>>,
) -> Result<Listener, JsValue> {
    let animator = Rc::downgrade(animator);
    Listener::new(window.as_ref(), "resize", move |_| {
        if let Some(animator) = animator.upgrade() {
            animator.resize();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_point_subtracts_canvas_origin() {
        assert_eq!(local_point(150.0, 90.0, 100.0, 40.0), Point::new(50.0, 50.0));
        assert_eq!(local_point(10.0, 10.0, 20.0, 0.0), Point::new(-10.0, 10.0));
    }
}
