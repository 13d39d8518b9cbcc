//! Frame loop runtime shared by every scene
//!
//! An [`Animator`] owns one drawing surface and one [`Scene`]. Once started it
//! asks its [`FrameScheduler`] for a frame, steps and draws the scene when the
//! frame fires, and asks again. Pointer and resize notifications are applied
//! to the scene immediately and show up on the next frame.
//!
//! State lives behind `Rc<RefCell<_>>`; pending frame callbacks only hold a
//! weak reference, so dropping the animator also ends its loop.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::error::CanvasError;
use crate::geometry::{Point, Size};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::{Surface, SurfaceProvider};

/// Something an [`Animator`] can step and draw
pub trait Scene {
    /// Advance one frame
    fn step(&mut self);

    /// Paint the current state
    fn draw(&self, surface: &mut dyn Surface);

    /// The surface was re-measured
    fn resize(&mut self, size: Size);

    /// Drop all live entities
    fn clear(&mut self);

    fn pointer_move(&mut self, _at: Point) {}

    fn pointer_leave(&mut self) {}

    fn click(&mut self, _at: Point) {}
}

struct State<A, S> {
    scene: A,
    surface: S,
    pending: Option<FrameHandle>,
    running: bool,
    destroyed: bool,
    frames: u64,
}

/// Drives a scene on a surface through an injected frame scheduler
pub struct Animator<A, S, F>
where
    A: Scene + 'static,
    S: Surface + 'static,
    F: FrameScheduler + 'static,
{
    id: String,
    state: Rc<RefCell<State<A, S>>>,
    scheduler: Rc<F>,
}

impl<A, S, F> Animator<A, S, F>
where
    A: Scene + 'static,
    S: Surface + 'static,
    F: FrameScheduler + 'static,
{
    /// Open the surface `id`, build the scene for its measured size and start the loop
    pub fn create<P, B, E>(
        provider: &P,
        id: &str,
        scheduler: F,
        build: B,
    ) -> Result<Self, CanvasError>
    where
        P: SurfaceProvider<Surface = S>,
        B: FnOnce(Size) -> Result<A, E>,
        E: Into<CanvasError>,
    {
        let mut surface = provider.open(id)?;
        let size = surface.measure();
        let scene = build(size).map_err(Into::into)?;

        let animator = Self::new(id, scene, surface, scheduler);
        animator.start();
        tracing::debug!(id, width = size.width, height = size.height, "animator created");
        Ok(animator)
    }

    /// Wrap an already-built scene and surface without starting the loop
    pub fn new(id: &str, scene: A, surface: S, scheduler: F) -> Self {
        Self {
            id: id.to_string(),
            state: Rc::new(RefCell::new(State {
                scene,
                surface,
                pending: None,
                running: false,
                destroyed: false,
                frames: 0,
            })),
            scheduler: Rc::new(scheduler),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Begin requesting frames; no-op if already running or destroyed
    pub fn start(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.running || state.destroyed {
                return;
            }
            state.running = true;
        }
        request_next(&self.state, &self.scheduler);
    }

    /// Stop the loop for good and release the scene's entities
    ///
    /// Safe to call repeatedly; after it returns no frame callback will draw.
    pub fn destroy(&self) {
        let mut state = self.state.borrow_mut();
        if state.destroyed {
            return;
        }
        state.destroyed = true;
        state.running = false;
        if let Some(handle) = state.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        state.scene.clear();
        tracing::debug!(id = %self.id, frames = state.frames, "animator destroyed");
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.state.borrow().frames
    }

    pub fn size(&self) -> Size {
        self.state.borrow().surface.size()
    }

    /// Borrow the surface the scene draws on
    pub fn surface(&self) -> Ref<'_, S> {
        Ref::map(self.state.borrow(), |state| &state.surface)
    }

    /// Borrow the scene, e.g. to inspect its entities
    pub fn scene(&self) -> Ref<'_, A> {
        Ref::map(self.state.borrow(), |state| &state.scene)
    }

    pub fn pointer_move(&self, at: Point) {
        self.with_live_scene(|scene| scene.pointer_move(at));
    }

    pub fn pointer_leave(&self) {
        self.with_live_scene(|scene| scene.pointer_leave());
    }

    pub fn click(&self, at: Point) {
        self.with_live_scene(|scene| scene.click(at));
    }

    /// Re-measure the surface and let the scene rebuild for the new size
    pub fn resize(&self) {
        let mut state = self.state.borrow_mut();
        if state.destroyed {
            return;
        }
        let size = state.surface.measure();
        state.scene.resize(size);
        tracing::debug!(id = %self.id, width = size.width, height = size.height, "resized");
    }

    fn with_live_scene(&self, f: impl FnOnce(&mut A)) {
        let mut state = self.state.borrow_mut();
        if !state.destroyed {
            f(&mut state.scene);
        }
    }
}

impl<A, S, F> Drop for Animator<A, S, F>
where
    A: Scene + 'static,
    S: Surface + 'static,
    F: FrameScheduler + 'static,
{
    fn drop(&mut self) {
        self.destroy();
    }
}

fn request_next<A, S, F>(state: &Rc<RefCell<State<A, S>>>, scheduler: &Rc<F>)
where
    A: Scene + 'static,
    S: Surface + 'static,
    F: FrameScheduler + 'static,
{
    let weak: Weak<RefCell<State<A, S>>> = Rc::downgrade(state);
    let sched = Rc::clone(scheduler);
    let handle = scheduler.request_frame(Box::new(move |_timestamp| {
        if let Some(state) = weak.upgrade() {
            run_frame(&state, &sched);
        }
    }));
    state.borrow_mut().pending = Some(handle);
}

fn run_frame<A, S, F>(state: &Rc<RefCell<State<A, S>>>, scheduler: &Rc<F>)
where
    A: Scene + 'static,
    S: Surface + 'static,
    F: FrameScheduler + 'static,
{
    {
        let mut guard = state.borrow_mut();
        guard.pending = None;
        if guard.destroyed || !guard.running {
            return;
        }
        if !guard.surface.is_attached() {
            guard.running = false;
            tracing::debug!("surface detached, stopping frame loop");
            return;
        }

        let State { scene, surface, .. } = &mut *guard;
        scene.step();
        scene.draw(surface);
        guard.frames += 1;
    }
    request_next(state, scheduler);
}
