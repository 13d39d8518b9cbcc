//! Off-screen implementations of the host capabilities
//!
//! Used by the CLI and the test suites to drive scenes without a browser:
//! [`RecordingSurface`] logs draw calls as [`DrawCommand`]s,
//! [`HeadlessSurfaces`] hands them out by id, and [`ManualScheduler`] runs
//! frame callbacks only when told to.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::color::Rgba;
use crate::error::CanvasError;
use crate::geometry::{Point, Size};
use crate::scheduler::{FrameCallback, FrameHandle, FrameScheduler};
use crate::surface::{Surface, SurfaceProvider, TextAlign, TextStyle};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        origin: Point,
        size: Size,
        color: Rgba,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        color: Rgba,
        width: f64,
    },
    FillGlow {
        center: Point,
        radius: f64,
        inner: Rgba,
        outer: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f64,
    },
    FillText {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear => write!(f, "clear"),
            Self::FillRect { origin, size, color } => write!(
                f,
                "rect {},{} {}x{} {}",
                origin.x, origin.y, size.width, size.height, color
            ),
            Self::FillCircle { center, radius, color } => {
                write!(f, "circle {},{} r{} {}", center.x, center.y, radius, color)
            }
            Self::StrokeCircle {
                center,
                radius,
                color,
                width,
            } => write!(
                f,
                "ring {},{} r{} {} w{}",
                center.x, center.y, radius, color, width
            ),
            Self::FillGlow {
                center,
                radius,
                inner,
                outer,
            } => write!(
                f,
                "glow {},{} r{} {} -> {}",
                center.x, center.y, radius, inner, outer
            ),
            Self::Line {
                from,
                to,
                color,
                width,
            } => write!(
                f,
                "line {},{} -> {},{} {} w{}",
                from.x, from.y, to.x, to.y, color, width
            ),
            Self::FillText { text, at, style } => {
                let align = match style.align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                };
                write!(
                    f,
                    "text {:?} {},{} [{}] {} {}",
                    text, at.x, at.y, style.font, style.color, align
                )
            }
        }
    }
}

/// Surface that records every call instead of painting
///
/// Clones share the same log and layout, so a test can keep a handle to a
/// surface it has given away.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    commands: Rc<RefCell<Vec<DrawCommand>>>,
    /// What a real host would report as the rendered size
    layout: Rc<Cell<Size>>,
    attached: Rc<Cell<bool>>,
    size: Size,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            commands: Rc::new(RefCell::new(Vec::new())),
            layout: Rc::new(Cell::new(size)),
            attached: Rc::new(Cell::new(true)),
            size,
        }
    }

    /// Drain the log
    pub fn take_commands(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.commands.borrow().clone()
    }

    pub fn command_count(&self) -> usize {
        self.commands.borrow().len()
    }

    /// The log rendered one command per line
    pub fn transcript(&self) -> String {
        self.commands
            .borrow()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Change the size the next [`measure`](Surface::measure) will see
    pub fn set_layout_size(&self, size: Size) {
        self.layout.set(size);
    }

    /// Simulate removal from the document
    pub fn detach(&self) {
        self.attached.set(false);
    }

    fn record(&mut self, command: DrawCommand) {
        self.commands.borrow_mut().push(command);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn measure(&mut self) -> Size {
        self.size = self.layout.get();
        self.size
    }

    fn is_attached(&self) -> bool {
        self.attached.get()
    }

    fn clear(&mut self) {
        self.record(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, origin: Point, size: Size, color: Rgba) {
        self.record(DrawCommand::FillRect { origin, size, color });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.record(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Rgba, width: f64) {
        self.record(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    fn fill_glow(&mut self, center: Point, radius: f64, inner: Rgba, outer: Rgba) {
        self.record(DrawCommand::FillGlow {
            center,
            radius,
            inner,
            outer,
        });
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f64) {
        self.record(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.record(DrawCommand::FillText {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
    }
}

/// In-memory registry of surfaces keyed by id
///
/// An id registered with [`with_blank`](Self::with_blank) exists but has no
/// drawing context.
#[derive(Debug, Default)]
pub struct HeadlessSurfaces {
    entries: BTreeMap<String, Option<RecordingSurface>>,
}

impl HeadlessSurfaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_surface(mut self, id: &str, size: Size) -> Self {
        self.entries
            .insert(id.to_string(), Some(RecordingSurface::new(size)));
        self
    }

    pub fn with_blank(mut self, id: &str) -> Self {
        self.entries.insert(id.to_string(), None);
        self
    }

    /// Shared handle to the surface registered under `id`
    pub fn recorder(&self, id: &str) -> Option<RecordingSurface> {
        self.entries.get(id).cloned().flatten()
    }
}

impl SurfaceProvider for HeadlessSurfaces {
    type Surface = RecordingSurface;

    fn open(&self, id: &str) -> Result<RecordingSurface, CanvasError> {
        match self.entries.get(id) {
            Some(Some(surface)) => Ok(surface.clone()),
            Some(None) => Err(CanvasError::NoDrawingContext(id.to_string())),
            None => Err(CanvasError::SurfaceNotFound(id.to_string())),
        }
    }
}

#[derive(Default)]
struct Queue {
    next_id: i32,
    now: f64,
    pending: Vec<(FrameHandle, FrameCallback)>,
}

/// Scheduler whose frames only fire on [`tick`](Self::tick)
///
/// Clones share one queue. Callbacks requested while a tick is running wait
/// for the next tick.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Queue>>,
}

impl ManualScheduler {
    /// Nominal frame interval used by [`run_frames`](Self::run_frames)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Requests waiting for the next tick
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Fire every callback queued before this call; returns how many ran
    pub fn tick(&self, timestamp: f64) -> usize {
        let due = {
            let mut queue = self.queue.borrow_mut();
            queue.now = timestamp;
            std::mem::take(&mut queue.pending)
        };
        let count = due.len();
        for (_, callback) in due {
            callback(timestamp);
        }
        count
    }

    /// Tick `frames` times at a 60 Hz cadence
    pub fn run_frames(&self, frames: usize) {
        for _ in 0..frames {
            let next = self.queue.borrow().now + Self::FRAME_MS;
            self.tick(next);
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let handle = FrameHandle(queue.next_id);
        queue.pending.push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue
            .borrow_mut()
            .pending
            .retain(|(pending, _)| *pending != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;

    #[test]
    fn clones_share_the_log() {
        let surface = RecordingSurface::new(Size::new(10.0, 10.0));
        let mut writer = surface.clone();
        writer.clear();
        writer.fill_circle(Point::new(1.0, 2.0), 3.0, palette::PINK);

        assert_eq!(surface.command_count(), 2);
        assert_eq!(surface.take_commands()[0], DrawCommand::Clear);
        assert_eq!(writer.command_count(), 0);
    }

    #[test]
    fn transcript_lists_commands() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        surface.fill_rect(
            Point::new(0.0, 0.0),
            Size::new(10.0, 10.0),
            palette::BLACK.with_alpha(0.05),
        );
        surface.line(
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            palette::INDIGO.with_alpha(0.3),
            1.0,
        );

        insta::assert_snapshot!(surface.transcript(), @r"
        rect 0,0 10x10 rgba(0, 0, 0, 0.05)
        line 0,0 -> 3,4 rgba(99, 102, 241, 0.3) w1
        ");
    }

    #[test]
    fn measure_picks_up_layout_changes() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        surface.set_layout_size(Size::new(20.0, 5.0));
        assert_eq!(surface.size(), Size::new(10.0, 10.0));
        assert_eq!(surface.measure(), Size::new(20.0, 5.0));
        assert_eq!(surface.size(), Size::new(20.0, 5.0));
    }

    #[test]
    fn provider_distinguishes_missing_and_blank() {
        let surfaces = HeadlessSurfaces::new()
            .with_surface("ok", Size::new(1.0, 1.0))
            .with_blank("div");

        assert!(surfaces.open("ok").is_ok());
        assert!(matches!(surfaces.open("div"), Err(CanvasError::NoDrawingContext(_))));
        assert!(matches!(surfaces.open("gone"), Err(CanvasError::SurfaceNotFound(_))));
    }

    #[test]
    fn scheduler_runs_only_on_tick() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(0.0));
        let seen = Rc::clone(&fired);
        scheduler.request_frame(Box::new(move |ts| seen.set(ts)));

        assert_eq!(scheduler.pending(), 1);
        assert_eq!(fired.get(), 0.0);
        assert_eq!(scheduler.tick(16.0), 1);
        assert_eq!(fired.get(), 16.0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn cancelled_frames_never_fire() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let seen = Rc::clone(&fired);
        let handle = scheduler.request_frame(Box::new(move |_| seen.set(true)));
        scheduler.cancel_frame(handle);
        scheduler.cancel_frame(FrameHandle(999));

        assert_eq!(scheduler.tick(1.0), 0);
        assert!(!fired.get());
    }

    #[test]
    fn requests_made_during_a_tick_wait_for_the_next() {
        let scheduler = ManualScheduler::new();
        let inner = scheduler.clone();
        scheduler.request_frame(Box::new(move |_| {
            inner.request_frame(Box::new(|_| {}));
        }));

        assert_eq!(scheduler.tick(1.0), 1);
        assert_eq!(scheduler.pending(), 1);
    }
}
