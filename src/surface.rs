//! Drawing surface abstraction
//!
//! Scenes draw through [`Surface`], which covers the handful of 2D canvas
//! operations they need. The browser crate implements it over
//! `CanvasRenderingContext2d`; [`RecordingSurface`](crate::headless::RecordingSurface)
//! implements it for tests and the CLI.

use crate::color::Rgba;
use crate::error::CanvasError;
use crate::geometry::{Point, Size};

/// Horizontal anchoring for [`Surface::fill_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Font and color for a text run
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand, e.g. `bold 12px monospace`
    pub font: String,
    pub color: Rgba,
    pub align: TextAlign,
}

/// A 2D drawing target with a logical (CSS pixel) coordinate space
///
/// Text is always vertically centered on `y`.
pub trait Surface {
    /// Logical size as of the last [`measure`](Surface::measure)
    fn size(&self) -> Size;

    /// Re-read the rendered size and resize the backing store to match
    fn measure(&mut self) -> Size;

    /// False once the surface has been removed from its document
    fn is_attached(&self) -> bool {
        true
    }

    /// Reset every pixel to transparent
    fn clear(&mut self);

    fn fill_rect(&mut self, origin: Point, size: Size, color: Rgba);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Rgba, width: f64);

    /// Filled circle shaded by a radial gradient from `inner` at the center to `outer` at the rim
    fn fill_glow(&mut self, center: Point, radius: f64, inner: Rgba, outer: Rgba);

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f64);

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}

/// Locates drawing surfaces by id
///
/// The browser implementation looks elements up in the document; a missing
/// element is [`CanvasError::SurfaceNotFound`] and an element without a 2D
/// context is [`CanvasError::NoDrawingContext`].
pub trait SurfaceProvider {
    type Surface: Surface;

    fn open(&self, id: &str) -> Result<Self::Surface, CanvasError>;
}
