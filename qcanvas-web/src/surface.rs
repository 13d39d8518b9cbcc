//! 2D canvas surface
//!
//! Implements the core [`Surface`] over `CanvasRenderingContext2d`. Drawing
//! happens in CSS pixels; the backing store is sized for the device pixel
//! ratio and the context transform maps one to the other.

use std::f64::consts::TAU;

use qcanvas::color::Rgba;
use qcanvas::surface::{TextAlign, TextStyle};
use qcanvas::{CanvasError, Point, Size, Surface, SurfaceProvider};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Device pixel ratio to use for a reported value; missing or bogus ratios become 1
pub fn effective_dpr(reported: f64) -> f64 {
    if reported.is_finite() && reported > 0.0 {
        reported
    } else {
        1.0
    }
}

/// Backing-store pixels for a CSS extent at the given ratio
pub fn backing_extent(css: f64, dpr: f64) -> u32 {
    let pixels = (css * dpr).round();
    if pixels.is_finite() && pixels > 0.0 {
        pixels as u32
    } else {
        0
    }
}

/// A canvas element and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Size,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, id: &str) -> Result<Self, CanvasError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| CanvasError::NoDrawingContext(id.to_string()))?;

        Ok(Self {
            canvas,
            ctx,
            size: Size::default(),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn arc(&self, center: Point, radius: f64) {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x, center.y, radius.max(0.0), 0.0, TAU)
            .ok();
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn measure(&mut self) -> Size {
        let rect = self.canvas.get_bounding_client_rect();
        let dpr = effective_dpr(
            web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0),
        );

        self.canvas.set_width(backing_extent(rect.width(), dpr));
        self.canvas.set_height(backing_extent(rect.height(), dpr));
        // Resizing the backing store resets the transform, so set it rather than scale
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok();

        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", rect.width())).ok();
        style.set_property("height", &format!("{}px", rect.height())).ok();

        self.size = Size::new(rect.width(), rect.height());
        self.size
    }

    fn is_attached(&self) -> bool {
        self.canvas.is_connected()
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.width, self.size.height);
    }

    fn fill_rect(&mut self, origin: Point, size: Size, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(origin.x, origin.y, size.width, size.height);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.arc(center, radius);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Rgba, width: f64) {
        self.arc(center, radius);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn fill_glow(&mut self, center: Point, radius: f64, inner: Rgba, outer: Rgba) {
        let Ok(gradient) = self
            .ctx
            .create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius.max(0.0))
        else {
            return;
        };
        gradient.add_color_stop(0.0, &inner.to_css()).ok();
        gradient.add_color_stop(1.0, &outer.to_css()).ok();

        self.arc(center, radius);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill();
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.ctx.set_font(&style.font);
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&style.color.to_css());
        self.ctx.fill_text(text, at.x, at.y).ok();
    }
}

/// Looks canvases up by element id in a document
pub struct DocumentSurfaces {
    document: Document,
}

impl DocumentSurfaces {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Surfaces of the current page, if there is one
    pub fn current() -> Option<Self> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
    }
}

impl SurfaceProvider for DocumentSurfaces {
    type Surface = CanvasSurface;

    fn open(&self, id: &str) -> Result<CanvasSurface, CanvasError> {
        let element = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| CanvasError::SurfaceNotFound(id.to_string()))?;
        // Anything other than a canvas has no 2D context to offer
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| CanvasError::NoDrawingContext(id.to_string()))?;
        CanvasSurface::new(canvas, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dpr_falls_back_to_one() {
        assert_eq!(effective_dpr(2.0), 2.0);
        assert_eq!(effective_dpr(0.0), 1.0);
        assert_eq!(effective_dpr(-1.5), 1.0);
        assert_eq!(effective_dpr(f64::NAN), 1.0);
    }

    #[test]
    fn backing_store_scales_and_rounds() {
        assert_eq!(backing_extent(400.0, 1.0), 400);
        assert_eq!(backing_extent(400.0, 2.0), 800);
        assert_eq!(backing_extent(333.3, 1.5), 500);
        assert_eq!(backing_extent(0.0, 2.0), 0);
        assert_eq!(backing_extent(f64::INFINITY, 1.0), 0);
    }
}
