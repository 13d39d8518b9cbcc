//! Small 2D value types shared by the scenes and surfaces.

use serde::{Deserialize, Serialize};

/// A point in canvas-local logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Logical size of a drawing surface (CSS pixels, before device scaling)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The same size with each side forced finite and non-negative
    ///
    /// Negative, NaN and infinite extents collapse to zero.
    pub fn clamped(&self) -> Self {
        let side = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self::new(side(self.width), side(self.height))
    }

    /// Whether a point lies outside the surface by more than `margin` on any side
    pub fn is_far_outside(&self, p: Point, margin: f64) -> bool {
        p.x < -margin || p.x > self.width + margin || p.y < -margin || p.y > self.height + margin
    }
}
