//! Expanding, fading rings spawned by pointer interaction
//!
//! A wave only ever moves forward: its radius grows by `speed` and its
//! opacity drops by `fade` every frame until either bound is crossed, at
//! which point it is [`WaveState::Expired`] and gets dropped by its owner.

use crate::color::Rgba;
use crate::geometry::Point;

/// Lifecycle of a wave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveState {
    /// radius < max and opacity > 0
    Growing,
    /// One of the bounds was crossed; never returns to `Growing`
    Expired,
}

#[derive(Debug, Clone)]
pub struct Wave {
    pub origin: Point,
    pub radius: f64,
    pub max_radius: f64,
    pub speed: f64,
    pub opacity: f64,
    pub fade: f64,
    pub color: Rgba,
}

impl Wave {
    /// A new wave starts at radius 0
    pub fn new(
        origin: Point,
        max_radius: f64,
        speed: f64,
        opacity: f64,
        fade: f64,
        color: Rgba,
    ) -> Self {
        Self {
            origin,
            radius: 0.0,
            max_radius,
            speed,
            opacity: opacity.clamp(0.0, 1.0),
            fade,
            color,
        }
    }

    pub fn state(&self) -> WaveState {
        if self.radius >= self.max_radius || self.opacity <= 0.0 {
            WaveState::Expired
        } else {
            WaveState::Growing
        }
    }

    /// Advance one frame and report the resulting state
    pub fn advance(&mut self) -> WaveState {
        self.radius += self.speed.max(0.0);
        self.opacity = (self.opacity - self.fade.max(0.0)).max(0.0);
        self.state()
    }
}

/// Advance every wave and drop the ones that expired this frame
pub fn advance_all(waves: &mut Vec<Wave>) {
    waves.retain_mut(|wave| wave.advance() == WaveState::Growing);
}
