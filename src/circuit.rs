//! Synthetic quantum circuit diagram
//!
//! [`generate`] produces a random, time-sorted sequence of gate events laid
//! out on horizontal tracks. [`CircuitDiagram`] replays it with a vertical
//! progress line sweeping left to right and wrapping around.

use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::animator::Scene;
use crate::color::{Rgba, palette};
use crate::config::{CircuitConfig, SceneConfig};
use crate::error::ConfigResult;
use crate::geometry::{Point, Size};
use crate::surface::{Surface, TextAlign, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    Ry,
    Rz,
    Cnot,
    Cz,
}

impl GateKind {
    pub const SINGLE: [GateKind; 6] = [Self::H, Self::X, Self::Y, Self::Z, Self::Ry, Self::Rz];
    pub const DUAL: [GateKind; 2] = [Self::Cnot, Self::Cz];

    /// Text drawn inside the gate box
    pub fn label(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::Ry => "RY",
            Self::Rz => "RZ",
            Self::Cnot => "CNOT",
            Self::Cz => "CZ",
        }
    }

    /// Spans a control and a target track
    pub fn is_dual(self) -> bool {
        matches!(self, Self::Cnot | Self::Cz)
    }
}

/// One gate placed on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateEvent {
    pub kind: GateKind,
    /// Control track for dual gates
    pub track: usize,
    /// Present only for dual gates, never equal to `track`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<usize>,
    pub time: f64,
}

/// Draw `config.gate_count` random gates over `track_count` tracks, sorted by time
pub fn generate<R: Rng + ?Sized>(
    track_count: usize,
    config: &CircuitConfig,
    rng: &mut R,
) -> Vec<GateEvent> {
    let mut events = Vec::with_capacity(config.gate_count);
    if track_count == 0 {
        return events;
    }

    let mut time = 0.0;
    for _ in 0..config.gate_count {
        let event = if track_count > 1 && rng.gen_bool(config.dual_chance) {
            let kind = GateKind::DUAL[rng.gen_range(0..GateKind::DUAL.len())];
            let track = rng.gen_range(0..track_count);
            // Uniform over the other tracks
            let mut target = rng.gen_range(0..track_count - 1);
            if target >= track {
                target += 1;
            }
            GateEvent {
                kind,
                track,
                target: Some(target),
                time,
            }
        } else {
            GateEvent {
                kind: GateKind::SINGLE[rng.gen_range(0..GateKind::SINGLE.len())],
                track: rng.gen_range(0..track_count),
                target: None,
                time,
            }
        };
        events.push(event);
        time += config.time_step.sample(rng);
    }

    events.sort_by(|a, b| a.time.total_cmp(&b.time));
    events
}

const GATE_GLOW_RADIUS: f64 = 25.0;
const GATE_BOX: Size = Size {
    width: 40.0,
    height: 30.0,
};
const CONTROL_RADIUS: f64 = 6.0;
const CNOT_RADIUS: f64 = 10.0;
const CNOT_ARM: f64 = 5.0;
const CZ_RADIUS: f64 = 8.0;
const PLACEHOLDER: &str = "Quantum Circuit Visualizer";

/// Circuit replay scene
pub struct CircuitDiagram<R = SmallRng> {
    config: CircuitConfig,
    size: Size,
    events: Vec<GateEvent>,
    sweep: f64,
    rng: R,
}

impl<R: Rng> CircuitDiagram<R> {
    /// Validate the configuration and generate a first sequence
    pub fn new(config: CircuitConfig, size: Size, mut rng: R) -> ConfigResult<Self> {
        config.validate()?;
        let events = generate(config.tracks, &config, &mut rng);
        Ok(Self::with_events(config, size, events, rng))
    }

    /// Replay a fixed sequence; events are sorted by time
    pub fn with_events(
        config: CircuitConfig,
        size: Size,
        mut events: Vec<GateEvent>,
        rng: R,
    ) -> Self {
        events.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            config,
            size,
            events,
            sweep: 0.0,
            rng,
        }
    }

    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    pub fn events(&self) -> &[GateEvent] {
        &self.events
    }

    /// Current time of the progress line
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Timeline length: last gate time plus the tail, `None` without gates
    pub fn time_span(&self) -> Option<f64> {
        self.events
            .last()
            .map(|last| last.time + self.config.tail)
    }

    /// Draw a fresh sequence and restart the sweep
    pub fn regenerate(&mut self) {
        self.events = generate(self.config.tracks, &self.config, &mut self.rng);
        self.sweep = 0.0;
        tracing::debug!(gates = self.events.len(), "regenerated circuit");
    }

    pub fn advance(&mut self) {
        self.sweep += self.config.sweep_rate;
        if let Some(span) = self.time_span() {
            if self.sweep > span {
                self.sweep = 0.0;
            }
        }
    }

    fn track_y(&self, track: usize) -> f64 {
        let spacing = (self.size.height - 2.0 * self.config.padding)
            / self.config.tracks.saturating_sub(1).max(1) as f64;
        self.config.padding + track as f64 * spacing
    }

    fn time_x(&self, time: f64, span: f64) -> f64 {
        let span = if span > 0.0 { span } else { 1.0 };
        self.config.padding + time / span * (self.size.width - 2.0 * self.config.padding)
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();

        let Some(span) = self.time_span() else {
            let style = TextStyle {
                font: "20px sans-serif".to_string(),
                color: palette::INDIGO.with_alpha(0.5),
                align: TextAlign::Center,
            };
            let center = Point::new(self.size.width / 2.0, self.size.height / 2.0);
            surface.fill_text(PLACEHOLDER, center, &style);
            return;
        };

        let padding = self.config.padding;
        for track in 0..self.config.tracks {
            let y = self.track_y(track);
            surface.line(
                Point::new(padding, y),
                Point::new(self.size.width - padding, y),
                palette::INDIGO.with_alpha(0.3),
                2.0,
            );
        }

        let label = TextStyle {
            font: "bold 12px monospace".to_string(),
            color: palette::WHITE,
            align: TextAlign::Center,
        };
        for event in &self.events {
            let at = Point::new(self.time_x(event.time, span), self.track_y(event.track));
            self.draw_gate(surface, event, at, &label);
        }

        let x = self.time_x(self.sweep, span);
        surface.line(
            Point::new(x, padding),
            Point::new(x, self.size.height - padding),
            palette::PINK,
            3.0,
        );
    }

    fn draw_gate(
        &self,
        surface: &mut dyn Surface,
        event: &GateEvent,
        at: Point,
        label: &TextStyle,
    ) {
        surface.fill_glow(
            at,
            GATE_GLOW_RADIUS,
            palette::INDIGO.with_alpha(0.5),
            palette::INDIGO.transparent(),
        );
        surface.fill_rect(
            Point::new(at.x - GATE_BOX.width / 2.0, at.y - GATE_BOX.height / 2.0),
            GATE_BOX,
            palette::INDIGO,
        );
        surface.fill_text(event.kind.label(), at, label);

        let Some(target) = event.target.filter(|_| event.kind.is_dual()) else {
            return;
        };
        let accent: Rgba = palette::PINK;
        let target_at = Point::new(at.x, self.track_y(target));

        surface.fill_circle(at, CONTROL_RADIUS, accent);
        surface.line(at, target_at, accent.with_alpha(0.6), 2.0);
        match event.kind {
            GateKind::Cnot => {
                surface.stroke_circle(target_at, CNOT_RADIUS, accent, 2.0);
                surface.line(
                    Point::new(target_at.x - CNOT_ARM, target_at.y),
                    Point::new(target_at.x + CNOT_ARM, target_at.y),
                    accent,
                    2.0,
                );
                surface.line(
                    Point::new(target_at.x, target_at.y - CNOT_ARM),
                    Point::new(target_at.x, target_at.y + CNOT_ARM),
                    accent,
                    2.0,
                );
            }
            _ => surface.fill_circle(target_at, CZ_RADIUS, accent),
        }
    }
}

impl<R: Rng> Scene for CircuitDiagram<R> {
    fn step(&mut self) {
        self.advance();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.render(surface);
    }

    /// The layout depends on the size, so the whole sequence is redrawn from scratch
    fn resize(&mut self, size: Size) {
        self.size = size;
        self.regenerate();
    }

    fn clear(&mut self) {
        self.events.clear();
        self.sweep = 0.0;
    }
}
