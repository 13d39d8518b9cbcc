//! Particle field simulation
//!
//! Owns the live particles and waves for one surface and advances them once
//! per frame. Each frame, every particle:
//!
//! 1. integrates its position and records it in its trail,
//! 2. feels the pointer force when within range,
//! 3. reflects off the surface edges (velocity flipped, position clamped),
//! 4. loses a fraction of its velocity to damping,
//! 5. fades if it came from a burst.
//!
//! Afterwards surplus particles (population above the target) are retired if
//! they have drifted past the retire margin or faded out completely, and the
//! waves advance.

use std::f64::consts::TAU;

use rand::Rng;
use rand::rngs::SmallRng;
use serde::Serialize;

use crate::animator::Scene;
use crate::color::Rgba;
use crate::config::{Backdrop, FieldConfig, PointerForce, SceneConfig, Span, WaveStyle};
use crate::error::ConfigResult;
use crate::geometry::{Point, Size};
use crate::particle::{Particle, Trail};
use crate::surface::Surface;
use crate::wave::{self, Wave};

/// Snapshot of a field's population, for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStats {
    pub frame: u64,
    pub particles: usize,
    /// Burst particles still fading out
    pub transient: usize,
    pub waves: usize,
    pub longest_trail: usize,
    pub mean_speed: f64,
}

/// Particle field with pointer interaction, trails, links and waves
pub struct ParticleField<R = SmallRng> {
    config: FieldConfig,
    size: Size,
    particles: Vec<Particle>,
    waves: Vec<Wave>,
    /// Last known pointer position; `None` before the first move or after leave
    pointer: Option<Point>,
    rng: R,
    frame: u64,
}

impl<R: Rng> ParticleField<R> {
    /// Validate the configuration and fill `size` with the target population
    pub fn new(config: FieldConfig, size: Size, rng: R) -> ConfigResult<Self> {
        config.validate()?;

        let mut field = Self {
            particles: Vec::with_capacity(config.target_count + config.burst.count),
            config,
            size: size.clamped(),
            waves: Vec::new(),
            pointer: None,
            rng,
            frame: 0,
        };
        field.populate();
        Ok(field)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Frames advanced since creation
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Replace all particles with a fresh target population
    pub fn populate(&mut self) {
        self.particles.clear();
        let width = Span::new(0.0, self.size.width);
        let height = Span::new(0.0, self.size.height);

        for _ in 0..self.config.target_count {
            let color = self.pick_color();
            let particle = Particle {
                x: width.sample(&mut self.rng),
                y: height.sample(&mut self.rng),
                speed_x: self.config.speed.sample(&mut self.rng),
                speed_y: self.config.speed.sample(&mut self.rng),
                radius: self.config.radius.sample(&mut self.rng),
                opacity: self.config.opacity.sample(&mut self.rng),
                color,
                fade: 0.0,
                trail: Trail::new(self.config.trail.cap),
            };
            self.particles.push(particle);
        }

        tracing::debug!(
            count = self.particles.len(),
            width = self.size.width,
            height = self.size.height,
            "populated particle field"
        );
    }

    /// Radial explosion of burst particles centered on `at`
    pub fn spawn_burst(&mut self, at: Point) {
        let burst = self.config.burst.clone();
        for i in 0..burst.count {
            let angle = TAU * i as f64 / burst.count as f64;
            let speed = burst.speed.sample(&mut self.rng);
            let color = self.pick_color();
            self.particles.push(Particle {
                x: at.x,
                y: at.y,
                speed_x: angle.cos() * speed,
                speed_y: angle.sin() * speed,
                radius: burst.radius.sample(&mut self.rng),
                opacity: burst.opacity.sample(&mut self.rng),
                color,
                fade: burst.fade,
                trail: Trail::new(self.config.trail.cap),
            });
        }
        tracing::trace!(x = at.x, y = at.y, count = burst.count, "burst");
    }

    /// Emit one wave centered on `at`
    pub fn spawn_wave(&mut self, at: Point) {
        let waves = &self.config.waves;
        let max_radius = waves.max_radius.sample(&mut self.rng);
        let speed = waves.speed.sample(&mut self.rng);
        let color = waves.palette[self.rng.gen_range(0..waves.palette.len())];
        self.waves
            .push(Wave::new(at, max_radius, speed, waves.opacity, waves.fade, color));
    }

    /// Record the pointer and maybe emit a wave; returns true if one was emitted
    pub fn pointer_move(&mut self, at: Point) -> bool {
        if !self.config.interactive {
            return false;
        }
        self.pointer = Some(at);
        if self.rng.gen_bool(self.config.waves.chance) {
            self.spawn_wave(at);
            return true;
        }
        false
    }

    /// Forget the pointer so it stops pushing particles
    pub fn pointer_leave(&mut self) {
        self.pointer = None;
    }

    /// A click always emits a wave and a burst
    pub fn click(&mut self, at: Point) {
        if !self.config.interactive {
            return;
        }
        self.spawn_wave(at);
        self.spawn_burst(at);
    }

    /// Advance every particle and wave by one frame
    pub fn update(&mut self) {
        let bounds = self.size;
        let damping = self.config.damping;
        let pointer = self.pointer.filter(|_| self.config.interactive);
        let push = &self.config.pointer;
        let strength = match push.force {
            PointerForce::Repel => push.strength,
            PointerForce::Attract => -push.strength,
        };

        for particle in &mut self.particles {
            particle.integrate();
            if let Some(origin) = pointer {
                particle.push_from(origin, push.radius, strength);
            }
            particle.reflect(bounds);
            particle.damp(damping);
            particle.fade_out();
        }

        self.retire_surplus();
        wave::advance_all(&mut self.waves);
        self.frame += 1;
    }

    /// Retire stray or faded particles while the population exceeds the target
    ///
    /// Reflection keeps integrated particles inside the bounds, so the margin
    /// test only catches particles placed or left outside by other means.
    fn retire_surplus(&mut self) {
        let mut excess = self
            .particles
            .len()
            .saturating_sub(self.config.target_count);
        if excess == 0 {
            return;
        }

        let bounds = self.size;
        let margin = self.config.retire_margin;
        self.particles.retain(|p| {
            let spent = p.is_transient() && p.opacity <= 0.0;
            if excess > 0 && (spent || bounds.is_far_outside(p.position(), margin)) {
                excess -= 1;
                false
            } else {
                true
            }
        });
    }

    /// Paint the current frame
    pub fn render(&self, surface: &mut dyn Surface) {
        match self.config.backdrop {
            Backdrop::Clear => surface.clear(),
            Backdrop::Fade { color, alpha } => {
                surface.fill_rect(Point::default(), self.size, color.with_alpha(alpha))
            }
        }

        self.render_waves(surface);
        self.render_links(surface);
        self.render_trails(surface);
        self.render_particles(surface);
    }

    fn render_waves(&self, surface: &mut dyn Surface) {
        let style = &self.config.waves;
        for wave in self.waves.iter().filter(|w| w.radius > 0.0) {
            let color = wave.color.with_alpha(wave.opacity);
            match style.style {
                WaveStyle::Ring => {
                    surface.stroke_circle(wave.origin, wave.radius, color, style.line_width)
                }
                WaveStyle::Glow => {
                    surface.fill_glow(wave.origin, wave.radius, color, wave.color.transparent())
                }
            }
        }
    }

    /// Lines between pairs closer than the link distance, fading with distance
    fn render_links(&self, surface: &mut dyn Surface) {
        let links = &self.config.links;
        if links.distance <= 0.0 || links.opacity <= 0.0 {
            return;
        }

        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.position().distance(b.position());
                if distance < links.distance {
                    let opacity = (1.0 - distance / links.distance) * links.opacity;
                    surface.line(
                        a.position(),
                        b.position(),
                        links.color.with_alpha(opacity),
                        links.width,
                    );
                }
            }
        }
    }

    /// Older trail points are fainter; the oldest is fully transparent and skipped
    fn render_trails(&self, surface: &mut dyn Surface) {
        let trail = &self.config.trail;
        for particle in &self.particles {
            let len = particle.trail.len() as f64;
            for (i, point) in particle.trail.iter().enumerate() {
                let alpha = i as f64 / len * particle.opacity * trail.opacity;
                if alpha <= 0.0 {
                    continue;
                }
                surface.fill_circle(
                    *point,
                    particle.radius * trail.scale,
                    particle.color.with_alpha(alpha),
                );
            }
        }
    }

    fn render_particles(&self, surface: &mut dyn Surface) {
        for particle in &self.particles {
            let center = particle.position();
            if self.config.glow_scale > 0.0 {
                surface.fill_glow(
                    center,
                    particle.radius * self.config.glow_scale,
                    particle.color.with_alpha(particle.opacity),
                    particle.color.transparent(),
                );
            }
            let core = if self.config.solid_core {
                particle.color
            } else {
                particle.color.with_alpha(particle.opacity)
            };
            surface.fill_circle(center, particle.radius, core);
        }
    }

    pub fn stats(&self) -> FieldStats {
        let count = self.particles.len();
        let mean_speed = if count == 0 {
            0.0
        } else {
            self.particles.iter().map(Particle::speed).sum::<f64>() / count as f64
        };

        FieldStats {
            frame: self.frame,
            particles: count,
            transient: self.particles.iter().filter(|p| p.is_transient()).count(),
            waves: self.waves.len(),
            longest_trail: self
                .particles
                .iter()
                .map(|p| p.trail.len())
                .max()
                .unwrap_or(0),
            mean_speed,
        }
    }

    fn pick_color(&mut self) -> Rgba {
        let palette = &self.config.palette;
        palette[self.rng.gen_range(0..palette.len())]
    }
}

impl<R: Rng> Scene for ParticleField<R> {
    fn step(&mut self) {
        self.update();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.render(surface);
    }

    /// Particles are regenerated for the new size; live waves carry over
    fn resize(&mut self, size: Size) {
        self.size = size.clamped();
        self.populate();
    }

    fn clear(&mut self) {
        self.particles.clear();
        self.waves.clear();
        self.pointer = None;
    }

    fn pointer_move(&mut self, at: Point) {
        ParticleField::pointer_move(self, at);
    }

    fn pointer_leave(&mut self) {
        ParticleField::pointer_leave(self);
    }

    fn click(&mut self, at: Point) {
        ParticleField::click(self, at);
    }
}
