//! Particles and their motion trails

use std::collections::VecDeque;

use crate::color::Rgba;
use crate::geometry::{Point, Size};

/// Bounded history of recent positions, oldest first
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<Point>,
    cap: usize,
}

impl Trail {
    pub fn new(cap: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Append a position, evicting the oldest entries past the cap
    pub fn push(&mut self, p: Point) {
        if self.cap == 0 {
            return;
        }
        self.points.push_back(p);
        while self.points.len() > self.cap {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Positions from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

/// A single point particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    /// Core radius, always > 0
    pub radius: f64,
    /// In [0, 1]
    pub opacity: f64,
    pub color: Rgba,
    /// Opacity lost per frame (0 for resting particles)
    pub fade: f64,
    pub trail: Trail,
}

impl Particle {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether this particle came from a burst and is fading out
    pub fn is_transient(&self) -> bool {
        self.fade > 0.0
    }

    /// Advance position by velocity and record it in the trail
    pub fn integrate(&mut self) {
        self.x += self.speed_x;
        self.y += self.speed_y;
        self.trail.push(self.position());
    }

    /// Nudge velocity along the unit vector from `origin` to this particle
    ///
    /// `strength` is scaled by `(radius - d) / radius`; a negative strength
    /// pulls toward `origin`. Particles outside `radius`, or exactly on the
    /// origin, are left alone.
    pub fn push_from(&mut self, origin: Point, radius: f64, strength: f64) {
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance >= radius || distance == 0.0 {
            return;
        }

        let force = (radius - distance) / radius;
        self.speed_x += dx / distance * force * strength;
        self.speed_y += dy / distance * force * strength;
    }

    /// Reflect off the surface edges, clamping back inside
    ///
    /// Returns true if either axis bounced.
    pub fn reflect(&mut self, bounds: Size) -> bool {
        let mut bounced = false;
        if self.x < 0.0 || self.x > bounds.width {
            self.speed_x = -self.speed_x;
            self.x = self.x.clamp(0.0, bounds.width.max(0.0));
            bounced = true;
        }
        if self.y < 0.0 || self.y > bounds.height {
            self.speed_y = -self.speed_y;
            self.y = self.y.clamp(0.0, bounds.height.max(0.0));
            bounced = true;
        }
        bounced
    }

    pub fn damp(&mut self, factor: f64) {
        self.speed_x *= factor;
        self.speed_y *= factor;
    }

    /// Apply the per-frame opacity decay, never dropping below zero
    pub fn fade_out(&mut self) {
        if self.fade > 0.0 {
            self.opacity = (self.opacity - self.fade).max(0.0);
        }
    }

    pub fn speed(&self) -> f64 {
        (self.speed_x * self.speed_x + self.speed_y * self.speed_y).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;

    fn particle_at(x: f64, y: f64) -> Particle {
        Particle {
            x,
            y,
            speed_x: 0.0,
            speed_y: 0.0,
            radius: 2.0,
            opacity: 0.5,
            color: palette::INDIGO,
            fade: 0.0,
            trail: Trail::new(3),
        }
    }

    #[test]
    fn trail_evicts_oldest() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            trail.push(Point::new(i as f64, 0.0));
        }
        assert_eq!(trail.len(), 3);
        let xs: Vec<f64> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn zero_cap_trail_stays_empty() {
        let mut trail = Trail::new(0);
        trail.push(Point::new(1.0, 1.0));
        assert!(trail.is_empty());
    }

    #[test]
    fn integrate_moves_and_records() {
        let mut p = particle_at(10.0, 10.0);
        p.speed_x = 1.5;
        p.speed_y = -0.5;
        p.integrate();
        assert_eq!(p.position(), Point::new(11.5, 9.5));
        assert_eq!(p.trail.iter().last(), Some(&Point::new(11.5, 9.5)));
    }

    #[test]
    fn push_from_repels_inside_radius() {
        let mut p = particle_at(60.0, 50.0);
        p.push_from(Point::new(50.0, 50.0), 100.0, 0.05);
        // (100 - 10) / 100 * 0.05 along +x
        assert!((p.speed_x - 0.045).abs() < 1e-12);
        assert_eq!(p.speed_y, 0.0);
    }

    #[test]
    fn negative_strength_attracts() {
        let mut p = particle_at(60.0, 50.0);
        p.push_from(Point::new(50.0, 50.0), 100.0, -0.05);
        assert!(p.speed_x < 0.0);
    }

    #[test]
    fn push_from_ignores_far_and_coincident() {
        let mut far = particle_at(300.0, 50.0);
        far.push_from(Point::new(50.0, 50.0), 100.0, 0.05);
        assert_eq!(far.speed_x, 0.0);

        let mut on_top = particle_at(50.0, 50.0);
        on_top.push_from(Point::new(50.0, 50.0), 100.0, 0.05);
        assert_eq!(on_top.speed_x, 0.0);
        assert!(on_top.speed_y.is_finite());
    }

    #[test]
    fn reflect_flips_and_clamps() {
        let bounds = Size::new(400.0, 300.0);

        let mut p = particle_at(-3.0, 100.0);
        p.speed_x = -2.0;
        assert!(p.reflect(bounds));
        assert_eq!(p.x, 0.0);
        assert_eq!(p.speed_x, 2.0);

        let mut p = particle_at(100.0, 310.0);
        p.speed_y = 4.0;
        assert!(p.reflect(bounds));
        assert_eq!(p.y, 300.0);
        assert_eq!(p.speed_y, -4.0);

        let mut inside = particle_at(100.0, 100.0);
        inside.speed_x = 1.0;
        assert!(!inside.reflect(bounds));
        assert_eq!(inside.speed_x, 1.0);
    }

    #[test]
    fn fade_out_floors_at_zero() {
        let mut p = particle_at(0.0, 0.0);
        p.opacity = 0.015;
        p.fade = 0.01;
        p.fade_out();
        p.fade_out();
        assert_eq!(p.opacity, 0.0);
    }
}
