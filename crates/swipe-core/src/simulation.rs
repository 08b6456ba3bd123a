//! Live particle set and retained trails, advanced once per displayed frame.
//!
//! Motion is integrated per frame rather than per elapsed second, so animation
//! speed follows the display refresh rate.

use std::time::{Duration, Instant};

use crate::particle::Particle;
use crate::trail::Trail;

#[derive(Debug, Clone)]
pub struct Simulation {
    particles: Vec<Particle>,
    trails: Vec<Trail>,
    retention: Duration,
}

impl Simulation {
    pub fn new(retention: Duration) -> Self {
        Self {
            particles: Vec::new(),
            trails: Vec::new(),
            retention,
        }
    }

    pub fn spawn(&mut self, particles: impl IntoIterator<Item = Particle>) {
        self.particles.extend(particles);
    }

    pub fn retain_trail(&mut self, trail: Trail) {
        self.trails.push(trail);
    }

    /// Advance every particle one frame, drop expired particles and trails
    /// older than the retention window.
    pub fn tick(&mut self, now: Instant) {
        self.particles.retain_mut(|particle| {
            particle.tick();
            !particle.is_expired()
        });
        let retention = self.retention;
        self.trails.retain(|trail| trail.age(now) < retention);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.trails.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Duration::from_millis(5000))
    }
}
