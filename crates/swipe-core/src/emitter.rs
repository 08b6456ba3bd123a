//! Turns one pointer movement segment into particles.
//!
//! Spawn count follows the distance travelled rather than the event rate, so a
//! fast swipe delivered as a single move still leaves a continuous trail.

use glam::Vec2;

use crate::color::Rgba;
use crate::config::EmitterConfig;
use crate::particle::{Particle, ParticleStyle};
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emitter {
    /// Distance between spawned particles.
    pub spacing: f32,
    /// Maximum per-axis offset from the sampled point.
    pub jitter: f32,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            spacing: 5.0,
            jitter: 5.0,
        }
    }
}

impl From<&EmitterConfig> for Emitter {
    fn from(config: &EmitterConfig) -> Self {
        Self {
            spacing: config.spacing,
            jitter: config.jitter,
        }
    }
}

impl Emitter {
    /// Number of particles for a segment of `distance`; never zero.
    pub fn count(&self, distance: f32) -> usize {
        ((distance / self.spacing).floor() as usize).max(1)
    }

    pub fn emit<R: RandomSource + ?Sized>(
        &self,
        start: Vec2,
        end: Vec2,
        color: Rgba,
        style: ParticleStyle,
        rng: &mut R,
    ) -> Vec<Particle> {
        let count = self.count(start.distance(end));
        (0..count)
            .map(|i| {
                let t = i as f32 / count as f32;
                let base = start.lerp(end, t);
                let offset = Vec2::new(rng.signed(self.jitter), rng.signed(self.jitter));
                Particle::spawn(base + offset, color, style, rng)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRandom, SeededRandom};

    #[test]
    fn one_particle_per_spacing() {
        let emitter = Emitter::default();
        assert_eq!(emitter.count(0.0), 1);
        assert_eq!(emitter.count(4.99), 1);
        assert_eq!(emitter.count(5.0), 1);
        assert_eq!(emitter.count(10.0), 2);
        assert_eq!(emitter.count(50.0), 10);
        assert_eq!(emitter.count(54.0), 10);
    }

    #[test]
    fn horizontal_segment_without_jitter_is_evenly_spaced() {
        let mut rng = ScriptedRandom::constant(0.5);
        let particles = Emitter::default().emit(
            Vec2::ZERO,
            Vec2::new(50.0, 0.0),
            Rgba::WHITE,
            ParticleStyle::Sparkle,
            &mut rng,
        );
        assert_eq!(particles.len(), 10);
        for (i, p) in particles.iter().enumerate() {
            assert!((p.pos.x - 5.0 * i as f32).abs() < 1e-4, "particle {i} at {}", p.pos);
        }
        assert!(particles.iter().all(|p| p.pos.y == 0.0));
    }

    #[test]
    fn jittered_segment_stays_within_bounds() {
        let mut rng = SeededRandom::new(42);
        let particles = Emitter::default().emit(
            Vec2::ZERO,
            Vec2::new(50.0, 0.0),
            Rgba::WHITE,
            ParticleStyle::Bubble,
            &mut rng,
        );
        assert_eq!(particles.len(), 10);
        for p in &particles {
            assert!((-5.0..=55.0).contains(&p.pos.x));
            assert!((-5.0..=5.0).contains(&p.pos.y));
            assert_eq!(p.style, ParticleStyle::Bubble);
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn zero_length_segment_spawns_one_particle() {
        let point = Vec2::new(120.0, 80.0);
        let mut rng = SeededRandom::new(3);
        let particles =
            Emitter::default().emit(point, point, Rgba::BLACK, ParticleStyle::Star, &mut rng);
        assert_eq!(particles.len(), 1);
        let offset = particles[0].pos - point;
        assert!(offset.x.abs() <= 5.0 && offset.y.abs() <= 5.0);
    }

    #[test]
    fn extreme_jitter_samples_hit_the_bounds() {
        let mut rng = ScriptedRandom::constant(0.0);
        let particles = Emitter::default().emit(
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 10.0),
            Rgba::WHITE,
            ParticleStyle::Star,
            &mut rng,
        );
        assert_eq!(particles[0].pos, Vec2::new(5.0, 5.0));
    }
}
