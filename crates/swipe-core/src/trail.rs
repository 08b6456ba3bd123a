use std::time::{Duration, Instant};

use glam::Vec2;

use crate::color::Rgba;
use crate::particle::ParticleStyle;

/// Fewest points a finished gesture needs to be kept.
pub const MIN_TRAIL_POINTS: usize = 2;

/// The recorded path and styling of one gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: Vec<Vec2>,
    color: Rgba,
    style: ParticleStyle,
    started_at: Instant,
}

impl Trail {
    pub fn begin(start: Vec2, color: Rgba, style: ParticleStyle, now: Instant) -> Self {
        Self {
            points: vec![start],
            color,
            style,
            started_at: now,
        }
    }

    pub fn push(&mut self, point: Vec2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn style(&self) -> ParticleStyle {
        self.style
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn is_committable(&self) -> bool {
        self.points.len() >= MIN_TRAIL_POINTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_two_points_to_commit() {
        let now = Instant::now();
        let mut trail = Trail::begin(Vec2::ZERO, Rgba::WHITE, ParticleStyle::Star, now);
        assert!(!trail.is_committable());
        trail.push(Vec2::new(3.0, 4.0));
        assert!(trail.is_committable());
        assert_eq!(trail.points(), &[Vec2::ZERO, Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn age_saturates_for_earlier_instants() {
        let now = Instant::now();
        let trail = Trail::begin(Vec2::ZERO, Rgba::WHITE, ParticleStyle::Bubble, now);
        assert_eq!(trail.age(now + Duration::from_millis(250)), Duration::from_millis(250));
        assert_eq!(trail.age(now), Duration::ZERO);
    }
}
