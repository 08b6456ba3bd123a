//! Per-style shape generation and the frame renderer.

use std::f32::consts::PI;

use glam::Vec2;

use crate::canvas::{Canvas, RadialGradient, Shape};
use crate::color::Rgba;
use crate::particle::{Particle, ParticleStyle};

pub const STAR_SPIKES: usize = 5;
pub const STAR_INNER_RATIO: f32 = 0.5;
/// Offset of the bubble highlight focus, as a fraction of the particle size.
pub const BUBBLE_HIGHLIGHT_OFFSET: f32 = -0.3;

impl ParticleStyle {
    /// Shapes for one particle of this style, in the particle's local frame.
    pub fn shapes(self, size: f32, color: Rgba) -> Vec<Shape> {
        match self {
            ParticleStyle::Sparkle => sparkle(size, color),
            ParticleStyle::Bubble => bubble(size, color),
            ParticleStyle::Star => star(size, color),
        }
    }
}

fn sparkle(size: f32, color: Rgba) -> Vec<Shape> {
    let glow = RadialGradient::new(Vec2::ZERO, Vec2::ZERO, size)
        .with_stop(0.0, color)
        .with_stop(1.0, Rgba::TRANSPARENT);
    vec![
        Shape::GradientDisc { gradient: glow },
        Shape::Segments {
            segments: vec![
                [Vec2::new(-size, 0.0), Vec2::new(size, 0.0)],
                [Vec2::new(0.0, -size), Vec2::new(0.0, size)],
            ],
            color,
            width: 1.0,
        },
    ]
}

fn bubble(size: f32, color: Rgba) -> Vec<Shape> {
    let highlight = RadialGradient::new(Vec2::splat(BUBBLE_HIGHLIGHT_OFFSET * size), Vec2::ZERO, size)
        .with_stop(0.0, Rgba::WHITE.with_alpha(0.8))
        .with_stop(0.5, Rgba::WHITE.with_alpha(0.2))
        .with_stop(1.0, Rgba::TRANSPARENT);
    vec![
        Shape::Ring {
            center: Vec2::ZERO,
            radius: size,
            color,
            width: 2.0,
        },
        Shape::GradientDisc { gradient: highlight },
    ]
}

fn star(size: f32, color: Rgba) -> Vec<Shape> {
    vec![Shape::Polygon {
        points: star_points(size, size * STAR_INNER_RATIO),
        fill: Some(color),
        stroke: Some((color, 1.0)),
    }]
}

/// Alternating outer/inner vertices, starting on the +x axis.
pub fn star_points(outer: f32, inner: f32) -> Vec<Vec2> {
    (0..STAR_SPIKES * 2)
        .map(|i| {
            let angle = i as f32 * PI / STAR_SPIKES as f32;
            let radius = if i % 2 == 0 { outer } else { inner };
            Vec2::from_angle(angle) * radius
        })
        .collect()
}

/// Draws the fading afterimage overlay and then every live particle.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    fade: Rgba,
}

impl Renderer {
    pub fn new(fade_alpha: f32) -> Self {
        Self {
            fade: Rgba::BLACK.with_alpha(fade_alpha),
        }
    }

    pub fn fade_color(&self) -> Rgba {
        self.fade
    }

    pub fn render<C: Canvas + ?Sized>(&self, particles: &[Particle], canvas: &mut C) {
        canvas.fade(self.fade);
        for particle in particles {
            particle.draw(canvas);
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(0.02)
    }
}
