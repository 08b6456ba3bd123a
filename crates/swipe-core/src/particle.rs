use std::f32::consts::TAU;
use std::ops::Range;

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, Shape};
use crate::color::Rgba;
use crate::rng::RandomSource;

/// Velocity multiplier applied every tick.
pub const FRICTION: f32 = 0.98;
pub const DECAY_RANGE: Range<f32> = 0.02..0.04;
pub const SIZE_RANGE: Range<f32> = 2.0..6.0;
/// Per-axis speed bound at spawn, in units per frame.
pub const MAX_SPEED: f32 = 1.0;
/// Rotation speed bound at spawn, in radians per frame.
pub const MAX_SPIN: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleStyle {
    Sparkle,
    Bubble,
    Star,
}

impl ParticleStyle {
    pub const ALL: [ParticleStyle; 3] = [Self::Sparkle, Self::Bubble, Self::Star];

    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.pick(Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgba,
    pub style: ParticleStyle,
    /// Remaining life in `[0, 1]`; drives opacity and size.
    pub life: f32,
    pub decay: f32,
    pub size: f32,
    pub base_size: f32,
    pub rotation: f32,
    pub spin: f32,
}

impl Particle {
    pub fn spawn<R: RandomSource + ?Sized>(
        pos: Vec2,
        color: Rgba,
        style: ParticleStyle,
        rng: &mut R,
    ) -> Self {
        let vel = Vec2::new(rng.signed(MAX_SPEED), rng.signed(MAX_SPEED));
        let decay = rng.range(DECAY_RANGE.start, DECAY_RANGE.end);
        let size = rng.range(SIZE_RANGE.start, SIZE_RANGE.end);
        let rotation = rng.range(0.0, TAU);
        let spin = rng.signed(MAX_SPIN);
        Self {
            pos,
            vel,
            color,
            style,
            life: 1.0,
            decay,
            size,
            base_size: size,
            rotation,
            spin,
        }
    }

    /// Advance one frame. Expired particles are left untouched.
    pub fn tick(&mut self) {
        if self.is_expired() {
            return;
        }
        self.pos += self.vel;
        self.vel *= FRICTION;
        self.life -= self.decay;
        self.size = self.base_size * self.life;
        self.rotation += self.spin;
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }

    /// Local-to-surface transform: translate to `pos`, then rotate.
    pub fn transform(&self) -> Affine2 {
        Affine2::from_angle_translation(self.rotation, self.pos)
    }

    pub fn shapes(&self) -> Vec<Shape> {
        self.style.shapes(self.size, self.color)
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        if self.is_expired() {
            return;
        }
        let transform = self.transform();
        for shape in self.shapes() {
            canvas.draw(&shape, transform, self.life);
        }
    }
}
