//! Trail colors and the background gradients cycled on each gesture.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::rng::RandomSource;

const PARTICLE_COLORS: [u32; 20] = [
    0xFF6B6B, 0x4ECDC4, 0x45B7D1, 0x96CEB4, 0xFFEAA7, 0xDDA0DD, 0x98D8C8, 0xF06292, 0xAED581,
    0xFFB74D, 0xFF8A65, 0xBA68C8, 0x4FC3F7, 0x81C784, 0xFFD54F, 0xF48FB1, 0x80DEEA, 0xC5E1A5,
    0xFFCC02, 0xCE93D8,
];

const BACKGROUNDS: [(u32, u32); 8] = [
    (0x667EEA, 0x764BA2),
    (0xF093FB, 0xF5576C),
    (0x4FACFE, 0x00F2FE),
    (0x43E97B, 0x38F9D7),
    (0xFA709A, 0xFEE140),
    (0xA8EDEA, 0xFED6E3),
    (0xFF9A9E, 0xFECFEF),
    (0xC471F5, 0xFA71CD),
];

/// Two-stop diagonal (135°) gradient: `from` at the top-left, `to` at the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundGradient {
    pub from: Rgba,
    pub to: Rgba,
}

impl BackgroundGradient {
    pub fn sample(&self, t: f32) -> Rgba {
        self.from.lerp(self.to, t.clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub particle_colors: Vec<Rgba>,
    pub backgrounds: Vec<BackgroundGradient>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            particle_colors: PARTICLE_COLORS.iter().copied().map(Rgba::from_rgb_u32).collect(),
            backgrounds: BACKGROUNDS
                .iter()
                .map(|&(from, to)| BackgroundGradient {
                    from: Rgba::from_rgb_u32(from),
                    to: Rgba::from_rgb_u32(to),
                })
                .collect(),
        }
    }
}

impl Palette {
    pub fn random_color<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Rgba {
        self.particle_colors[rng.pick(self.particle_colors.len())]
    }
}

/// Position in the background palette; wraps after the last entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundCycle {
    index: usize,
    len: usize,
}

impl BackgroundCycle {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }
}
