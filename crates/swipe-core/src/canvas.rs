//! Drawing primitives produced by particles and consumed by canvases.
//!
//! Shapes are described in a particle's local frame; the canvas receives the
//! local-to-surface transform and the global opacity alongside each shape.

use glam::{Affine2, Vec2, Vec4};

use crate::color::Rgba;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Two-circle radial gradient: a zero-radius focus circle growing into the outer
/// circle at `center` with `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub focus: Vec2,
    pub center: Vec2,
    pub radius: f32,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(focus: Vec2, center: Vec2, radius: f32) -> Self {
        Self {
            focus,
            center,
            radius,
            stops: Vec::new(),
        }
    }

    pub fn with_stop(mut self, offset: f32, color: Rgba) -> Self {
        self.stops.push(ColorStop { offset, color });
        self
    }

    /// Gradient parameter `t` of the largest interpolated circle passing through `point`.
    pub fn parameter(&self, point: Vec2) -> f32 {
        if self.radius <= 0.0 {
            return 1.0;
        }
        let q = point - self.focus;
        let e = self.center - self.focus;
        let a = e.dot(e) - self.radius * self.radius;
        let b = q.dot(e);
        let c = q.dot(q);
        let t = if a.abs() < f32::EPSILON {
            if b > 0.0 {
                c / (2.0 * b)
            } else {
                1.0
            }
        } else {
            let root = (b * b - a * c).max(0.0).sqrt();
            ((b + root) / a).max((b - root) / a)
        };
        t.max(0.0)
    }

    /// Premultiplied color at parameter `t`, padded past the first and last stop.
    pub fn color_at(&self, t: f32) -> Vec4 {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Vec4::ZERO,
        };
        if t <= first.offset {
            return first.color.premultiplied();
        }
        if t >= last.offset {
            return last.color.premultiplied();
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if t <= hi.offset {
                let span = hi.offset - lo.offset;
                let local = if span > 0.0 { (t - lo.offset) / span } else { 1.0 };
                return lo
                    .color
                    .premultiplied()
                    .lerp(hi.color.premultiplied(), local);
            }
        }
        last.color.premultiplied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled disc of `gradient.radius` around `gradient.center`.
    GradientDisc { gradient: RadialGradient },
    Ring {
        center: Vec2,
        radius: f32,
        color: Rgba,
        width: f32,
    },
    /// Line segments stroked as a single path.
    Segments {
        segments: Vec<[Vec2; 2]>,
        color: Rgba,
        width: f32,
    },
    /// Closed polygon; filled first, then stroked.
    Polygon {
        points: Vec<Vec2>,
        fill: Option<Rgba>,
        stroke: Option<(Rgba, f32)>,
    },
}

pub trait Canvas {
    /// Paint `overlay` over the whole surface with source-over compositing.
    fn fade(&mut self, overlay: Rgba);

    fn draw(&mut self, shape: &Shape, transform: Affine2, alpha: f32);
}
