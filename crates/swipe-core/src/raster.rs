//! Software canvas backing the game surface.
//!
//! Pixels are premultiplied RGBA8 and persist between frames, so the per-frame
//! fade overlay leaves an afterimage instead of clearing. Shapes are rasterized
//! by inverse-mapping each covered device pixel into the shape's local frame.

use glam::{Affine2, Vec2, Vec4};

use crate::canvas::{Canvas, RadialGradient, Shape};
use crate::color::Rgba;

#[derive(Debug, Clone)]
pub struct RasterCanvas {
    width: u32,
    height: u32,
    /// Device pixels per logical unit.
    scale: f32,
    pixels: Vec<[u8; 4]>,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Reallocates (and clears) only when the dimensions or scale change.
    pub fn resize(&mut self, width: u32, height: u32, scale: f32) -> bool {
        if width == self.width && height == self.height && scale == self.scale {
            return false;
        }
        *self = Self::new(width, height, scale);
        true
    }

    pub fn clear(&mut self) {
        self.pixels.fill([0; 4]);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn blend(pixel: &mut [u8; 4], src: Vec4) {
        let dst = Vec4::from_array(pixel.map(f32::from)) / 255.0;
        let out = (src + dst * (1.0 - src.w)).clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
        *pixel = out.round().to_array().map(|c| c as u8);
    }

    /// Blend `paint(local_point)` into every device pixel whose center lies in
    /// the device-space box around `local_min..local_max`.
    fn shade<F>(
        &mut self,
        transform: Affine2,
        local_min: Vec2,
        local_max: Vec2,
        alpha: f32,
        mut paint: F,
    ) where
        F: FnMut(Vec2) -> Option<Vec4>,
    {
        if self.width == 0 || self.height == 0 || alpha <= 0.0 {
            return;
        }
        let device = Affine2::from_scale(Vec2::splat(self.scale)) * transform;
        let corners = [
            local_min,
            Vec2::new(local_max.x, local_min.y),
            local_max,
            Vec2::new(local_min.x, local_max.y),
        ]
        .map(|corner| device.transform_point2(corner));
        let lo = corners.iter().fold(Vec2::splat(f32::INFINITY), |acc, c| acc.min(*c));
        let hi = corners.iter().fold(Vec2::splat(f32::NEG_INFINITY), |acc, c| acc.max(*c));
        if !lo.is_finite() || !hi.is_finite() {
            return;
        }
        let x0 = lo.x.floor().max(0.0) as u32;
        let y0 = lo.y.floor().max(0.0) as u32;
        let x1 = (hi.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (hi.y.ceil().max(0.0) as u32).min(self.height);

        let inverse = device.inverse();
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if let Some(color) = paint(inverse.transform_point2(center)) {
                    let index = y as usize * self.width as usize + x as usize;
                    Self::blend(&mut self.pixels[index], color * alpha);
                }
            }
        }
    }

    fn gradient_disc(&mut self, gradient: &RadialGradient, transform: Affine2, alpha: f32) {
        let reach = Vec2::splat(gradient.radius);
        let (min, max) = (gradient.center - reach, gradient.center + reach);
        let this = self.params();
        self.shade(transform, min, max, alpha, |local| {
            let cover = this.coverage(gradient.radius - local.distance(gradient.center));
            (cover > 0.0).then(|| gradient.color_at(gradient.parameter(local)) * cover)
        });
    }

    fn ring(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Rgba,
        width: f32,
        transform: Affine2,
        alpha: f32,
    ) {
        let reach = Vec2::splat(radius + width + 1.0 / self.scale);
        let this = self.params();
        let paint = color.premultiplied();
        self.shade(transform, center - reach, center + reach, alpha, |local| {
            let off = (local.distance(center) - radius).abs();
            let cover = this.coverage(width * 0.5 - off);
            (cover > 0.0).then(|| paint * cover)
        });
    }

    fn stroke_segments(
        &mut self,
        segments: &[[Vec2; 2]],
        color: Rgba,
        width: f32,
        transform: Affine2,
        alpha: f32,
    ) {
        let Some((min, max)) = bounds(segments.iter().flatten().copied()) else {
            return;
        };
        let reach = Vec2::splat(width + 1.0 / self.scale);
        let this = self.params();
        let paint = color.premultiplied();
        self.shade(transform, min - reach, max + reach, alpha, |local| {
            let nearest = segments
                .iter()
                .map(|[a, b]| segment_distance(local, *a, *b))
                .fold(f32::INFINITY, f32::min);
            let cover = this.coverage(width * 0.5 - nearest);
            (cover > 0.0).then(|| paint * cover)
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba, transform: Affine2, alpha: f32) {
        let Some((min, max)) = bounds(points.iter().copied()) else {
            return;
        };
        let reach = Vec2::splat(1.0 / self.scale);
        let this = self.params();
        let paint = color.premultiplied();
        self.shade(transform, min - reach, max + reach, alpha, |local| {
            let edge = polygon_edge_distance(local, points);
            let signed = if winding_number(local, points) != 0 { edge } else { -edge };
            let cover = this.coverage(signed);
            (cover > 0.0).then(|| paint * cover)
        });
    }

    fn stroke_polygon(
        &mut self,
        points: &[Vec2],
        color: Rgba,
        width: f32,
        transform: Affine2,
        alpha: f32,
    ) {
        let closed: Vec<[Vec2; 2]> = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(a, b)| [*a, *b])
            .collect();
        self.stroke_segments(&closed, color, width, transform, alpha);
    }

    fn params(&self) -> Params {
        Params { scale: self.scale }
    }
}

/// Copy of the scale used inside shading closures while the pixel buffer is borrowed.
#[derive(Clone, Copy)]
struct Params {
    scale: f32,
}

impl Params {
    /// Edge coverage for a signed distance in local units, positive inside.
    fn coverage(&self, inside_by: f32) -> f32 {
        (inside_by * self.scale + 0.5).clamp(0.0, 1.0)
    }
}

impl Canvas for RasterCanvas {
    fn fade(&mut self, overlay: Rgba) {
        let src = overlay.premultiplied();
        for pixel in &mut self.pixels {
            Self::blend(pixel, src);
        }
    }

    fn draw(&mut self, shape: &Shape, transform: Affine2, alpha: f32) {
        match shape {
            Shape::GradientDisc { gradient } => self.gradient_disc(gradient, transform, alpha),
            Shape::Ring {
                center,
                radius,
                color,
                width,
            } => self.ring(*center, *radius, *color, *width, transform, alpha),
            Shape::Segments {
                segments,
                color,
                width,
            } => self.stroke_segments(segments, *color, *width, transform, alpha),
            Shape::Polygon {
                points,
                fill,
                stroke,
            } => {
                if let Some(color) = fill {
                    self.fill_polygon(points, *color, transform, alpha);
                }
                if let Some((color, width)) = stroke {
                    self.stroke_polygon(points, *color, *width, transform, alpha);
                }
            }
        }
    }
}

fn bounds(points: impl Iterator<Item = Vec2>) -> Option<(Vec2, Vec2)> {
    points.fold(None, |acc, p| match acc {
        None => Some((p, p)),
        Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
    })
}

fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn polygon_edge_distance(p: Vec2, points: &[Vec2]) -> f32 {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| segment_distance(p, *a, *b))
        .fold(f32::INFINITY, f32::min)
}

/// Nonzero winding number of `points` around `p`.
fn winding_number(p: Vec2, points: &[Vec2]) -> i32 {
    let mut winding = 0;
    for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
        let side = (*b - *a).perp_dot(p - *a);
        if a.y <= p.y {
            if b.y > p.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleStyle;

    fn opaque_white(width: u32, height: u32) -> RasterCanvas {
        let mut canvas = RasterCanvas::new(width, height, 1.0);
        canvas.fade(Rgba::WHITE);
        canvas
    }

    fn draw_style(
        canvas: &mut RasterCanvas,
        style: ParticleStyle,
        at: Vec2,
        size: f32,
        color: Rgba,
    ) {
        let transform = Affine2::from_translation(at);
        for shape in style.shapes(size, color) {
            canvas.draw(&shape, transform, 1.0);
        }
    }

    #[test]
    fn fade_darkens_without_clearing() {
        let mut canvas = opaque_white(4, 4);
        assert_eq!(canvas.pixel(1, 1), Some([255; 4]));

        canvas.fade(Rgba::BLACK.with_alpha(0.5));
        let [r, g, b, a] = canvas.pixel(1, 1).unwrap();
        assert_eq!(a, 255);
        assert!((126..=129).contains(&r) && r == g && g == b);

        canvas.fade(Rgba::BLACK.with_alpha(0.02));
        assert!(canvas.pixel(1, 1).unwrap()[0] < r);
    }

    #[test]
    fn fade_builds_up_opacity_on_transparent_pixels() {
        let mut canvas = RasterCanvas::new(2, 2, 1.0);
        for _ in 0..10 {
            canvas.fade(Rgba::BLACK.with_alpha(0.02));
        }
        let [r, _, _, a] = canvas.pixel(0, 0).unwrap();
        assert_eq!(r, 0);
        assert!(a > 40);
    }

    #[test]
    fn sparkle_glow_is_bright_in_the_middle_and_empty_outside() {
        let mut canvas = RasterCanvas::new(32, 32, 1.0);
        draw_style(&mut canvas, ParticleStyle::Sparkle, Vec2::new(16.0, 16.0), 6.0, Rgba::from_rgb_u32(0xFF0000));
        let center = canvas.pixel(16, 16).unwrap();
        assert!(center[0] > 200, "center {center:?}");
        assert_eq!(canvas.pixel(16, 2), Some([0; 4]));
        assert_eq!(canvas.pixel(25, 25), Some([0; 4]));
    }

    #[test]
    fn star_fill_covers_its_center() {
        let mut canvas = RasterCanvas::new(32, 32, 1.0);
        draw_style(&mut canvas, ParticleStyle::Star, Vec2::new(16.0, 16.0), 8.0, Rgba::from_rgb_u32(0x00FF00));
        let center = canvas.pixel(15, 15).unwrap();
        assert_eq!(center[1], 255);
        assert_eq!(center[3], 255);
        assert_eq!(canvas.pixel(0, 0), Some([0; 4]));
    }

    #[test]
    fn bubble_ring_leaves_a_lighter_interior() {
        let mut canvas = RasterCanvas::new(40, 40, 1.0);
        draw_style(&mut canvas, ParticleStyle::Bubble, Vec2::new(20.0, 20.0), 10.0, Rgba::from_rgb_u32(0x0000FF));
        let rim = canvas.pixel(29, 19).unwrap();
        assert!(rim[2] > 150, "rim {rim:?}");
        let inside = canvas.pixel(17, 17).unwrap();
        assert!(inside[3] > 0 && inside[3] < 255, "inside {inside:?}");
    }

    #[test]
    fn global_alpha_scales_coverage() {
        let mut canvas = RasterCanvas::new(16, 16, 1.0);
        let shape = Shape::Polygon {
            points: vec![Vec2::ZERO, Vec2::new(16.0, 0.0), Vec2::new(16.0, 16.0), Vec2::new(0.0, 16.0)],
            fill: Some(Rgba::WHITE),
            stroke: None,
        };
        canvas.draw(&shape, Affine2::IDENTITY, 0.25);
        assert_eq!(canvas.pixel(8, 8), Some([64; 4]));
    }

    #[test]
    fn scale_maps_logical_units_to_device_pixels() {
        let mut canvas = RasterCanvas::new(40, 40, 2.0);
        draw_style(&mut canvas, ParticleStyle::Star, Vec2::new(10.0, 10.0), 4.0, Rgba::WHITE);
        assert_eq!(canvas.pixel(20, 20).unwrap()[3], 255);
        assert_eq!(canvas.pixel(10, 10).unwrap()[3], 0);
    }

    #[test]
    fn resize_reallocates_and_clears() {
        let mut canvas = opaque_white(4, 4);
        assert!(!canvas.resize(4, 4, 1.0));
        assert_eq!(canvas.pixel(0, 0), Some([255; 4]));
        assert!(canvas.resize(8, 2, 1.5));
        assert_eq!(canvas.as_bytes().len(), 8 * 2 * 4);
        assert_eq!(canvas.pixel(7, 1), Some([0; 4]));
        assert_eq!(canvas.pixel(8, 0), None);
    }

    #[test]
    fn drawing_off_surface_is_clipped() {
        let mut canvas = RasterCanvas::new(8, 8, 1.0);
        draw_style(&mut canvas, ParticleStyle::Sparkle, Vec2::new(-50.0, 400.0), 5.0, Rgba::WHITE);
        assert!(canvas.as_bytes().iter().all(|&b| b == 0));
    }
}
