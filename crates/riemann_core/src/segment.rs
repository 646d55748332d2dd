//! Colored line segments, the only primitive the scene is built from

use riemann_math::Vec3;
use serde::{Serialize, Deserialize};

/// RGBA color (each component 0.0-1.0)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 4]);

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);

    /// Create an opaque color from RGB components
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b, 1.0])
    }

    /// Create an opaque color from `0xRRGGBB`
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::from_rgb(channel(16), channel(8), channel(0))
    }

    /// Back to `0xRRGGBB` (alpha dropped)
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.0[0]) << 16) | (channel(self.0[1]) << 8) | channel(self.0[2])
    }

    #[inline]
    pub fn rgba(self) -> [f32; 4] {
        self.0
    }

    /// Convert sRGB components to linear (alpha unchanged) for sRGB render targets
    pub fn to_linear(self) -> Self {
        let channel = |c: f32| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        let [r, g, b, a] = self.0;
        Self([channel(r), channel(g), channel(b), a])
    }
}

/// A line segment from `a` to `b`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Vec3,
    pub b: Vec3,
    pub color: Color,
}

impl Segment {
    #[inline]
    pub fn new(a: Vec3, b: Vec3, color: Color) -> Self {
        Self { a, b, color }
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex(0xff0000), Color::from_rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::from_hex(0x0000ff), Color::from_rgb(0.0, 0.0, 1.0));

        let orange = Color::from_hex(0xff8800).rgba();
        assert!((orange[1] - 136.0 / 255.0).abs() < 1e-6);
        assert_eq!(orange[3], 1.0);
    }

    #[test]
    fn test_to_linear_keeps_extremes() {
        let white = Color::WHITE.to_linear().rgba();
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-5));
        assert_eq!(Color::BLACK.to_linear(), Color::BLACK);

        let grey = Color::from_hex(0x888888).to_linear().rgba();
        assert!(grey[0] > 0.24 && grey[0] < 0.25);
    }

    #[test]
    fn test_hex_roundtrip() {
        for hex in [0xff0088, 0x444444, 0x888888] {
            assert_eq!(Color::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn test_segment_length() {
        let s = Segment::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), Color::WHITE);
        assert_eq!(s.length(), 2.0);
    }
}
