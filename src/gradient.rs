//! Slider track gradients.
//!
//! A [`TrackGradient`] is an evenly spaced list of ARGB stops. Tracks are
//! rasterized to RGBA8 buffers at physical resolution rather than drawn with
//! the renderer's linear gradients.

use crate::color::ArgbColor;
use crate::math;

/// Red → yellow → green → cyan → blue → magenta → red.
const RAINBOW: [ArgbColor; 7] = [
    ArgbColor::from_argb(0xFFFF_0000),
    ArgbColor::from_argb(0xFFFF_FF00),
    ArgbColor::from_argb(0xFF00_FF00),
    ArgbColor::from_argb(0xFF00_FFFF),
    ArgbColor::from_argb(0xFF00_00FF),
    ArgbColor::from_argb(0xFFFF_00FF),
    ArgbColor::from_argb(0xFFFF_0000),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackGradient {
    stops: Vec<ArgbColor>,
}

impl TrackGradient {
    /// Gradient through `stops`, evenly spaced. A single stop is a flat fill.
    pub fn new(stops: Vec<ArgbColor>) -> Self {
        Self { stops }
    }

    /// Two-stop gradient.
    pub fn between(from: ArgbColor, to: ArgbColor) -> Self {
        Self::new(vec![from, to])
    }

    /// Fixed hue rainbow.
    pub fn hue() -> Self {
        Self::new(RAINBOW.to_vec())
    }

    /// Gray at `lightness` to fully saturated at `lightness`, both at `hue`.
    pub fn saturation(hue: f64, lightness: f64) -> Self {
        Self::between(
            ArgbColor::from_hsv(255, hue, 0.0, lightness),
            ArgbColor::from_hsv(255, hue, 1.0, lightness),
        )
    }

    /// Black to the lightest color at `hue`/`saturation`.
    pub fn brightness(hue: f64, saturation: f64) -> Self {
        Self::between(ArgbColor::BLACK, ArgbColor::from_hsv(255, hue, saturation, 1.0))
    }

    /// Fully transparent to `opaque`.
    pub fn alpha(opaque: ArgbColor) -> Self {
        Self::between(ArgbColor::TRANSPARENT, opaque.with_alpha(255))
    }

    pub fn stops(&self) -> &[ArgbColor] {
        &self.stops
    }

    /// Color at position `t` (0.0 = left, 1.0 = right).
    pub fn sample(&self, t: f64) -> ArgbColor {
        match self.stops.len() {
            0 => ArgbColor::TRANSPARENT,
            1 => self.stops[0],
            n => {
                let pos = t.clamp(0.0, 1.0) * (n - 1) as f64;
                let i = (pos.floor() as usize).min(n - 2);
                let f = pos - i as f64;
                let (a, b) = (self.stops[i], self.stops[i + 1]);
                ArgbColor::from_channels(
                    math::lerp_channel(a.a(), b.a(), f),
                    math::lerp_channel(a.r(), b.r(), f),
                    math::lerp_channel(a.g(), b.g(), f),
                    math::lerp_channel(a.b(), b.b(), f),
                )
            }
        }
    }

    /// Rasterize as a horizontal RGBA8 ramp of `width` x `height` pixels.
    pub fn rasterize(&self, width: u32, height: u32) -> Vec<u8> {
        let mut buf = vec![0u8; (width * height * 4) as usize];
        for px in 0..width {
            let t = px as f64 / (width - 1).max(1) as f64;
            let c = self.sample(t);
            for py in 0..height {
                let offset = ((py * width + px) * 4) as usize;
                buf[offset] = c.r();
                buf[offset + 1] = c.g();
                buf[offset + 2] = c.b();
                buf[offset + 3] = c.a();
            }
        }
        buf
    }
}
