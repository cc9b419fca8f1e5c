//! ArgbColor: the public color representation for floem-sliders.
//!
//! Wraps a packed 32-bit `0xAARRGGBB` value. HSV conversions take and return
//! hue in degrees (0–360) with saturation, value and alpha in 0.0–1.0.

use floem::peniko::Color;

use crate::math;

/// Packed ARGB color (`0xAARRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgbColor(u32);

impl ArgbColor {
    pub const RED: ArgbColor = ArgbColor(0xFFFF_0000);
    pub const BLACK: ArgbColor = ArgbColor(0xFF00_0000);
    pub const TRANSPARENT: ArgbColor = ArgbColor(0x0000_0000);

    /// Wrap a packed `0xAARRGGBB` value. Any bit pattern is accepted.
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Assemble from 0–255 channels.
    pub const fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// The packed `0xAARRGGBB` value.
    pub const fn argb(&self) -> u32 {
        self.0
    }

    /// Alpha channel (0–255).
    pub const fn a(&self) -> u8 {
        (self.0 >> 24) as u8
    }
    /// Red channel (0–255).
    pub const fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }
    /// Green channel (0–255).
    pub const fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }
    /// Blue channel (0–255).
    pub const fn b(&self) -> u8 {
        self.0 as u8
    }

    /// Same RGB with a different alpha.
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | ((a as u32) << 24))
    }

    /// Create from HSV with hue in degrees and `alpha` as a 0–255 channel.
    pub fn from_hsv(alpha: u8, hue: f64, saturation: f64, value: f64) -> Self {
        let h = (hue / 360.0).rem_euclid(1.0);
        let (r, g, b) = math::hsb_to_rgb(h, saturation.clamp(0.0, 1.0), value.clamp(0.0, 1.0));
        Self::from_channels(
            alpha,
            math::to_channel(r),
            math::to_channel(g),
            math::to_channel(b),
        )
    }

    /// Convert to HSV. Returns (hue in 0–360, saturation, value); alpha is ignored.
    pub fn to_hsv(&self) -> (f64, f64, f64) {
        let (h, s, v) = math::rgb_to_hsb(
            self.r() as f64 / 255.0,
            self.g() as f64 / 255.0,
            self.b() as f64 / 255.0,
        );
        let mut hue = h * 360.0;
        if hue >= 360.0 {
            hue -= 360.0;
        }
        (hue, s, v)
    }

    /// Parse a hex string (with or without `#`).
    ///
    /// 8-char hex is interpreted as AARRGGBB. 6-char hex defaults to full opacity.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim().trim_start_matches('#');
        if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match stripped.len() {
            6 => u32::from_str_radix(stripped, 16)
                .ok()
                .map(|rgb| Self(0xFF00_0000 | rgb)),
            8 => u32::from_str_radix(stripped, 16).ok().map(Self),
            _ => None,
        }
    }

    /// Format as uppercase `AARRGGBB` (no `#` prefix).
    pub fn to_hex(&self) -> String {
        format!("{:08X}", self.0)
    }

    /// Convert to a renderer color.
    pub fn to_peniko(&self) -> Color {
        Color::rgba8(self.r(), self.g(), self.b(), self.a())
    }
}

impl Default for ArgbColor {
    fn default() -> Self {
        Self::RED
    }
}

impl From<u32> for ArgbColor {
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}

impl From<ArgbColor> for u32 {
    fn from(color: ArgbColor) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack() {
        let c = ArgbColor::from_argb(0x80FF_4020);
        assert_eq!((c.a(), c.r(), c.g(), c.b()), (0x80, 0xFF, 0x40, 0x20));
        assert_eq!(ArgbColor::from_channels(0x80, 0xFF, 0x40, 0x20), c);
        assert_eq!(c.with_alpha(0xFF).argb(), 0xFFFF_4020);
    }

    #[test]
    fn red_decomposes_to_zero_hue() {
        let (h, s, v) = ArgbColor::RED.to_hsv();
        assert_eq!((h, s, v), (0.0, 1.0, 1.0));
    }

    #[test]
    fn hsv_round_trip_stays_within_one_unit() {
        // every channel value, with a stride that covers the extremes
        let steps: Vec<u8> = (0..=255u8).step_by(3).chain([254, 255]).collect();
        for &r in &steps {
            for &g in &steps {
                for &b in &steps {
                    let c = ArgbColor::from_channels(255, r, g, b);
                    let (h, s, v) = c.to_hsv();
                    let back = ArgbColor::from_hsv(c.a(), h, s, v);
                    for (x, y) in [(c.r(), back.r()), (c.g(), back.g()), (c.b(), back.b())] {
                        assert!(
                            (x as i32 - y as i32).abs() <= 1,
                            "{} -> {}",
                            c.to_hex(),
                            back.to_hex()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn hue_120_is_green() {
        assert_eq!(ArgbColor::from_hsv(255, 120.0, 1.0, 1.0).argb(), 0xFF00_FF00);
        assert_eq!(ArgbColor::from_hsv(255, 360.0, 1.0, 1.0).argb(), 0xFFFF_0000);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(ArgbColor::from_hex("#80FF0000"), Some(ArgbColor::from_argb(0x80FF_0000)));
        assert_eq!(ArgbColor::from_hex("00ff00"), Some(ArgbColor::from_argb(0xFF00_FF00)));
        assert_eq!(ArgbColor::from_hex("#12345"), None);
        assert_eq!(ArgbColor::from_hex("zz000000"), None);
        assert_eq!(ArgbColor::from_argb(0x0A0B_0C0D).to_hex(), "0A0B0C0D");
    }
}
