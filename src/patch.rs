//! Before/after color patch rasterization.
//!
//! A patch is a rectangle rounded only on its outer edge (left for the
//! before patch, right for the after patch). The color is painted over a
//! checkerboard when translucent, outlined, then clipped to the rounded shape
//! with destination-in compositing. Everything happens in an RGBA8 buffer so
//! the result is independent of the renderer.

use log::trace;

use crate::checkerboard;
use crate::color::ArgbColor;
use crate::constants;

/// Which patch is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchSide {
    /// Baseline color, rounded on the left.
    Before,
    /// Current color, rounded on the right.
    After,
}

impl PatchSide {
    /// (left, right) corner radii.
    fn radii(self, radius: f64) -> (f64, f64) {
        match self {
            PatchSide::Before => (radius, 0.0),
            PatchSide::After => (0.0, radius),
        }
    }
}

/// Raster-space styling, already multiplied by the display scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchStyle {
    pub radius: f64,
    pub outline_width: f64,
    pub outline: ArgbColor,
    pub checker_cell: u32,
}

impl PatchStyle {
    /// Default styling at display `scale`.
    pub fn scaled(scale: f64) -> Self {
        let s = scale.max(1.0);
        Self {
            radius: constants::PATCH_RADIUS * s,
            outline_width: constants::OUTLINE_WIDTH * s,
            outline: constants::OUTLINE,
            checker_cell: (constants::CHECKER_CELL * s).round().max(1.0) as u32,
        }
    }
}

impl Default for PatchStyle {
    fn default() -> Self {
        Self::scaled(1.0)
    }
}

/// Rendered patch pixels (straight-alpha RGBA8, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl PatchImage {
    /// RGBA of pixel (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let o = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[o],
            self.pixels[o + 1],
            self.pixels[o + 2],
            self.pixels[o + 3],
        ]
    }
}

/// Rounded rectangle with separate left/right corner radii.
struct RoundedShape {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    left: f64,
    right: f64,
}

impl RoundedShape {
    /// Shape for a patch of `width` x `height`. The square edge is pushed out
    /// of the buffer by the outer radius so no outline shows on it.
    fn for_patch(width: f64, height: f64, side: PatchSide, radius: f64) -> Self {
        let (left, right) = side.radii(radius);
        let max_r = (height / 2.0).min((width + radius) / 2.0);
        Self {
            x0: -right,
            y0: 0.0,
            x1: width + left,
            y1: height,
            left: left.min(max_r),
            right: right.min(max_r),
        }
    }

    /// Signed distance from (`x`, `y`) to the outline; negative inside.
    fn distance(&self, x: f64, y: f64) -> f64 {
        let cx = (self.x0 + self.x1) / 2.0;
        let cy = (self.y0 + self.y1) / 2.0;
        let hw = (self.x1 - self.x0) / 2.0;
        let hh = (self.y1 - self.y0) / 2.0;
        let r = if x < cx { self.left } else { self.right };
        let qx = (x - cx).abs() - hw + r;
        let qy = (y - cy).abs() - hh + r;
        let outside = qx.max(0.0).hypot(qy.max(0.0));
        outside + qx.max(qy).min(0.0) - r
    }
}

/// Straight-alpha pixel, channels 0.0–1.0.
#[derive(Clone, Copy)]
struct Px {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Px {
    const CLEAR: Px = Px {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    fn from_color(c: ArgbColor, coverage: f64) -> Self {
        Self {
            r: c.r() as f64 / 255.0,
            g: c.g() as f64 / 255.0,
            b: c.b() as f64 / 255.0,
            a: c.a() as f64 / 255.0 * coverage,
        }
    }

    /// Source-over: `self` painted on top of `dst`.
    fn over(self, dst: Px) -> Px {
        let a = self.a + dst.a * (1.0 - self.a);
        if a <= 0.0 {
            return Px::CLEAR;
        }
        let blend = |s: f64, d: f64| (s * self.a + d * dst.a * (1.0 - self.a)) / a;
        Px {
            r: blend(self.r, dst.r),
            g: blend(self.g, dst.g),
            b: blend(self.b, dst.b),
            a,
        }
    }

    /// Destination-in: keep `self` where the mask covers it.
    fn masked(self, mask_alpha: f64) -> Px {
        Px {
            a: self.a * mask_alpha,
            ..self
        }
    }

    fn write(self, out: &mut [u8]) {
        let ch = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        out[0] = ch(self.r);
        out[1] = ch(self.g);
        out[2] = ch(self.b);
        out[3] = ch(self.a);
    }
}

/// Render a patch of `width` x `height` raster pixels showing `color`.
///
/// Returns `None` while the target has no area yet.
pub fn render_patch(
    width: u32,
    height: u32,
    color: ArgbColor,
    side: PatchSide,
    style: &PatchStyle,
) -> Option<PatchImage> {
    if width == 0 || height == 0 {
        return None;
    }
    trace!("rasterizing {side:?} patch {width}x{height} #{}", color.to_hex());

    let shape = RoundedShape::for_patch(width as f64, height as f64, side, style.radius);
    let translucent = color.a() < 255;
    let fill = Px::from_color(color, 1.0);
    let half_stroke = style.outline_width / 2.0;

    let mut pixels = vec![0u8; (width * height * 4) as usize];
    for py in 0..height {
        for px in 0..width {
            let mut base = if translucent {
                Px::from_color(checkerboard::checker_at(px, py, style.checker_cell), 1.0)
            } else {
                Px::CLEAR
            };
            base = fill.over(base);

            let d = shape.distance(px as f64 + 0.5, py as f64 + 0.5);
            let stroke = (half_stroke + 0.5 - d.abs()).clamp(0.0, 1.0);
            if stroke > 0.0 {
                base = Px::from_color(style.outline, stroke).over(base);
            }

            let mask = (0.5 - d).clamp(0.0, 1.0);
            let o = ((py * width + px) * 4) as usize;
            base.masked(mask).write(&mut pixels[o..o + 4]);
        }
    }

    Some(PatchImage {
        width,
        height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 60;
    const H: u32 = 40;

    fn render(color: u32, side: PatchSide) -> PatchImage {
        render_patch(W, H, ArgbColor::from_argb(color), side, &PatchStyle::default())
            .expect("non-empty patch")
    }

    #[test]
    fn empty_target_is_skipped() {
        let style = PatchStyle::default();
        assert!(render_patch(0, 10, ArgbColor::RED, PatchSide::Before, &style).is_none());
        assert!(render_patch(10, 0, ArgbColor::RED, PatchSide::After, &style).is_none());
    }

    #[test]
    fn opaque_interior_is_the_color() {
        let img = render(0xFF33_6699, PatchSide::Before);
        assert_eq!(img.pixel(W / 2, H / 2), [0x33, 0x66, 0x99, 255]);
        // inner (right) edge has neither rounding nor outline
        assert_eq!(img.pixel(W - 1, H / 2), [0x33, 0x66, 0x99, 255]);
    }

    #[test]
    fn before_patch_rounds_left_corners_only() {
        let img = render(0xFF00_FF00, PatchSide::Before);
        assert_eq!(img.pixel(0, 0)[3], 0);
        assert_eq!(img.pixel(0, H - 1)[3], 0);
        assert_eq!(img.pixel(W - 1, 0)[3], 255);
        assert_eq!(img.pixel(W - 1, H - 1)[3], 255);
    }

    #[test]
    fn after_patch_rounds_right_corners_only() {
        let img = render(0xFF00_FF00, PatchSide::After);
        assert_eq!(img.pixel(W - 1, 0)[3], 0);
        assert_eq!(img.pixel(W - 1, H - 1)[3], 0);
        assert_eq!(img.pixel(0, 0)[3], 255);
        assert_eq!(img.pixel(0, H - 1)[3], 255);
        assert_eq!(img.pixel(0, H / 2), [0, 255, 0, 255]);
    }

    #[test]
    fn outline_darkens_the_outer_edge() {
        let img = render(0xFFFF_FFFF, PatchSide::After);
        let edge = img.pixel(W / 2, 0);
        assert!(edge[0] < 255);
        assert_eq!(edge[3], 255);
    }

    #[test]
    fn half_alpha_blends_with_checkerboard() {
        let img = render(0x8000_00FF, PatchSide::Before);
        let style = PatchStyle::default();
        let (x, y) = (W / 2, H / 2);
        let got = img.pixel(x, y);
        let checker = checkerboard::checker_at(x, y, style.checker_cell);
        assert_eq!(got[3], 255);
        assert_ne!(got, [checker.r(), checker.g(), checker.b(), 255]);
        assert_ne!(got, [0, 0, 255, 255]);
        assert!(got[0] > 0 && got[2] > got[0]);
    }

    #[test]
    fn transparent_shows_only_checkerboard() {
        let img = render(0x00FF_0000, PatchSide::After);
        let style = PatchStyle::default();
        let c = checkerboard::checker_at(W / 2, H / 2, style.checker_cell);
        assert_eq!(img.pixel(W / 2, H / 2), [c.r(), c.g(), c.b(), 255]);
    }

    #[test]
    fn style_scales_with_density() {
        let s = PatchStyle::scaled(2.0);
        assert_eq!(s.radius, constants::PATCH_RADIUS * 2.0);
        assert_eq!(s.checker_cell, 10);
        assert_eq!(PatchStyle::scaled(0.5), PatchStyle::default());
    }
}
