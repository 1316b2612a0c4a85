//! RGBA colors and HSL conversion.

use ratatui::style::Color;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    /// Construct a color from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Construct an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Channel-wise multiply, as used by the RGBA multiply blend mode.
    pub fn multiply(self, other: Rgba) -> Rgba {
        fn mul(a: u8, b: u8) -> u8 {
            ((a as u16 * b as u16 + 255) >> 8) as u8
        }
        Rgba::new(
            mul(self.r, other.r),
            mul(self.g, other.g),
            mul(self.b, other.b),
            mul(self.a, other.a),
        )
    }

    /// Blend `self` over `dst` using straight alpha.
    pub fn over(self, dst: Rgba) -> Rgba {
        match self.a {
            0 => dst,
            255 => self,
            src_a => {
                let sa = src_a as u32;
                let da = dst.a as u32;
                // Resulting alpha scaled by 255.
                let out_a = sa * 255 + da * (255 - sa);
                if out_a == 0 {
                    return Rgba::TRANSPARENT;
                }
                let channel = |s: u8, d: u8| -> u8 {
                    let num = s as u32 * sa * 255 + d as u32 * da * (255 - sa);
                    (num / out_a).min(255) as u8
                };
                Rgba::new(
                    channel(self.r, dst.r),
                    channel(self.g, dst.g),
                    channel(self.b, dst.b),
                    (out_a / 255).min(255) as u8,
                )
            }
        }
    }
}

impl From<(u8, u8, u8)> for Rgba {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgba::rgb(r, g, b)
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Convert HSL to an opaque color.
///
/// Hue is in degrees, saturation and lightness are percentages (0-100).
pub fn hsl(h: f64, s: f64, l: f64) -> Rgba {
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Rgba::rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgba::rgb(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
