//! HsvaColor — the public color representation for floem-hsva.
//!
//! Stores hue in degrees [0, 360) plus normalized saturation, value, and
//! alpha. The widgets work in HSV natively; ARGB and hex conversions exist
//! for the host's benefit.

use crate::math;

/// HSV color with a separate alpha channel.
///
/// Hue is in degrees [0, 360); saturation, value, and alpha are 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvaColor {
    hue: f64,
    saturation: f64,
    value: f64,
    alpha: f64,
}

impl Default for HsvaColor {
    /// Opaque red, the widgets' starting color.
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 1.0,
            value: 1.0,
            alpha: 1.0,
        }
    }
}

impl HsvaColor {
    /// Create from components. Hue is wrapped into [0, 360); the rest are
    /// clamped to 0.0–1.0.
    pub fn new(hue: f64, saturation: f64, value: f64, alpha: f64) -> Self {
        Self {
            hue: math::wrap_hue(hue),
            saturation: saturation.clamp(0.0, 1.0),
            value: value.clamp(0.0, 1.0),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Hue in degrees [0, 360).
    pub fn hue(&self) -> f64 {
        self.hue
    }
    /// Saturation (0.0–1.0).
    pub fn saturation(&self) -> f64 {
        self.saturation
    }
    /// Value/brightness (0.0–1.0).
    pub fn value(&self) -> f64 {
        self.value
    }
    /// Alpha (0.0–1.0).
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The same color with a different alpha (clamped).
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// The same color at full opacity.
    pub fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }

    /// Create from a packed 0xAARRGGBB value.
    pub fn from_argb(argb: u32) -> Self {
        let a = ((argb >> 24) & 0xFF) as f64 / 255.0;
        let r = ((argb >> 16) & 0xFF) as f64 / 255.0;
        let g = ((argb >> 8) & 0xFF) as f64 / 255.0;
        let b = (argb & 0xFF) as f64 / 255.0;
        let (h, s, v) = math::rgb_to_hsv(r, g, b);
        Self {
            hue: h,
            saturation: s,
            value: v,
            alpha: a,
        }
    }

    /// Pack into 0xAARRGGBB.
    pub fn to_argb(&self) -> u32 {
        let (r, g, b) = self.to_rgb8();
        let a = (self.alpha * 255.0).round() as u32;
        (a << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }

    /// Create from 0–255 RGB values with full opacity.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let (h, s, v) = math::rgb_to_hsv(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
        Self {
            hue: h,
            saturation: s,
            value: v,
            alpha: 1.0,
        }
    }

    /// Convert to 0–255 RGB tuple (alpha dropped).
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let (r, g, b) = math::hsv_to_rgb(self.hue, self.saturation, self.value);
        (
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        )
    }

    /// RGBA as f64 in 0.0–1.0, for handing to the renderer.
    pub fn to_rgba_f64(&self) -> (f64, f64, f64, f64) {
        let (r, g, b) = math::hsv_to_rgb(self.hue, self.saturation, self.value);
        (r, g, b, self.alpha)
    }

    /// Parse a hex string (with or without `#`, 3, 6, or 8 chars).
    ///
    /// 8-char hex is interpreted as RRGGBBAA. 3 and 6-char hex default to
    /// full opacity.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim_start_matches('#');
        if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let (r, g, b, a) = match stripped.len() {
            3 => {
                let r = u8::from_str_radix(&stripped[0..1], 16).ok()?;
                let g = u8::from_str_radix(&stripped[1..2], 16).ok()?;
                let b = u8::from_str_radix(&stripped[2..3], 16).ok()?;
                (r * 17, g * 17, b * 17, 255)
            }
            6 | 8 => {
                let r = u8::from_str_radix(&stripped[0..2], 16).ok()?;
                let g = u8::from_str_radix(&stripped[2..4], 16).ok()?;
                let b = u8::from_str_radix(&stripped[4..6], 16).ok()?;
                let a = if stripped.len() == 8 {
                    u8::from_str_radix(&stripped[6..8], 16).ok()?
                } else {
                    255
                };
                (r, g, b, a)
            }
            _ => return None,
        };
        let (h, s, v) = math::rgb_to_hsv(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
        Some(Self {
            hue: h,
            saturation: s,
            value: v,
            alpha: a as f64 / 255.0,
        })
    }

    /// Format as uppercase hex (no `#` prefix).
    ///
    /// Returns 6 chars (RRGGBB) when fully opaque, 8 chars (RRGGBBAA)
    /// otherwise.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        if (self.alpha - 1.0).abs() < 0.001 {
            format!("{:02X}{:02X}{:02X}", r, g, b)
        } else {
            let a = (self.alpha * 255.0).round() as u8;
            format!("{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_decomposition() {
        // Pure green at half alpha.
        let c = HsvaColor::from_argb(0x8000FF00);
        assert!((c.hue() - 120.0).abs() < 1e-9);
        assert!((c.saturation() - 1.0).abs() < 1e-9);
        assert!((c.value() - 1.0).abs() < 1e-9);
        assert!((c.alpha() - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(c.to_argb(), 0x8000FF00);
    }

    #[test]
    fn hex_round_trip() {
        let c = HsvaColor::from_hex("#3B82F6").unwrap();
        assert_eq!(c.to_hex(), "3B82F6");
        let c = HsvaColor::from_hex("3B82F680").unwrap();
        assert_eq!(c.to_hex(), "3B82F680");
        let c = HsvaColor::from_hex("#F00").unwrap();
        assert_eq!(c.to_rgb8(), (255, 0, 0));
        assert!(HsvaColor::from_hex("12345").is_none());
        assert!(HsvaColor::from_hex("nope").is_none());
    }

    #[test]
    fn constructor_normalizes() {
        let c = HsvaColor::new(400.0, 2.0, -1.0, 0.5);
        assert!((c.hue() - 40.0).abs() < 1e-9);
        assert_eq!(c.saturation(), 1.0);
        assert_eq!(c.value(), 0.0);
        assert_eq!(c.opaque().alpha(), 1.0);
    }
}
